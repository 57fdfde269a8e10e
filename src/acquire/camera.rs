/// Taking a photo with the camera
///
/// The capture itself sits behind the `Camera` trait so the flow
/// (permission, shutter, capture, save) can run against any device.
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

use super::permission::CameraAccess;
use super::{AcquireError, Source};
use crate::state::data::SelectedImage;

/// A camera that can produce one JPEG still
pub trait Camera: Send + 'static {
    /// Ask the platform for access; may block until the user answers
    fn request_access(&self) -> CameraAccess;

    /// Modal shutter prompt; false when the user backs out
    fn confirm_shot(&self) -> bool;

    /// Grab a single frame, JPEG encoded
    fn capture_jpeg(&self) -> Result<Vec<u8>, String>;
}

/// Stand-in for platforms without a supported capture backend
#[cfg(not(target_os = "linux"))]
pub struct NoCamera;

#[cfg(not(target_os = "linux"))]
impl Camera for NoCamera {
    fn request_access(&self) -> CameraAccess {
        CameraAccess::Denied
    }

    fn confirm_shot(&self) -> bool {
        false
    }

    fn capture_jpeg(&self) -> Result<Vec<u8>, String> {
        Err("Camera capture is not supported on this platform".to_string())
    }
}

/// Captured photos are written here, like the gallery on a phone
#[derive(Debug, Clone)]
pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Save JPEG data under a timestamped name and return its path
    pub fn save(&self, jpeg: &[u8]) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S%.3f");
        let path = self.dir.join(format!("flower_{}.jpg", stamp));
        fs::write(&path, jpeg)?;

        Ok(path)
    }
}

/// Run the whole capture flow on the blocking pool
pub async fn capture_from_camera<C: Camera>(
    camera: C,
    store: PhotoStore,
) -> Result<SelectedImage, AcquireError> {
    tokio::task::spawn_blocking(move || capture_blocking(&camera, &store))
        .await
        .map_err(|e| AcquireError::Failed(format!("Task join error: {}", e)))?
}

/// Blocking implementation of the capture flow
fn capture_blocking<C: Camera>(camera: &C, store: &PhotoStore) -> Result<SelectedImage, AcquireError> {
    if !camera.request_access().is_granted() {
        return Err(AcquireError::PermissionDenied);
    }

    if !camera.confirm_shot() {
        return Err(AcquireError::Cancelled(Source::Camera));
    }

    let jpeg = camera.capture_jpeg().map_err(|e| {
        error!(error = %e, "Camera capture failed");
        AcquireError::Failed(e)
    })?;

    let path = store
        .save(&jpeg)
        .map_err(|e| AcquireError::Failed(format!("No se pudo guardar la foto: {}", e)))?;

    info!(path = %path.display(), bytes = jpeg.len(), "Saved captured photo");
    Ok(SelectedImage::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted camera that counts how often the shutter UI was opened
    struct FakeCamera {
        access: CameraAccess,
        confirm: bool,
        frame: Result<Vec<u8>, String>,
        shutter_opened: Arc<AtomicUsize>,
    }

    impl FakeCamera {
        fn new(access: CameraAccess) -> (Self, Arc<AtomicUsize>) {
            let opened = Arc::new(AtomicUsize::new(0));
            let camera = Self {
                access,
                confirm: true,
                frame: Ok(vec![0xFF, 0xD8, 0xFF, 0xD9]),
                shutter_opened: opened.clone(),
            };
            (camera, opened)
        }
    }

    impl Camera for FakeCamera {
        fn request_access(&self) -> CameraAccess {
            self.access
        }

        fn confirm_shot(&self) -> bool {
            self.shutter_opened.fetch_add(1, Ordering::SeqCst);
            self.confirm
        }

        fn capture_jpeg(&self) -> Result<Vec<u8>, String> {
            self.frame.clone()
        }
    }

    #[tokio::test]
    async fn test_denied_never_opens_capture() {
        let dir = tempfile::tempdir().unwrap();
        let (camera, opened) = FakeCamera::new(CameraAccess::Denied);

        let result = capture_from_camera(camera, PhotoStore::new(dir.path().to_path_buf())).await;

        assert_eq!(result, Err(AcquireError::PermissionDenied));
        assert_eq!(opened.load(Ordering::SeqCst), 0);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_capture_saves_jpeg_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let (camera, _) = FakeCamera::new(CameraAccess::Granted);

        let image = capture_from_camera(camera, PhotoStore::new(dir.path().join("flora")))
            .await
            .unwrap();

        assert_eq!(image.extension, "jpg");
        assert!(image.location.starts_with(dir.path().join("flora")));
        assert_eq!(fs::read(&image.location).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
    }

    #[tokio::test]
    async fn test_shutter_dismissed_is_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let (mut camera, opened) = FakeCamera::new(CameraAccess::Granted);
        camera.confirm = false;

        let result = capture_from_camera(camera, PhotoStore::new(dir.path().to_path_buf())).await;

        assert_eq!(result, Err(AcquireError::Cancelled(Source::Camera)));
        assert_eq!(opened.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_device_error_is_failed_with_message() {
        let dir = tempfile::tempdir().unwrap();
        let (mut camera, _) = FakeCamera::new(CameraAccess::Granted);
        camera.frame = Err("Device or resource busy".to_string());

        let result = capture_from_camera(camera, PhotoStore::new(dir.path().to_path_buf())).await;

        assert_eq!(
            result,
            Err(AcquireError::Failed("Device or resource busy".to_string()))
        );
    }
}
