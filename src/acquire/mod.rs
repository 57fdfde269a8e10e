/// Image acquisition module
///
/// This module handles:
/// - Camera permission checks (permission.rs)
/// - Picking a photo from disk with the native dialog (library.rs)
/// - Taking a photo with the camera and saving it (camera.rs)
///
/// Both sources produce a `SelectedImage` or an `AcquireError`.

pub mod camera;
pub mod library;
pub mod permission;
#[cfg(target_os = "linux")]
pub mod v4l2;

use thiserror::Error;

use crate::config::Config;
use crate::ui::alert::Alert;

/// Which control started the acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Library,
    Camera,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquireError {
    #[error("Camera access denied")]
    PermissionDenied,

    #[error("Acquisition cancelled ({0:?})")]
    Cancelled(Source),

    #[error("Acquisition failed: {0}")]
    Failed(String),
}

impl AcquireError {
    /// What the user is told
    pub fn alert(&self) -> Alert {
        match self {
            AcquireError::PermissionDenied => {
                Alert::error("Permiso denegado", "No se pudo obtener acceso a la cámara")
            }
            AcquireError::Cancelled(Source::Library) => {
                Alert::error("Error", "No se seleccionó ninguna imagen")
            }
            AcquireError::Cancelled(Source::Camera) => {
                Alert::info("Cancelado", "La cámara fue cancelada")
            }
            AcquireError::Failed(message) if message.is_empty() => {
                Alert::error("Error", "Error desconocido")
            }
            AcquireError::Failed(message) => Alert::error("Error", message.clone()),
        }
    }
}

/// The camera used by "Tomar Foto"
#[cfg(target_os = "linux")]
pub fn default_camera(config: &Config) -> v4l2::V4l2Camera {
    v4l2::V4l2Camera::new(config.camera_device.clone(), config.warmup_frames)
}

#[cfg(not(target_os = "linux"))]
pub fn default_camera(_config: &Config) -> camera::NoCamera {
    camera::NoCamera
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_alert_carries_platform_message() {
        let alert = AcquireError::Failed("Device busy".to_string()).alert();
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.body, "Device busy");

        let alert = AcquireError::Failed(String::new()).alert();
        assert_eq!(alert.body, "Error desconocido");
    }

    #[test]
    fn test_cancel_alert_depends_on_source() {
        assert_eq!(
            AcquireError::Cancelled(Source::Library).alert().body,
            "No se seleccionó ninguna imagen"
        );
        assert_eq!(
            AcquireError::Cancelled(Source::Camera).alert().title,
            "Cancelado"
        );
    }
}
