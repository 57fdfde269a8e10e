/// Camera permission gate
///
/// On the desktop the permission broker is the device node itself: access is
/// granted when the process can open the camera for reading and writing.
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraAccess {
    Granted,
    Denied,
}

impl CameraAccess {
    pub fn is_granted(self) -> bool {
        self == CameraAccess::Granted
    }
}

/// Probe the camera device node
///
/// Blocks while the device is opened. Only a successful open counts as
/// granted; a missing or busy device is treated like a refusal.
pub fn probe_device(device: &Path) -> CameraAccess {
    match OpenOptions::new().read(true).write(true).open(device) {
        Ok(_) => {
            debug!(device = %device.display(), "Camera access granted");
            CameraAccess::Granted
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            warn!(device = %device.display(), "Camera access refused by the system");
            CameraAccess::Denied
        }
        Err(e) => {
            warn!(device = %device.display(), error = %e, "Camera not available");
            CameraAccess::Denied
        }
    }
}
