/// Remote flower classification
///
/// - `client.rs` - multipart upload to the `/predict` endpoint
/// - `response.rs` - typed response schema and folding into a `ResultBundle`

pub mod client;
pub mod response;

pub use client::InferenceClient;
pub use response::Prediction;

use thiserror::Error;

use crate::state::data::SelectedImage;
use crate::ui::alert::Alert;

/// Extensions the server accepts, compared case-insensitively
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("No image selected")]
    NoImage,

    #[error("Unsupported image extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered with status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl InferenceError {
    /// What the user is told
    pub fn alert(&self) -> Alert {
        match self {
            InferenceError::NoImage => Alert::error("Error", "Primero selecciona una imagen"),
            InferenceError::UnsupportedExtension(_) => {
                Alert::error("Error", "Solo se permiten imágenes JPG, JPEG o PNG")
            }
            _ => Alert::error("Error", "Hubo un problema con la predicción"),
        }
    }
}

/// Reject images the server would refuse, before any network activity
pub fn validate(image: &SelectedImage) -> Result<(), InferenceError> {
    let supported = SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(&image.extension));

    if supported {
        Ok(())
    } else {
        Err(InferenceError::UnsupportedExtension(image.extension.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions_any_case() {
        for name in ["a.jpg", "a.JPG", "a.jpeg", "a.JpEg", "a.png", "a.PNG"] {
            assert!(validate(&SelectedImage::from_path(name)).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_unsupported_extensions_rejected() {
        for name in ["a.gif", "a.webp", "a.heic", "a", "a.jpg.bak"] {
            let err = validate(&SelectedImage::from_path(name)).unwrap_err();
            assert!(matches!(err, InferenceError::UnsupportedExtension(_)), "{}", name);
        }
    }

    #[test]
    fn test_unsupported_alert_message() {
        let err = validate(&SelectedImage::from_path("photo.gif")).unwrap_err();
        assert_eq!(err.alert().body, "Solo se permiten imágenes JPG, JPEG o PNG");
    }

    #[test]
    fn test_transport_failures_share_generic_alert() {
        let alert = InferenceError::Status(500).alert();
        assert_eq!(alert.body, "Hubo un problema con la predicción");
    }
}
