/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the acquisition sources, the inference client and the UI layer.

use std::path::{Path, PathBuf};

/// An image chosen from the library or captured with the camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// Where the image lives on disk
    pub location: PathBuf,
    /// Text after the last '.' of the file name, as found (case preserved)
    pub extension: String,
}

impl SelectedImage {
    /// Build from a file location, inferring the extension from its name
    pub fn from_path(location: impl Into<PathBuf>) -> Self {
        let location = location.into();
        let extension = infer_extension(&location);
        Self { location, extension }
    }

    /// MIME type sent with the upload, e.g. "image/png"
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.extension)
    }

    /// File name used for the multipart part, e.g. "flower.png"
    pub fn upload_name(&self) -> String {
        format!("flower.{}", self.extension)
    }
}

fn infer_extension(location: &Path) -> String {
    location
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
        .unwrap_or_default()
}

/// One species guess returned by the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionItem {
    /// Species name (wire field `class`)
    pub label: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl PredictionItem {
    /// Display line, e.g. "Rose: 0.97"
    pub fn display_line(&self) -> String {
        format!("{}: {:.2}", self.label, self.confidence)
    }
}

/// Everything one inference call produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBundle {
    pub predictions: Vec<PredictionItem>,
    pub recommendation: Option<String>,
    pub details: Option<String>,
}

impl ResultBundle {
    /// True when no inference result is held
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty() && self.recommendation.is_none() && self.details.is_none()
    }
}
