/// Photo library selection through the native file dialog
use rfd::AsyncFileDialog;
use tracing::info;

use super::{AcquireError, Source};
use crate::state::data::SelectedImage;

/// Photo formats offered in the picker
///
/// Wider than what the server accepts; unsupported ones are rejected at
/// prediction time with a clear message.
pub const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "heic", "JPG", "JPEG", "PNG",
];

/// Let the user choose a single photo
pub async fn pick_from_library() -> Result<SelectedImage, AcquireError> {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Seleccionar Imagen")
        .add_filter("Fotos", PHOTO_EXTENSIONS);

    if let Some(pictures) = dirs::picture_dir() {
        dialog = dialog.set_directory(pictures);
    }

    let file = dialog
        .pick_file()
        .await
        .ok_or(AcquireError::Cancelled(Source::Library))?;

    let image = SelectedImage::from_path(file.path());
    info!(path = %image.location.display(), "Picked image from library");
    Ok(image)
}
