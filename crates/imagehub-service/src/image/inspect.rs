//! Content sniffing for uploaded images.

use std::io::Cursor;

use ::image::{ImageFormat, ImageReader};
use tracing::debug;

use imagehub_core::error::{AppError, ErrorKind};

/// Maximum stored length of a client-supplied file name, in characters.
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Facts about an uploaded image derived from its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Canonical MIME type.
    pub mime_type: &'static str,
    /// Extension used for the storage path.
    pub extension: &'static str,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Detect the format from the content and read the dimensions from the header.
///
/// Only PNG, JPEG, GIF, and WebP are recognized.
pub fn inspect_image(data: &[u8]) -> Result<ImageInfo, AppError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to read image", e))?;

    let (mime_type, extension) = match reader.format() {
        Some(ImageFormat::Png) => ("image/png", "png"),
        Some(ImageFormat::Jpeg) => ("image/jpeg", "jpg"),
        Some(ImageFormat::Gif) => ("image/gif", "gif"),
        Some(ImageFormat::WebP) => ("image/webp", "webp"),
        other => {
            debug!(format = ?other, "Rejected upload with unsupported format");
            return Err(AppError::validation("Unsupported image format"));
        }
    };

    let (width, height) = reader.into_dimensions().map_err(|e| {
        debug!(error = %e, mime_type, "Failed to read image dimensions");
        AppError::validation("Image data is corrupt or truncated")
    })?;

    Ok(ImageInfo {
        mime_type,
        extension,
        width,
        height,
    })
}

/// Reduce a client-supplied file name to a safe display name.
///
/// Directory components and control characters are dropped. Returns `None`
/// when nothing usable remains.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| !c.is_control())
        .take(MAX_FILENAME_LENGTH)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        None
    } else {
        Some(cleaned.to_string())
    }
}
