//! Image entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An image uploaded by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    /// Unique image identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Title shown in listings.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// File name supplied by the client at upload time.
    pub original_filename: String,
    /// The path within the storage provider.
    pub storage_path: String,
    /// MIME type detected from the content.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// When the image was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the image was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Image {
    /// Check whether the given user owns this image.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    /// Storage path for an image file: `<owner_id>/<file_id>.<ext>`.
    pub fn storage_path_for(owner_id: Uuid, file_id: Uuid, extension: &str) -> String {
        format!("{owner_id}/{file_id}.{extension}")
    }
}

/// Data required to create a new image record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImage {
    /// Pre-generated image ID (matches the storage path).
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Client-supplied file name.
    pub original_filename: String,
    /// The path within the storage provider.
    pub storage_path: String,
    /// Detected MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

/// Replacement file details for an image update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFileUpdate {
    /// Client-supplied file name.
    pub original_filename: String,
    /// New path within the storage provider.
    pub storage_path: String,
    /// Detected MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

/// Data for updating an existing image.
///
/// `None` leaves a field untouched. For `description`, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateImage {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// Replacement file.
    pub file: Option<ImageFileUpdate>,
}

impl UpdateImage {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.file.is_none()
    }

    /// Apply this update to an in-memory image row.
    pub fn apply_to(&self, image: &mut Image) {
        if let Some(title) = &self.title {
            image.title = title.clone();
        }
        if let Some(description) = &self.description {
            image.description = description.clone();
        }
        if let Some(file) = &self.file {
            image.original_filename = file.original_filename.clone();
            image.storage_path = file.storage_path.clone();
            image.mime_type = file.mime_type.clone();
            image.size_bytes = file.size_bytes;
            image.width = file.width;
            image.height = file.height;
        }
        image.updated_at = Utc::now();
    }
}
