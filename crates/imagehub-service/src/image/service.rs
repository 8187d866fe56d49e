//! Per-user image management.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info, warn};
use uuid::Uuid;

use imagehub_core::config::StorageConfig;
use imagehub_core::error::{AppError, ErrorKind};
use imagehub_core::traits::storage::{ByteStream, StorageProvider};
use imagehub_core::types::pagination::{PageRequest, PageResponse};
use imagehub_database::repositories::ImageRepository;
use imagehub_entity::image::{CreateImage, Image, ImageFileUpdate, UpdateImage};

use super::inspect::{ImageInfo, inspect_image, sanitize_filename};
use crate::context::RequestContext;

/// Maximum title length, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;
/// Maximum description length, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied file name, if any.
    pub file_name: Option<String>,
    /// Raw file content.
    pub data: Bytes,
}

/// Parameters for a new upload.
#[derive(Debug, Clone)]
pub struct UploadImageParams {
    /// The image file.
    pub file: ImageUpload,
    /// Title; defaults to the file name.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

/// Parameters for updating an image. At least one field must be set.
#[derive(Debug, Clone, Default)]
pub struct UpdateImageParams {
    /// Replacement file.
    pub file: Option<ImageUpload>,
    /// New title.
    pub title: Option<String>,
    /// New description; an empty string clears it.
    pub description: Option<String>,
}

/// An image row together with its content stream.
pub struct ImageContent {
    /// Image metadata.
    pub image: Image,
    /// The stored bytes.
    pub stream: ByteStream,
}

/// A validated upload ready to be written to storage.
struct PreparedFile {
    original_filename: String,
    info: ImageInfo,
    data: Bytes,
}

/// Orchestrates image metadata and stored files for the owning user.
#[derive(Debug, Clone)]
pub struct ImageService {
    image_repo: Arc<dyn ImageRepository>,
    storage: Arc<dyn StorageProvider>,
    config: StorageConfig,
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(
        image_repo: Arc<dyn ImageRepository>,
        storage: Arc<dyn StorageProvider>,
        config: StorageConfig,
    ) -> Self {
        Self {
            image_repo,
            storage,
            config,
        }
    }

    /// Lists the caller's images, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Image>, AppError> {
        self.image_repo.list_by_owner(ctx.user_id, &page).await
    }

    /// Gets one of the caller's images.
    pub async fn get(&self, ctx: &RequestContext, image_id: Uuid) -> Result<Image, AppError> {
        let image = self
            .image_repo
            .find_by_id(image_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Image {image_id} not found")))?;

        if !image.is_owned_by(ctx.user_id) {
            warn!(user_id = %ctx.user_id, image_id = %image_id, "Access to another user's image denied");
            return Err(AppError::authorization(
                "You do not have access to this image",
            ));
        }
        Ok(image)
    }

    /// Opens the stored file of one of the caller's images.
    pub async fn content(
        &self,
        ctx: &RequestContext,
        image_id: Uuid,
    ) -> Result<ImageContent, AppError> {
        let image = self.get(ctx, image_id).await?;
        let stream = self.storage.read(&image.storage_path).await.map_err(|e| {
            if e.kind == ErrorKind::NotFound {
                error!(image_id = %image_id, path = %image.storage_path, "Stored file is missing");
                AppError::not_found(format!("File for image {image_id} is missing"))
            } else {
                e
            }
        })?;
        Ok(ImageContent { image, stream })
    }

    /// Stores a new image for the caller.
    ///
    /// The file is written before the row is inserted and removed again if
    /// the insert fails.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        params: UploadImageParams,
    ) -> Result<Image, AppError> {
        let prepared = self.prepare_file(params.file)?;
        let title = match params.title {
            Some(title) => normalize_title(&title)?,
            None => default_title(&prepared.original_filename),
        };
        let description = normalize_description(params.description.as_deref())?;

        let image_id = Uuid::new_v4();
        let storage_path =
            Image::storage_path_for(ctx.user_id, image_id, prepared.info.extension);
        let (width, height) = dimensions(&prepared.info)?;
        let size_bytes = prepared.data.len() as i64;

        self.storage.write(&storage_path, prepared.data).await?;

        let record = CreateImage {
            id: image_id,
            owner_id: ctx.user_id,
            title,
            description,
            original_filename: prepared.original_filename,
            storage_path: storage_path.clone(),
            mime_type: prepared.info.mime_type.to_string(),
            size_bytes,
            width,
            height,
        };

        let image = match self.image_repo.create(&record).await {
            Ok(image) => image,
            Err(e) => {
                self.discard_file(&storage_path).await;
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            image_id = %image.id,
            mime_type = %image.mime_type,
            size = image.size_bytes,
            "Image uploaded"
        );
        Ok(image)
    }

    /// Updates metadata and optionally replaces the file of one of the
    /// caller's images.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        image_id: Uuid,
        params: UpdateImageParams,
    ) -> Result<Image, AppError> {
        if params.file.is_none() && params.title.is_none() && params.description.is_none() {
            return Err(AppError::validation(
                "Provide at least one of file, title, or description",
            ));
        }

        let existing = self.get(ctx, image_id).await?;

        let mut update = UpdateImage {
            title: params.title.as_deref().map(normalize_title).transpose()?,
            description: params
                .description
                .as_deref()
                .map(|d| normalize_description(Some(d)))
                .transpose()?,
            file: None,
        };

        let mut new_path = None;
        if let Some(file) = params.file {
            let prepared = self.prepare_file(file)?;
            let (width, height) = dimensions(&prepared.info)?;
            let storage_path =
                Image::storage_path_for(ctx.user_id, Uuid::new_v4(), prepared.info.extension);
            let size_bytes = prepared.data.len() as i64;

            self.storage.write(&storage_path, prepared.data).await?;
            new_path = Some(storage_path.clone());

            update.file = Some(ImageFileUpdate {
                original_filename: prepared.original_filename,
                storage_path,
                mime_type: prepared.info.mime_type.to_string(),
                size_bytes,
                width,
                height,
            });
        }

        let image = match self.image_repo.update(image_id, &update).await {
            Ok(image) => image,
            Err(e) => {
                if let Some(path) = &new_path {
                    self.discard_file(path).await;
                }
                return Err(e);
            }
        };

        if new_path.is_some() {
            self.discard_file(&existing.storage_path).await;
        }

        info!(
            user_id = %ctx.user_id,
            image_id = %image.id,
            file_replaced = new_path.is_some(),
            "Image updated"
        );
        Ok(image)
    }

    /// Deletes one of the caller's images and its stored file.
    pub async fn delete(&self, ctx: &RequestContext, image_id: Uuid) -> Result<(), AppError> {
        let image = self.get(ctx, image_id).await?;

        if !self.image_repo.delete(image.id).await? {
            return Err(AppError::not_found(format!("Image {image_id} not found")));
        }
        self.discard_file(&image.storage_path).await;

        info!(user_id = %ctx.user_id, image_id = %image_id, "Image deleted");
        Ok(())
    }

    /// Check size limits and detect the image format.
    fn prepare_file(&self, file: ImageUpload) -> Result<PreparedFile, AppError> {
        if file.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if file.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        let info = inspect_image(&file.data)?;
        if !self.config.is_allowed(info.mime_type) {
            return Err(AppError::validation("Unsupported image format"));
        }

        let original_filename = file
            .file_name
            .as_deref()
            .and_then(sanitize_filename)
            .unwrap_or_else(|| format!("image.{}", info.extension));

        Ok(PreparedFile {
            original_filename,
            info,
            data: file.data,
        })
    }

    /// Remove a stored file, logging instead of failing.
    async fn discard_file(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            warn!(path, error = %e, "Failed to remove stored file");
        }
    }
}

fn dimensions(info: &ImageInfo) -> Result<(i32, i32), AppError> {
    match (i32::try_from(info.width), i32::try_from(info.height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(AppError::validation("Image dimensions are too large")),
    }
}

fn normalize_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
        return Err(AppError::validation(format!(
            "Title must be between 1 and {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(title.to_string())
}

fn default_title(original_filename: &str) -> String {
    original_filename.chars().take(MAX_TITLE_LENGTH).collect()
}

/// Blank descriptions become `None`.
fn normalize_description(description: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(AppError::validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(Some(description.to_string()))
}
