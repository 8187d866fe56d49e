//! Image repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use imagehub_core::error::{AppError, ErrorKind};
use imagehub_core::result::AppResult;
use imagehub_core::types::pagination::{PageRequest, PageResponse};
use imagehub_entity::image::{CreateImage, Image, UpdateImage};

/// Persistence operations for image metadata.
#[async_trait]
pub trait ImageRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Find an image by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>>;

    /// List an owner's images, newest first.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Image>>;

    /// Insert a new image record.
    async fn create(&self, data: &CreateImage) -> AppResult<Image>;

    /// Apply an update and return the new row.
    async fn update(&self, id: Uuid, data: &UpdateImage) -> AppResult<Image>;

    /// Delete an image record. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// PostgreSQL-backed [`ImageRepository`].
#[derive(Debug, Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    /// Create a new image repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>> {
        sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find image", e))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Image>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count images", e))?;

        let images = sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list images", e))?;

        Ok(PageResponse::new(
            images,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &CreateImage) -> AppResult<Image> {
        sqlx::query_as::<_, Image>(
            "INSERT INTO images (id, owner_id, title, description, original_filename, \
                                 storage_path, mime_type, size_bytes, width, height) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(data.id)
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.original_filename)
        .bind(&data.storage_path)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(data.width)
        .bind(data.height)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create image", e))
    }

    async fn update(&self, id: Uuid, data: &UpdateImage) -> AppResult<Image> {
        let file = data.file.as_ref();
        sqlx::query_as::<_, Image>(
            "UPDATE images SET title = COALESCE($2, title), \
                               description = CASE WHEN $3 THEN $4 ELSE description END, \
                               original_filename = COALESCE($5, original_filename), \
                               storage_path = COALESCE($6, storage_path), \
                               mime_type = COALESCE($7, mime_type), \
                               size_bytes = COALESCE($8, size_bytes), \
                               width = COALESCE($9, width), \
                               height = COALESCE($10, height), \
                               updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(data.description.is_some())
        .bind(data.description.clone().flatten())
        .bind(file.map(|f| f.original_filename.clone()))
        .bind(file.map(|f| f.storage_path.clone()))
        .bind(file.map(|f| f.mime_type.clone()))
        .bind(file.map(|f| f.size_bytes))
        .bind(file.map(|f| f.width))
        .bind(file.map(|f| f.height))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update image", e))?
        .ok_or_else(|| AppError::not_found(format!("Image {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete image", e))?;
        Ok(result.rows_affected() > 0)
    }
}
