//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use imagehub_core::types::pagination::PageResponse;
use imagehub_entity::image::Image;
use imagehub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Total item count.
    pub total: u64,
    /// Current page.
    pub page: u64,
    /// Items per page.
    pub per_page: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Converts a repository page, mapping each item.
    pub fn from_page<U: Serialize>(page: PageResponse<U>, f: impl FnMut(U) -> T) -> Self {
        Self {
            total: page.total_items,
            page: page.page,
            per_page: page.page_size,
            total_pages: page.total_pages,
            items: page.items.into_iter().map(f).collect(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Access token expiration.
    pub expires_at: DateTime<Utc>,
    /// Seconds until expiration.
    pub expires_in: i64,
    /// User info.
    pub user: UserResponse,
}

/// Public view of an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Image ID.
    pub id: Uuid,
    /// Owning user.
    pub owner_id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Client-supplied file name.
    pub original_filename: String,
    /// Detected MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Where to fetch the bytes.
    pub file_url: String,
    /// Uploaded at.
    pub created_at: DateTime<Utc>,
    /// Last modified at.
    pub updated_at: DateTime<Utc>,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        Self {
            file_url: format!("/api/images/{}/file", image.id),
            id: image.id,
            owner_id: image.owner_id,
            title: image.title,
            description: image.description,
            original_filename: image.original_filename,
            mime_type: image.mime_type,
            size_bytes: image.size_bytes,
            width: image.width,
            height: image.height,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime.
    pub uptime_seconds: u64,
    /// Database status.
    pub database: ComponentHealth,
    /// Storage status.
    pub storage: ComponentHealth,
}

/// Reachability of one backing service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name.
    pub component: String,
    /// `up` or `down`.
    pub status: String,
}
