//! Image CRUD, upload, and content handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;

use imagehub_core::error::AppError;
use imagehub_service::image::{ImageUpload, UpdateImageParams, UploadImageParams};

use crate::dto::response::{ApiResponse, ImageResponse, MessageResponse, PaginatedResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiQuery, AuthUser, PaginationParams, parse_uuid};
use crate::state::AppState;

/// Fields collected from an image multipart form.
#[derive(Debug, Default)]
struct ImageForm {
    file: Option<ImageUpload>,
    title: Option<String>,
    description: Option<String>,
}

/// Read the `file`, `title`, and `description` parts. Unknown parts are skipped.
async fn read_image_form(mut multipart: Multipart) -> ApiResult<ImageForm> {
    let mut form = ImageForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                if form.file.is_some() {
                    return Err(AppError::validation("Only one file may be uploaded").into());
                }
                let file_name = field.file_name().map(String::from);
                let data = field.bytes().await?;
                form.file = Some(ImageUpload { file_name, data });
            }
            "title" => {
                let text = field.text().await?;
                form.title = Some(text).filter(|t| !t.trim().is_empty());
            }
            "description" => {
                form.description = Some(field.text().await?);
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// GET /api/images?page=&per_page=
pub async fn list_images(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> ApiResult<Json<ApiResponse<PaginatedResponse<ImageResponse>>>> {
    let page = state
        .image_service
        .list(&auth, params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(
        page,
        ImageResponse::from,
    ))))
}

/// GET /api/images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<ImageResponse>>> {
    let image_id = parse_uuid(&id)?;
    let image = state.image_service.get(&auth, image_id).await?;
    Ok(Json(ApiResponse::ok(image.into())))
}

/// GET /api/images/{id}/file
pub async fn get_image_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let image_id = parse_uuid(&id)?;
    let content = state.image_service.content(&auth, image_id).await?;

    let content_type = HeaderValue::from_str(&content.image.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            inline_disposition(&content.image.original_filename),
        )
        .header(header::CACHE_CONTROL, "private, max-age=300")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Body::from_stream(content.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// POST /api/images (multipart: file, title?, description?)
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<ImageResponse>>)> {
    let form = read_image_form(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::validation("A file field is required"))?;

    let image = state
        .image_service
        .upload(
            &auth,
            UploadImageParams {
                file,
                title: form.title,
                description: form.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(image.into()))))
}

/// PUT /api/images/{id} (multipart: file?, title?, description?)
pub async fn update_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> ApiResult<Json<ApiResponse<ImageResponse>>> {
    let image_id = parse_uuid(&id)?;
    let form = read_image_form(multipart).await?;

    let image = state
        .image_service
        .update(
            &auth,
            image_id,
            UpdateImageParams {
                file: form.file,
                title: form.title,
                description: form.description,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(image.into())))
}

/// DELETE /api/images/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    let image_id = parse_uuid(&id)?;
    state.image_service.delete(&auth, image_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Image deleted".to_string(),
    })))
}

/// `inline` disposition with an ASCII-safe file name.
fn inline_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("inline; filename=\"{safe}\"")
}
