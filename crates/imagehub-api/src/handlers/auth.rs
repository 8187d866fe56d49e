//! Auth handlers: register, login, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use validator::Validate;

use imagehub_service::user::RegisterParams;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(mut req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    req.email = req.email.trim().to_string();
    req.validate()?;

    let user = state
        .user_service
        .register(RegisterParams {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(&user))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    req.validate()?;

    let result = state.user_service.login(&req.email, &req.password).await?;
    let expires_in = (result.token.expires_at - Utc::now()).num_seconds().max(0);

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: result.token.token,
        token_type: "Bearer".to_string(),
        expires_at: result.token.expires_at,
        expires_in,
        user: UserResponse::from(&result.user),
    })))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
