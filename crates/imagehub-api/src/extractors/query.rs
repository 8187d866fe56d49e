//! Query string extractor whose rejections use the API error body.

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use imagehub_core::error::AppError;

use crate::error::ApiError;

/// Like [`axum::extract::Query`], but bad parameters become `VALIDATION_ERROR` responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_error(rejection).into()),
        }
    }
}

fn rejection_error(rejection: QueryRejection) -> AppError {
    AppError::validation(format!("Invalid query string: {}", rejection.body_text()))
}
