//! Success response helpers.

use crate::error::AppError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 201 with `Location` pointing at the new resource.
pub fn created<T: Serialize>(location: &str, data: T) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location)
        .map_err(|e| AppError::Internal(format!("invalid Location header '{}': {}", location, e)))?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(data)).into_response())
}
