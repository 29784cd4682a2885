//! JSON object body that does not insist on a `Content-Type` header.
//!
//! Anything that is not a JSON object (unparsable text, an empty body, an array,
//! a bare string) is rejected as `invalid_body_format` before any validation runs.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

#[derive(Clone, Debug)]
pub struct JsonBody(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Http {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        parse_object(&bytes).map(JsonBody)
    }
}

pub fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::InvalidBody("body must be a JSON object".into())),
        Err(e) => Err(AppError::InvalidBody(e.to_string())),
    }
}
