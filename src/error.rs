//! Typed errors and HTTP mapping.

use crate::problem::{ApiProblem, InternalMessage, ProblemType};
use crate::validation::FieldErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(FieldErrors),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("{message}")]
    Http { status: StatusCode, message: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::Http { status, .. } => *status,
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Problem for this error as the client sees it. Messages of errors without a
    /// natural HTTP status never appear here.
    pub fn to_problem(&self) -> ApiProblem {
        match self {
            AppError::Validation(errors) => {
                ApiProblem::with_type(StatusCode::BAD_REQUEST, ProblemType::ValidationError)
                    .with("errors", serde_json::to_value(errors).unwrap_or_default())
            }
            AppError::InvalidBody(_) => {
                ApiProblem::with_type(StatusCode::BAD_REQUEST, ProblemType::InvalidRequestBodyFormat)
            }
            AppError::NotFound(message) => ApiProblem::new(StatusCode::NOT_FOUND).with("detail", message.as_str()),
            AppError::Http { status, message } => {
                let problem = ApiProblem::new(*status);
                if message.is_empty() {
                    problem
                } else {
                    problem.with("detail", message.as_str())
                }
            }
            AppError::Config(_) | AppError::Db(_) | AppError::Internal(_) => {
                ApiProblem::new(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::InvalidBody(ref reason) = self {
            tracing::debug!(reason = %reason, "rejected request body");
        }
        let mut response = self.to_problem().into_response();
        if self.status().is_server_error() {
            response
                .extensions_mut()
                .insert(InternalMessage(self.to_string()));
        }
        response
    }
}
