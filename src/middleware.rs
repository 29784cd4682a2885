//! The error boundary: every 4xx/5xx leaving the router becomes a problem envelope.
//!
//! Errors raised by handlers already carry their [`ApiProblem`] in the response
//! extensions and are re-rendered with the deployment's [`ProblemSettings`].
//! Anything else (axum's bare 405, body limit rejections, panics) is wrapped in an
//! `about:blank` problem for its status.

use crate::error::AppError;
use crate::problem::{ApiProblem, InternalMessage, ProblemSettings};
use axum::{
    body::{to_bytes, Body},
    extract::{OriginalUri, Request, State},
    http::{header, Method, Response as HttpResponse, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;

/// Upper bound when reading an error body to reuse it as `detail`.
const MAX_DETAIL_BYTES: usize = 16 * 1024;

pub async fn problem_boundary(
    State(settings): State<ProblemSettings>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let internal = parts.extensions.remove::<InternalMessage>();
    let mut problem = match parts.extensions.remove::<ApiProblem>() {
        Some(problem) => problem,
        None => {
            let text = to_bytes(body, MAX_DETAIL_BYTES)
                .await
                .map(|b| String::from_utf8_lossy(&b).trim().to_string())
                .unwrap_or_default();
            let mut problem = ApiProblem::new(status);
            if !status.is_server_error() && !text.is_empty() {
                problem.set("detail", text);
            }
            problem
        }
    };

    if status.is_server_error() {
        let message = internal.as_ref().map(|m| m.0.as_str()).unwrap_or("");
        tracing::error!(%method, %path, status = status.as_u16(), error = %message, "request failed");
        if settings.debug && !message.is_empty() {
            problem.set("detail", message);
        }
    } else {
        tracing::debug!(%method, %path, status = status.as_u16(), title = %problem.title(), "request rejected");
    }

    let mut rendered = problem.render(&settings);
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rendered.headers_mut().append(name.clone(), value.clone());
        }
    }
    rendered
}

/// Router fallback for paths that match no route. Uses the original URI since
/// nested routers see their prefix stripped.
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::Http {
        status: StatusCode::NOT_FOUND,
        message: format!("No route found for \"{} {}\"", method, uri.path()),
    }
}

/// Response for a panicking handler. The panic payload is kept as the internal
/// message so debug deployments can show it.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> HttpResponse<Body> {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(format!("panic: {}", message)).into_response()
}
