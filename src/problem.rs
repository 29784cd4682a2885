//! `application/problem+json` payloads.
//!
//! An [`ApiProblem`] always has a status, a type and a title. The type is either
//! `about:blank` (title is the status reason phrase) or one of the registered
//! [`ProblemType`]s, each of which owns its title. Everything else (`detail`,
//! `errors`, ...) goes into the extra data map.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

pub const PROBLEM_JSON: &str = "application/problem+json";

const BLANK_TYPE: &str = "about:blank";

/// Registered problem types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProblemType {
    ValidationError,
    InvalidRequestBodyFormat,
}

impl ProblemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemType::ValidationError => "validation_error",
            ProblemType::InvalidRequestBodyFormat => "invalid_body_format",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ProblemType::ValidationError => "There was a validation error",
            ProblemType::InvalidRequestBodyFormat => "Invalid JSON format sent",
        }
    }
}

/// How problems are rendered for this deployment.
#[derive(Clone, Debug, Default)]
pub struct ProblemSettings {
    /// Expose messages of internal errors as `detail`.
    pub debug: bool,
    /// When set, registered types render as `<base>#<type>`.
    pub type_base_url: Option<String>,
}

/// Message of an internal error, kept out of the body and attached to the
/// response so the boundary can decide whether to expose it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalMessage(pub String);

#[derive(Clone, Debug, PartialEq)]
pub struct ApiProblem {
    status: StatusCode,
    problem_type: Option<ProblemType>,
    title: String,
    extra: Map<String, Value>,
}

impl ApiProblem {
    /// `about:blank` problem titled with the status reason phrase.
    pub fn new(status: StatusCode) -> Self {
        ApiProblem {
            status,
            problem_type: None,
            title: status
                .canonical_reason()
                .unwrap_or("Unknown status code")
                .to_string(),
            extra: Map::new(),
        }
    }

    pub fn with_type(status: StatusCode, problem_type: ProblemType) -> Self {
        ApiProblem {
            status,
            problem_type: Some(problem_type),
            title: problem_type.title().to_string(),
            extra: Map::new(),
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn problem_type(&self) -> Option<ProblemType> {
        self.problem_type
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn type_uri(&self, type_base_url: Option<&str>) -> String {
        match (self.problem_type, type_base_url) {
            (None, _) => BLANK_TYPE.to_string(),
            (Some(t), Some(base)) => format!("{}#{}", base.trim_end_matches('#'), t.as_str()),
            (Some(t), None) => t.as_str().to_string(),
        }
    }

    /// JSON body: extra data overlaid with `status`, `type` and `title`.
    pub fn to_value(&self, type_base_url: Option<&str>) -> Value {
        let mut body = self.extra.clone();
        body.insert("status".into(), Value::from(self.status.as_u16()));
        body.insert("type".into(), Value::from(self.type_uri(type_base_url)));
        body.insert("title".into(), Value::from(self.title.clone()));
        Value::Object(body)
    }

    pub fn render(self, settings: &ProblemSettings) -> Response {
        let body = self.to_value(settings.type_base_url.as_deref());
        let mut response = (self.status, Json(body)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        self.render(&ProblemSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_problem_uses_reason_phrase() {
        let problem = ApiProblem::new(StatusCode::NOT_FOUND);
        assert_eq!(problem.title(), "Not Found");
        assert_eq!(problem.type_uri(None), "about:blank");
    }

    #[test]
    fn unknown_status_gets_fallback_title() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(ApiProblem::new(status).title(), "Unknown status code");
    }

    #[test]
    fn registered_type_brings_its_title() {
        let problem = ApiProblem::with_type(StatusCode::BAD_REQUEST, ProblemType::InvalidRequestBodyFormat);
        assert_eq!(problem.title(), "Invalid JSON format sent");
        assert_eq!(problem.type_uri(None), "invalid_body_format");
    }

    #[test]
    fn core_fields_override_extra_data() {
        let problem = ApiProblem::new(StatusCode::CONFLICT)
            .with("status", 200)
            .with("title", "sneaky")
            .with("detail", "already there");
        let body = problem.to_value(None);
        assert_eq!(body["status"], 409);
        assert_eq!(body["title"], "Conflict");
        assert_eq!(body["detail"], "already there");
    }

    #[test]
    fn type_base_url_prefixes_registered_types_only() {
        let base = Some("http://localhost:8000/docs/errors");
        let typed = ApiProblem::with_type(StatusCode::BAD_REQUEST, ProblemType::ValidationError);
        assert_eq!(typed.type_uri(base), "http://localhost:8000/docs/errors#validation_error");
        assert_eq!(ApiProblem::new(StatusCode::BAD_REQUEST).type_uri(base), "about:blank");
    }

    #[test]
    fn response_is_served_as_problem_json() {
        let response = ApiProblem::new(StatusCode::GONE).into_response();
        assert_eq!(response.status(), StatusCode::GONE);
        assert_eq!(response.headers()[header::CONTENT_TYPE], PROBLEM_JSON);
        assert!(response.extensions().get::<ApiProblem>().is_some());
    }
}
