//! Router assembly.

pub mod common;
pub mod programmer;

pub use common::common_routes;
pub use programmer::programmer_routes;

use crate::middleware::{panic_response, problem_boundary, route_not_found};
use crate::problem::ProblemSettings;
use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: common routes, `/api` resources, and the problem boundary.
pub fn app(state: AppState) -> Router {
    let settings = state.problems.clone();
    let router = Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", programmer_routes(state));
    with_problem_boundary(router, settings)
}

/// Wrap `router` so every error it produces, including unmatched routes and
/// panics, is served as `application/problem+json`.
pub fn with_problem_boundary(router: Router, settings: ProblemSettings) -> Router {
    router.fallback(route_not_found).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(axum::middleware::from_fn_with_state(settings, problem_boundary))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)),
    )
}
