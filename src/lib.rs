//! Programmer API: CRUD over programmers with `application/problem+json` errors.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod problem;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{Programmer, ProgrammerRepresentation, User};
pub use problem::{ApiProblem, ProblemSettings, ProblemType, PROBLEM_JSON};
pub use routes::{app, common_routes, programmer_routes, with_problem_boundary};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, MemoryStore, PgProgrammerStore, ProgrammerStore};
