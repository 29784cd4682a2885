//! Programmer persistence. Handlers only see [`ProgrammerStore`]; PostgreSQL backs it
//! in production and [`MemoryStore`] when no database is configured.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_schema, PgProgrammerStore};

use crate::error::AppError;
use crate::model::{NewProgrammer, Programmer, User};
use async_trait::async_trait;

#[async_trait]
pub trait ProgrammerStore: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<Programmer>, AppError>;

    /// All programmers in the order they were created.
    async fn list(&self) -> Result<Vec<Programmer>, AppError>;

    /// Insert a programmer. A taken nickname is a validation error on `nickname`.
    async fn insert(&self, programmer: NewProgrammer) -> Result<Programmer, AppError>;

    /// Persist the writable fields of an existing programmer.
    async fn save(&self, programmer: &Programmer) -> Result<Programmer, AppError>;

    /// Returns whether a row was removed.
    async fn delete_by_nickname(&self, nickname: &str) -> Result<bool, AppError>;

    /// Cheap round trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn nickname_taken() -> AppError {
    let mut errors = crate::validation::FieldErrors::new();
    errors.insert(
        "nickname".into(),
        vec![crate::validation::NICKNAME_TAKEN.to_string()],
    );
    AppError::Validation(errors)
}
