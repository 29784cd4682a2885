//! Shared application state for all routes.

use crate::config::DEFAULT_OWNER;
use crate::problem::ProblemSettings;
use crate::store::{MemoryStore, ProgrammerStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProgrammerStore>,
    /// Username that new programmers are assigned to.
    pub owner: String,
    pub problems: ProblemSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn ProgrammerStore>, owner: impl Into<String>, problems: ProblemSettings) -> Self {
        AppState {
            store,
            owner: owner.into(),
            problems,
        }
    }

    /// Memory-backed state with the default owner seeded.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::with_user(DEFAULT_OWNER)),
            DEFAULT_OWNER,
            ProblemSettings::default(),
        )
    }
}
