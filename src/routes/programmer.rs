//! Programmer resource routes, mounted under `/api`.

use crate::handlers::programmer::{create, delete, list, show, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn programmer_routes(state: AppState) -> Router {
    Router::new()
        .route("/programmers", get(list).post(create))
        .route(
            "/programmers/:nickname",
            get(show).put(update).patch(update).delete(delete),
        )
        .with_state(state)
}
