//! Programmer CRUD handlers: create, show, list, update (PUT/PATCH), delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{NewProgrammer, Programmer, ProgrammerCollection, ProgrammerRepresentation};
use crate::response::{created, ok};
use crate::state::AppState;
use crate::validation::{Submission, SubmitMode, NICKNAME_TAKEN};
use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
};

/// Canonical read URL of a programmer.
pub fn programmer_url(nickname: &str) -> String {
    format!("/api/programmers/{}", urlencoding::encode(nickname))
}

async fn find_or_404(state: &AppState, nickname: &str) -> Result<Programmer, AppError> {
    state
        .store
        .find_by_nickname(nickname)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No programmer found with nickname \"{}\"", nickname)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let mut submission = Submission::bind(&body, SubmitMode::Create);
    let taken = match submission.nickname() {
        Some(nickname) => state.store.find_by_nickname(nickname).await?.is_some(),
        None => false,
    };
    if taken {
        submission.add_error("nickname", NICKNAME_TAKEN);
    }
    let (nickname, changes) = submission.into_create()?;

    let owner = state
        .store
        .find_user_by_username(&state.owner)
        .await?
        .ok_or_else(|| AppError::Internal(format!("owner user '{}' does not exist", state.owner)))?;

    let programmer = state
        .store
        .insert(NewProgrammer::new(nickname, changes, &owner))
        .await?;
    tracing::info!(nickname = %programmer.nickname, "programmer created");

    created(
        &programmer_url(&programmer.nickname),
        ProgrammerRepresentation::from(&programmer),
    )
}

pub async fn show(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let programmer = find_or_404(&state, &nickname).await?;
    Ok(ok(ProgrammerRepresentation::from(&programmer)))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let programmers = state.store.list().await?;
    Ok(ok(ProgrammerCollection {
        programmers: programmers.iter().map(ProgrammerRepresentation::from).collect(),
    }))
}

/// PUT resets fields missing from the body, PATCH leaves them alone. The
/// nickname never changes.
pub async fn update(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    method: Method,
    body: Result<JsonBody, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let mut programmer = find_or_404(&state, &nickname).await?;
    let JsonBody(body) = body?;

    let mode = if method == Method::PATCH {
        SubmitMode::Patch
    } else {
        SubmitMode::Replace
    };
    let changes = Submission::bind(&body, mode).into_changes()?;
    programmer.apply(changes);

    let saved = state.store.save(&programmer).await?;
    tracing::info!(nickname = %saved.nickname, method = %method, "programmer updated");
    Ok(ok(ProgrammerRepresentation::from(&saved)))
}

/// Always 204, whether or not the programmer existed.
pub async fn delete(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.store.delete_by_nickname(&nickname).await? {
        tracing::info!(nickname = %nickname, "programmer deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
