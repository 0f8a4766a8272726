//! Location pages and unlock attempts.

use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::{ApiError, pages};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LocationForm {
    /// Password revealed at the previous location
    password: Option<String>,
    /// Completion token, accepted only at the last location
    final_answer: Option<String>,
}

/// Show a location: riddle for the entry point, password prompt otherwise
pub async fn show_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let outcome = state.evaluator.evaluate(&state.registry, &id, None)?;
    let record = state.registry.get(&id)?;

    Ok(Html(pages::location_page(
        record,
        outcome,
        state.evaluator.final_answer_enabled(),
    )))
}

/// Attempt to unlock a location, or submit the final answer
pub async fn submit_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<LocationForm>,
) -> Result<Response, ApiError> {
    if let Some(ref answer) = form.final_answer {
        let result = state
            .evaluator
            .check_final_answer(&state.registry, &id, answer)?;
        return Ok(Json(result).into_response());
    }

    // A POST is always an attempt; a missing field counts as empty
    let submitted = form.password.as_deref().unwrap_or("");
    let outcome = state
        .evaluator
        .evaluate(&state.registry, &id, Some(submitted))?;
    let record = state.registry.get(&id)?;

    tracing::info!(location = %id, outcome = ?outcome, "Unlock attempt");

    Ok(Html(pages::location_page(
        record,
        outcome,
        state.evaluator.final_answer_enabled(),
    ))
    .into_response())
}
