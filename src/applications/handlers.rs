use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{error::ApiError, state::AppState};

use super::dto::{InternshipRequest, PitchDeckRequest};
use super::repo::{InternshipApplication, PitchDeckApplication};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/applications/internships", post(apply_internship))
        .route("/applications/pitch-decks", post(apply_pitch_deck))
}

#[instrument(skip(state, payload))]
pub async fn apply_internship(
    State(state): State<AppState>,
    Json(payload): Json<InternshipRequest>,
) -> Result<(StatusCode, Json<InternshipApplication>), ApiError> {
    payload.validate().map_err(ApiError::BadRequest)?;

    let application = InternshipApplication::create(
        &state.db,
        payload.full_name.trim(),
        payload.email.trim(),
        payload.phone.trim(),
        payload.university.as_deref(),
        payload.course_of_study.as_deref(),
        payload.cover_letter.trim(),
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(application_id = application.id, "internship application received");
    Ok((StatusCode::CREATED, Json(application)))
}

#[instrument(skip(state, payload))]
pub async fn apply_pitch_deck(
    State(state): State<AppState>,
    Json(payload): Json<PitchDeckRequest>,
) -> Result<(StatusCode, Json<PitchDeckApplication>), ApiError> {
    payload.validate().map_err(ApiError::BadRequest)?;

    let application = PitchDeckApplication::create(
        &state.db,
        payload.full_name.trim(),
        payload.email.trim(),
        payload.phone.trim(),
        payload.startup_name.trim(),
        payload.summary.trim(),
        payload.deck_key.as_deref(),
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(application_id = application.id, "pitch deck application received");
    Ok((StatusCode::CREATED, Json(application)))
}
