use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{error, info, instrument};

use crate::{error::ApiError, mailer::contact_message, state::AppState};

use super::dto::ContactRequest;

pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(send_contact))
}

#[instrument(skip(state, payload))]
pub async fn send_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<Value>, ApiError> {
    payload.validate().map_err(ApiError::BadRequest)?;

    let message = contact_message(
        &state.config.smtp,
        payload.name.trim(),
        payload.email.trim(),
        payload.subject.as_deref(),
        payload.message.trim(),
    )
    .map_err(|e| {
        // A submitter address lettre cannot parse is a client problem, not ours.
        ApiError::BadRequest(format!("Could not build message: {e}"))
    })?;

    if let Err(e) = state.mailer.send(message).await {
        error!(error = %e, "contact mail delivery failed");
        return Err(ApiError::Internal(e));
    }

    info!(from = %payload.email, "contact message delivered");
    Ok(Json(json!({ "message": "Message sent" })))
}
