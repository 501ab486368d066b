use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser, courses::repo::Course, error::ApiError, state::AppState,
};

use super::dto::RecordResultRequest;
use super::repo::{CourseResult, ResultWithCourse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/results", get(list_results))
        .route("/results", post(record_result))
}

#[instrument(skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ResultWithCourse>>, ApiError> {
    let results = CourseResult::list_by_user(&state.db, user.user_id)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(results))
}

#[instrument(skip(state, payload))]
pub async fn record_result(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RecordResultRequest>,
) -> Result<(StatusCode, Json<CourseResult>), ApiError> {
    if !(0..=100).contains(&payload.score) {
        return Err(ApiError::BadRequest(
            "Score must be between 0 and 100".into(),
        ));
    }
    if payload.grade.trim().is_empty() {
        return Err(ApiError::BadRequest("Grade is required".into()));
    }

    Course::find(&state.db, payload.course_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Course not found".into()))?;

    let result = CourseResult::create(
        &state.db,
        user.user_id,
        payload.course_id,
        payload.score,
        payload.grade.trim(),
        payload.remarks.as_deref(),
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(
        user_id = user.user_id,
        course_id = payload.course_id,
        score = payload.score,
        "result recorded"
    );
    Ok((StatusCode::CREATED, Json(result)))
}
