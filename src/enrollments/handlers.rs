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

use super::dto::EnrollRequest;
use super::repo::{Enrollment, EnrollmentWithCourse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(enroll))
        .route("/enrollments", get(list_enrollments))
}

#[instrument(skip(state, payload))]
pub async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    // Only published courses accept enrollments.
    Course::find_published(&state.db, payload.course_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Course not found".into()))?;

    let enrollment = Enrollment::enroll(&state.db, user.user_id, payload.course_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::Conflict("Already enrolled in this course".into()))?;

    info!(
        user_id = user.user_id,
        course_id = payload.course_id,
        "user enrolled"
    );
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[instrument(skip(state))]
pub async fn list_enrollments(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<EnrollmentWithCourse>>, ApiError> {
    let enrollments = Enrollment::list_by_user(&state.db, user.user_id)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(enrollments))
}
