use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::dto::{CourseSummary, CreateCourseRequest, Pagination, UpdateCourseRequest};
use super::repo::Course;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/:id", get(get_course))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/courses", post(create_course))
        .route("/courses/:id", put(update_course))
        .route("/courses/:id", delete(delete_course))
}

#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<CourseSummary>>, ApiError> {
    let courses = Course::list_published(&state.db, p.limit, p.offset)
        .await
        .map_err(ApiError::Internal)?;
    let items = courses
        .into_iter()
        .map(|c| CourseSummary {
            id: c.id,
            title: c.title,
            category: c.category,
            duration_weeks: c.duration_weeks,
            price_cents: c.price_cents,
            created_at: c.created_at,
        })
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Course>, ApiError> {
    let course = Course::find_published(&state.db, id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Course not found".into()))?;
    Ok(Json(course))
}

#[instrument(skip(state, payload))]
pub async fn create_course(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Course>), ApiError> {
    if payload.title.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Title and description are required".into(),
        ));
    }

    let course = Course::create(
        &state.db,
        payload.title.trim(),
        payload.description.trim(),
        payload.category.as_deref(),
        payload.duration_weeks,
        payload.price_cents,
        payload.is_published,
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(course_id = course.id, user_id = user.user_id, "course created");
    Ok((StatusCode::CREATED, Json(course)))
}

#[instrument(skip(state, payload))]
pub async fn update_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<Course>, ApiError> {
    let course = Course::update(
        &state.db,
        id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.category.as_deref(),
        payload.duration_weeks,
        payload.price_cents,
        payload.is_published,
    )
    .await
    .map_err(ApiError::Internal)?
    .ok_or_else(|| ApiError::NotFound("Course not found".into()))?;

    info!(course_id = id, user_id = user.user_id, "course updated");
    Ok(Json(course))
}

#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let keys = Course::material_keys(&state.db, id)
        .await
        .map_err(ApiError::Internal)?;

    if !Course::delete(&state.db, id)
        .await
        .map_err(ApiError::Internal)?
    {
        return Err(ApiError::NotFound("Course not found".into()));
    }

    // Orphaned objects are harmless; a failed delete only leaks storage.
    for key in keys {
        if let Err(e) = state.storage.delete_object(&key).await {
            warn!(error = %e, %key, "failed to delete material object");
        }
    }

    info!(course_id = id, user_id = user.user_id, "course deleted");
    Ok(StatusCode::NO_CONTENT)
}
