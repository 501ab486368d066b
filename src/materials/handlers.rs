use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser, courses::repo::Course, enrollments::repo::Enrollment,
    error::ApiError, state::AppState,
};

use super::dto::RegisterMaterialRequest;
use super::repo::CourseMaterial;

/// Presigned download URLs stay valid for ten minutes.
const DOWNLOAD_URL_TTL_SECS: u64 = 600;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/courses/:id/materials", get(list_materials))
        .route("/courses/:id/materials", post(register_material))
        .route("/materials/:id/download", get(download_material))
}

#[instrument(skip(state))]
pub async fn list_materials(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<Vec<CourseMaterial>>, ApiError> {
    Course::find(&state.db, course_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Course not found".into()))?;

    let materials = CourseMaterial::list_by_course(&state.db, course_id)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(materials))
}

#[instrument(skip(state, payload))]
pub async fn register_material(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
    Json(payload): Json<RegisterMaterialRequest>,
) -> Result<(StatusCode, Json<CourseMaterial>), ApiError> {
    if payload.title.trim().is_empty() || payload.object_key.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Title and object key are required".into(),
        ));
    }

    Course::find(&state.db, course_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Course not found".into()))?;

    let material = CourseMaterial::create(
        &state.db,
        course_id,
        payload.title.trim(),
        payload.object_key.trim(),
        &payload.content_type,
        payload.size_bytes,
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(
        material_id = material.id,
        course_id,
        user_id = user.user_id,
        "material registered"
    );
    Ok((StatusCode::CREATED, Json(material)))
}

/// 302 to a presigned URL; only enrolled students get one.
#[instrument(skip(state))]
pub async fn download_material(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    let material = CourseMaterial::find(&state.db, id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Material not found".into()))?;

    let enrolled = Enrollment::exists(&state.db, user.user_id, material.course_id)
        .await
        .map_err(ApiError::Internal)?;
    if !enrolled {
        return Err(ApiError::Forbidden(
            "Enroll in the course to download its materials".into(),
        ));
    }

    let url = state
        .storage
        .presign_get(&material.object_key, DOWNLOAD_URL_TTL_SECS)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Redirect::temporary(&url))
}
