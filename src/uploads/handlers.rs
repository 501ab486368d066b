use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/uploads", post(upload_file))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub content_type: String,
    pub size_bytes: usize,
}

/// POST /uploads (multipart, field `file`). The returned key is what
/// pitch-deck applications and material registrations reference.
#[instrument(skip(state, mp))]
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ApiError> {
    let mut file: Option<(Bytes, String)> = None;
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() == Some("file") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Unreadable upload: {e}")))?;
            file = Some((data, content_type));
            break;
        }
    }

    let Some((data, content_type)) = file else {
        return Err(ApiError::BadRequest("file field is required".into()));
    };
    if data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".into()));
    }

    let key = format!("uploads/{}", Uuid::new_v4());
    let size_bytes = data.len();
    state
        .storage
        .put_object(&key, data, &content_type)
        .await
        .map_err(ApiError::Internal)?;

    info!(user_id = user.user_id, %key, size_bytes, "file uploaded");
    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            key,
            content_type,
            size_bytes,
        }),
    ))
}
