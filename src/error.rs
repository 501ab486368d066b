use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Boundary error for every handler. Request errors serialize as
/// `{"message": ...}`; authentication failures as `{"error": ...}`.
///
/// Unknown email, wrong password, malformed stored hash and inactive
/// accounts all collapse into the single `InvalidCredentials` variant, so
/// the response cannot reveal which check failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => message(StatusCode::BAD_REQUEST, &msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authentication required" })),
            )
                .into_response(),
            ApiError::InvalidCredentials => {
                message(StatusCode::UNAUTHORIZED, "Invalid email or password")
            }
            ApiError::Forbidden(msg) => message(StatusCode::FORBIDDEN, &msg),
            ApiError::NotFound(msg) => message(StatusCode::NOT_FOUND, &msg),
            ApiError::Conflict(msg) => message(StatusCode::CONFLICT, &msg),
            ApiError::Internal(e) => {
                // Full detail stays in the server log only.
                tracing::error!(error = %e, "internal error");
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn message(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "message": msg }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn invalid_credentials_body_is_generic() {
        // one variant, one body: the response cannot say which check failed
        let resp = ApiError::InvalidCredentials.into_response();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        assert_eq!(
            String::from_utf8(body.to_vec()).expect("utf8"),
            r#"{"message":"Invalid email or password"}"#
        );
    }

    #[tokio::test]
    async fn internal_error_body_is_generic() {
        let resp = ApiError::Internal(anyhow::anyhow!("connection refused")).into_response();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("read body");
        let text = String::from_utf8(body.to_vec()).expect("utf8");
        assert!(!text.contains("connection refused"));
        assert!(text.contains("Internal server error"));
    }
}
