use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use crate::{
    auth::{jwt::AuthKeys, AUTH_COOKIE},
    error::ApiError,
    state::AppState,
};

/// Path gate for the protected section. Paths outside the configured
/// prefix bypass the gate entirely; handlers that need the caller's
/// identity still verify the same token through [`crate::auth::jwt::AuthUser`].
pub async fn protect(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if !requires_gate(&path, &state.config.protected_prefix) {
        return next.run(req).await;
    }

    let keys = AuthKeys::from_ref(&state);
    let authenticated = jar
        .get(AUTH_COOKIE)
        .map(|c| keys.verify(c.value()).is_ok())
        .unwrap_or(false);

    if authenticated {
        next.run(req).await
    } else if is_api_path(&path) {
        warn!(%path, "unauthenticated API request to protected path");
        ApiError::Unauthorized.into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

fn requires_gate(path: &str, prefix: &str) -> bool {
    path == prefix || path.starts_with(&format!("{prefix}/"))
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_matches_prefix_and_descendants() {
        assert!(requires_gate("/portal", "/portal"));
        assert!(requires_gate("/portal/dashboard", "/portal"));
        assert!(requires_gate("/portal/courses/3", "/portal"));
    }

    #[test]
    fn gate_ignores_other_paths() {
        assert!(!requires_gate("/", "/portal"));
        assert!(!requires_gate("/login", "/portal"));
        assert!(!requires_gate("/portals", "/portal"));
        assert!(!requires_gate("/api/courses", "/portal"));
    }

    #[test]
    fn api_paths_get_status_not_redirect() {
        assert!(is_api_path("/api/me"));
        assert!(is_api_path("/api"));
        assert!(!is_api_path("/portal/dashboard"));
        assert!(!is_api_path("/apichange"));
    }
}
