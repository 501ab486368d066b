use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthCheckResponse, LoginRequest, LoginResponse, PublicUser},
        jwt::{AuthKeys, AuthUser},
        password::verify_password,
        repo::User,
        AUTH_COOKIE,
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/check", get(check))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".into(),
        ));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(ApiError::Internal(e));
        }
    };

    // Unknown email, wrong password, unreadable stored hash and inactive
    // accounts all fall through to the same rejection.
    let verified = user
        .filter(|u| u.is_active)
        .filter(|u| verify_password(&payload.password, &u.password_hash).unwrap_or(false));

    let Some(user) = verified else {
        warn!(email = %payload.email, "login rejected");
        return Err(ApiError::InvalidCredentials);
    };

    let keys = AuthKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email).map_err(ApiError::Internal)?;
    let cookie = build_auth_cookie(token, state.config.cookie_secure);

    info!(user_id = user.id, "user logged in");
    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".into(),
            user: PublicUser::from(user),
        }),
    ))
}

/// Stateless: there is no server-side session to destroy, so logging out
/// twice is indistinguishable from logging out once.
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    (
        jar.remove(Cookie::build(AUTH_COOKIE).path("/")),
        Json(json!({ "message": "Logged out" })),
    )
}

#[instrument(skip(state, jar))]
pub async fn check(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<AuthCheckResponse>, ApiError> {
    let keys = AuthKeys::from_ref(&state);
    let valid = jar
        .get(AUTH_COOKIE)
        .map(|c| keys.verify(c.value()).is_ok())
        .unwrap_or(false);

    if valid {
        Ok(Json(AuthCheckResponse {
            authenticated: true,
        }))
    } else {
        Err(ApiError::Unauthorized)
    }
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let found = User::find_by_id(&state.db, user.user_id)
        .await
        .map_err(ApiError::Internal)?;

    // Token outliving its user row reads as not-authenticated.
    let Some(found) = found else {
        warn!(user_id = user.user_id, "token for missing user");
        return Err(ApiError::Unauthorized);
    };

    Ok(Json(PublicUser::from(found)))
}

fn build_auth_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::days(7));
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_cookie_attributes() {
        let cookie = build_auth_cookie("token-value".into(), true);
        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn auth_cookie_not_secure_in_development() {
        let cookie = build_auth_cookie("t".into(), false);
        assert_eq!(cookie.secure(), Some(false));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (_, first) = logout(CookieJar::new()).await;
        let (_, second) = logout(CookieJar::new()).await;
        assert_eq!(first.0, second.0);
        assert_eq!(first.0["message"], "Logged out");
    }
}
