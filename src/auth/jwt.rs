use std::time::Duration;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{auth::AUTH_COOKIE, config::JwtConfig, error::ApiError, state::AppState};

/// JWT payload: the verified identity every consumer trusts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64, // user ID
    pub email: String,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

/// Signing and verification keys derived from the startup config.
#[derive(Clone)]
pub struct AuthKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for AuthKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl AuthKeys {
    pub fn sign(&self, user_id: i64, email: &str) -> anyhow::Result<String> {
        self.sign_with_ttl(user_id, email, self.ttl.as_secs() as i64)
    }

    fn sign_with_ttl(&self, user_id: i64, email: &str, ttl_secs: i64) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(ttl_secs);
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        // zero leeway: an expired token is expired
        validation.leeway = 0;
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

/// Extracts the verified identity from the `auth-token` cookie.
#[derive(Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AuthKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = AuthKeys::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(AUTH_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(ApiError::Unauthorized)?;

        // Missing, malformed, tampered and expired all look the same to the
        // caller.
        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, Request};

    fn make_keys() -> AuthKeys {
        let state = AppState::fake();
        AuthKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.sign(42, "student@academy.edu").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "student@academy.edu");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[tokio::test]
    async fn expired_token_fails_verification() {
        let keys = make_keys();
        let token = keys
            .sign_with_ttl(1, "a@x.com", -1)
            .expect("sign expired token");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn barely_unexpired_token_passes() {
        let keys = make_keys();
        let token = keys.sign_with_ttl(1, "a@x.com", 1).expect("sign");
        assert!(keys.verify(&token).is_ok());
    }

    #[tokio::test]
    async fn tampered_token_fails_verification() {
        let keys = make_keys();
        let token = keys.sign(7, "a@x.com").expect("sign");
        // flip a character in the middle of the payload segment
        let mid = token.len() / 2;
        let original = token.as_bytes()[mid] as char;
        let replacement = if original == 'x' { 'y' } else { 'x' };
        let mut tampered = token.clone();
        tampered.replace_range(mid..mid + 1, &replacement.to_string());
        assert!(keys.verify(&tampered).is_err());
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_fails() {
        let keys = make_keys();
        let other = AuthKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            issuer: keys.issuer.clone(),
            audience: keys.audience.clone(),
            ttl: keys.ttl,
        };
        let token = other.sign(7, "a@x.com").expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn extractor_accepts_valid_cookie() {
        let state = AppState::fake();
        let keys = AuthKeys::from_ref(&state);
        let token = keys.sign(9, "me@academy.edu").expect("sign");
        let req = Request::builder()
            .header(header::COOKIE, format!("{AUTH_COOKIE}={token}"))
            .body(())
            .expect("request");
        let (mut parts, _) = req.into_parts();
        let user = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .expect("extract");
        assert_eq!(user.user_id, 9);
        assert_eq!(user.email, "me@academy.edu");
    }

    #[tokio::test]
    async fn extractor_rejects_missing_cookie() {
        let state = AppState::fake();
        let req = Request::builder().body(()).expect("request");
        let (mut parts, _) = req.into_parts();
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }
}
