use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod repo;

/// Name of the sole identity cookie. One signed token, verified the same
/// way by the path gate and by every handler that needs the caller.
pub const AUTH_COOKIE: &str = "auth-token";

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
