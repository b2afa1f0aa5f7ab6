use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod services;

pub use extractors::AuthUser;
pub use services::JwtKeys;

/// Credential routes; the caller wraps these with the auth rate limiter.
pub fn public_routes() -> Router<AppState> {
    handlers::auth_routes()
}

/// Token-gated session routes (verify, logout).
pub fn session_routes() -> Router<AppState> {
    handlers::session_routes()
}
