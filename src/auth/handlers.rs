use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{
            AuthResponse, LoginRequest, MessageResponse, PublicUser, RegisterRequest, TokenUser,
            VerifyResponse,
        },
        extractors::AuthUser,
        services::{hash_password, is_valid_email, verify_password, JwtKeys},
    },
    error::ApiError,
    extract::JsonBody,
    state::AppState,
    store::{TickerList, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/verify", get(verify))
        .route("/logout", post(logout))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let username_len = payload.username.chars().count();
    if !(3..=20).contains(&username_len) {
        warn!("register rejected: bad username length");
        return Err(ApiError::Validation(
            "Username must be 3-20 characters".into(),
        ));
    }
    if !is_valid_email(&payload.email) {
        warn!("register rejected: invalid email");
        return Err(ApiError::Validation("Valid email required".into()));
    }
    if payload.password.chars().count() < 6 {
        warn!("register rejected: password too short");
        return Err(ApiError::Validation(
            "Password must be at least 6 characters".into(),
        ));
    }

    let mut users = state.store.load_users().await?;
    if users
        .iter()
        .any(|u| u.username == payload.username || u.email == payload.email)
    {
        warn!(username = %payload.username, "register rejected: duplicate identity");
        return Err(ApiError::Conflict(
            "Username or email already exists".into(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let now = OffsetDateTime::now_utc();
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: payload.username,
        email: payload.email,
        password_hash,
        created_at: now,
        last_login: None,
    };

    users.push(user.clone());
    state.store.save_users(&users).await?;
    state
        .store
        .save_tickers(&TickerList::seeded(&user.id, &user.username, now))
        .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.id, &user.username)?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".into(),
            token,
            user: PublicUser {
                id: user.id,
                username: user.username,
                email: user.email,
            },
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::Validation("Username required".into()));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("Password required".into()));
    }

    let mut users = state.store.load_users().await?;

    // Unknown user and wrong password share one message so usernames cannot
    // be enumerated.
    let user = match users.iter_mut().find(|u| u.username == payload.username) {
        Some(u) => u,
        None => {
            warn!(username = %payload.username, "login unknown username");
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    user.last_login = Some(OffsetDateTime::now_utc());
    let public = PublicUser {
        id: user.id.clone(),
        username: user.username.clone(),
        email: user.email.clone(),
    };
    state.store.save_users(&users).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&public.id, &public.username)?;

    info!(user_id = %public.id, username = %public.username, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful".into(),
        token,
        user: public,
    }))
}

#[instrument(skip_all)]
pub async fn verify(user: AuthUser) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: TokenUser {
            id: user.user_id,
            username: user.username,
        },
    })
}

/// Stateless: tokens stay valid until natural expiry, the client drops its
/// copy.
#[instrument(skip_all)]
pub async fn logout(user: AuthUser) -> Json<MessageResponse> {
    info!(user_id = %user.user_id, "user logged out");
    Json(MessageResponse {
        message: "Logout successful".into(),
    })
}
