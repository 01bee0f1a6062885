//! Registration and login — the only routes outside the auth gate.

use {
    axum::{Json, Router, extract::State, routing::post},
    lockbox_protocol::{AuthResponse, Credentials},
};

use crate::{error::ApiError, state::AppState, storage::StorageError};

/// Build the `/api/auth/*` router.
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Create a tenant: generate its key-derivation salt, store the login with
/// a hashed password, and issue the first token.
async fn register_handler(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    if creds.login.is_empty() || creds.password.is_empty() {
        return Err(ApiError::bad_request("login and password are required"));
    }

    let salt = lockbox_crypto::generate_salt();
    let tenant = state
        .users
        .register(&creds.login, &creds.password, &salt)
        .await?;
    let token = state.tokens.issue(tenant)?;

    tracing::info!(login = %creds.login, "tenant registered");
    Ok(Json(AuthResponse { token, salt }))
}

/// Verify credentials and issue a fresh token plus the stored salt the
/// client needs to re-derive its content key.
async fn login_handler(
    State(state): State<AppState>,
    Json(creds): Json<Credentials>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .users
        .verify_login(&creds.login, &creds.password)
        .await
        .map_err(|err| match err {
            StorageError::NotFound => ApiError::unauthenticated("invalid login or password"),
            other => ApiError::from(other),
        })?;
    let token = state.tokens.issue(user.id)?;

    Ok(Json(AuthResponse {
        token,
        salt: user.salt,
    }))
}
