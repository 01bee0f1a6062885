//! Shared setup for integration tests: an in-memory server on an ephemeral
//! port.

use std::{net::SocketAddr, sync::Arc};

use {
    lockbox_server::{AppState, SqliteStorage, build_app},
    lockbox_token::TokenService,
    sqlx::sqlite::SqlitePoolOptions,
    tokio::net::TcpListener,
};

/// Signing secret shared by the spawned server and tests that mint their
/// own tokens.
#[allow(dead_code)]
pub const TEST_SIGNING_SECRET: &str = "integration-test-signing-secret";

#[allow(clippy::unwrap_used)]
pub async fn start_server() -> SocketAddr {
    // One connection: every pooled connection to `sqlite::memory:` would
    // otherwise open its own empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let storage = Arc::new(SqliteStorage::new(pool).await.unwrap());
    let tokens = Arc::new(TokenService::new(TEST_SIGNING_SECRET).unwrap());

    let state = AppState::new(storage.clone(), storage, tokens);
    let app = build_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
