//! Router assembly and server startup.

use std::net::SocketAddr;

use {
    axum::{Json, Router, middleware, routing::get},
    tower_http::{
        cors::{Any, CorsLayer},
        trace::TraceLayer,
    },
    tracing::info,
};

use crate::{
    auth_middleware::require_auth, auth_routes::auth_router, secret_routes::secret_router,
    state::AppState,
};

/// Build the application router (shared between production startup and tests).
///
/// Auth routes are mounted outside the gate; everything under
/// `/api/secrets` is layered with [`require_auth`]. Request logging and
/// CORS wrap the whole pipeline.
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .nest("/api/secrets", secret_router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/auth", auth_router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "lockbox server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
