//! Lockbox server: authenticated vault operations over HTTP/JSON.
//!
//! Every vault route sits behind the bearer-token auth gate; register and
//! login are mounted outside it. Handlers are pure pass-throughs with
//! respect to encryption — this layer manages records but can never read
//! them.

pub mod auth_middleware;
pub mod auth_routes;
pub mod error;
pub mod secret_routes;
pub mod server;
pub mod sqlite;
pub mod state;
pub mod storage;

pub use {
    error::ApiError,
    server::{build_app, serve},
    sqlite::SqliteStorage,
    state::AppState,
};
