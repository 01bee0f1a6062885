//! Shared application state.

use std::sync::Arc;

use lockbox_token::TokenService;

use crate::storage::{SecretStore, UserStore};

/// State handed to every handler. Stateless per call apart from the
/// storage collaborators behind the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub secrets: Arc<dyn SecretStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        secrets: Arc<dyn SecretStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            users,
            secrets,
            tokens,
        }
    }
}
