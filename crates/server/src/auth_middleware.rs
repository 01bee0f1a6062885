//! The auth gate: every vault RPC must carry a valid bearer token.
//!
//! Register and login bypass the gate by route composition — they are
//! mounted outside the layered router, so no runtime method check exists.
//! A verification failure short-circuits dispatch entirely; handlers only
//! ever run with a tenant identity already bound to the request.

use {
    axum::{
        body::Body,
        extract::{FromRequestParts, State},
        http::{Request, header::AUTHORIZATION, request::Parts},
        middleware::Next,
        response::{IntoResponse, Response},
    },
    uuid::Uuid,
};

use crate::{error::ApiError, state::AppState};

/// Tenant identity bound into request extensions by [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct TenantId(pub Uuid);

/// Extractor handlers use to read the bound tenant identity.
///
/// Rejects with `Unauthenticated` if no identity was bound, so a handler
/// accidentally mounted outside the gate still fails closed.
pub struct Tenant(pub Uuid);

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantId>()
            .map(|tenant| Tenant(tenant.0))
            .ok_or_else(|| ApiError::unauthenticated("no tenant bound to request"))
    }
}

/// Middleware protecting the vault routes.
///
/// Extracts the bearer credential, verifies it with the token service, and
/// binds the embedded tenant id into the request. Any failure is terminal
/// for the RPC — the caller must re-authenticate, not retry the token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(token) = header.and_then(extract_bearer_token) else {
        return ApiError::unauthenticated("missing bearer token").into_response();
    };

    match state.tokens.verify(token) {
        Ok(tenant) => {
            request.extensions_mut().insert(TenantId(tenant));
            next.run(request).await
        }
        Err(err) => ApiError::unauthenticated(err.to_string()).into_response(),
    }
}

/// Pull the token out of an `authorization` header value. Scheme matching
/// is case-tolerant.
pub fn extract_bearer_token(value: &str) -> Option<&str> {
    let rest = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?;
    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer_token("bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(extract_bearer_token("Basic dXNlcg=="), None);
        assert_eq!(extract_bearer_token("bearer "), None);
        assert_eq!(extract_bearer_token(""), None);
        assert_eq!(extract_bearer_token("abc123"), None);
    }
}
