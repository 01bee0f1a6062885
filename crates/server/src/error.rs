//! Protocol-level error type.
//!
//! Storage and token errors are mapped into this small taxonomy at the
//! handler boundary and never passed through raw.

use {
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    lockbox_protocol::ErrorBody,
};

use crate::storage::StorageError;

/// Errors surfaced to RPC callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing, invalid, or expired token — or no tenant bound to the request.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Record absent, or owned by another tenant.
    #[error("not found")]
    NotFound,

    /// Duplicate unique key on add.
    #[error("already exists")]
    AlreadyExists,

    /// The request body cannot be used as sent.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unexpected storage or serialization failure.
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::BadRequest(_) => "bad_request",
            Self::Internal => "internal",
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            StorageError::AlreadyExists => Self::AlreadyExists,
            StorageError::Database(e) => {
                tracing::error!(error = %e, "storage failure");
                Self::Internal
            }
            StorageError::Internal(e) => {
                tracing::error!(error = %e, "storage failure");
                Self::Internal
            }
        }
    }
}

impl From<lockbox_token::TokenError> for ApiError {
    fn from(err: lockbox_token::TokenError) -> Self {
        tracing::error!(error = %err, "token issue failed");
        Self::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.code().to_string(),
            message: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}
