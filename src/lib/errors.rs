use thiserror::Error;

use crate::constants::{
    MSG_INVALID_TOKEN, MSG_METHOD_NOT_ALLOWED, MSG_POST_NOT_FOUND, MSG_SERVER_CONFIG,
    MSG_TOKEN_REQUIRED,
};

/// Failures reported by a content store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,

    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("content store request timed out after {0} seconds")]
    Timeout(u64),

    #[error("content store error: {0}")]
    Upstream(String),

    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(e: surrealdb::Error) -> Self {
        StoreError::Upstream(e.to_string())
    }
}

/// Every way a gateway operation can fail.
///
/// `Display` is the caller-facing message; detail that must not leave the
/// process (missing secrets, store errors) lives in the variant payload and is
/// only logged.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{}", MSG_METHOD_NOT_ALLOWED)]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{}", MSG_TOKEN_REQUIRED)]
    Unauthorized,

    #[error("{}", MSG_INVALID_TOKEN)]
    Forbidden,

    #[error("{}", MSG_SERVER_CONFIG)]
    ServerMisconfigured(&'static str),

    #[error("{}", MSG_POST_NOT_FOUND)]
    NotFound,

    #[error("{message}")]
    UpstreamFailure {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl GatewayError {
    /// Maps a store failure into the gateway taxonomy. A document that vanished
    /// between slug resolution and the write is reported as `NotFound`.
    pub fn from_store(source: StoreError, message: &'static str) -> Self {
        match source {
            StoreError::NotFound => GatewayError::NotFound,
            source => GatewayError::UpstreamFailure { message, source },
        }
    }
}
