// ── Core error types ──
//
// Errors returned synchronously to the caller of a data client. Request
// outcomes (HTTP failures, server rejections, malformed bodies) are NOT
// errors here: they travel as `Outcome::Failed` and `*Failed` events.

use thiserror::Error;

use crate::endpoint::Operation;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Client configuration ─────────────────────────────────────────
    #[error("{operation} is not supported for {kind}")]
    Unsupported {
        kind: &'static str,
        operation: Operation,
    },

    #[error("Cannot {operation} a {kind} that has no id")]
    MissingId {
        kind: &'static str,
        operation: Operation,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Request construction ─────────────────────────────────────────
    #[error("Failed to encode request data: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// True for errors that indicate the client was asked to do something
    /// it is not wired for.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<tetres_api::Error> for CoreError {
    fn from(err: tetres_api::Error) -> Self {
        match err {
            tetres_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            tetres_api::Error::Tls(msg) => CoreError::Config {
                message: format!("TLS setup failed: {msg}"),
            },
            tetres_api::Error::Serialization(e) => CoreError::Serialization(e),
            other @ (tetres_api::Error::Transport(_) | tetres_api::Error::Timeout { .. }) => {
                CoreError::Internal(other.to_string())
            }
        }
    }
}
