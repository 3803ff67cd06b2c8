//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants and failed request outcomes into user-facing
//! errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use tetres_config::ConfigError;
use tetres_core::{CoreError, HttpResult};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REJECTED: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const BUSY: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the TeTRES server at {url}")]
    #[diagnostic(
        code(tetres::connection_failed),
        help(
            "Check that the server is running and accessible.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("The server refused the credentials for {url}")]
    #[diagnostic(
        code(tetres::auth_failed),
        help("Check username and password_env in your profile: tetres config show")
    )]
    AuthFailed { url: String },

    #[error("{url} answered HTTP {status}")]
    #[diagnostic(code(tetres::http_error))]
    RequestFailed {
        url: String,
        status: u16,
        message: String,
    },

    // ── Server-side rejection ────────────────────────────────────────
    #[error("The server rejected the {kind} request: {message}")]
    #[diagnostic(code(tetres::rejected))]
    Rejected { kind: String, message: String },

    // ── Client capabilities ──────────────────────────────────────────
    #[error("{operation} is not available for {kind}")]
    #[diagnostic(
        code(tetres::unsupported),
        help("The server offers no endpoint for this operation. Check the profile's endpoints table.")
    )]
    Unsupported { kind: String, operation: String },

    #[error("A {kind} list request is already running")]
    #[diagnostic(code(tetres::busy))]
    Busy { kind: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(tetres::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(tetres::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: tetres config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No TeTRES server configured")]
    #[diagnostic(
        code(tetres::no_config),
        help(
            "Create a profile with: tetres config init\n\
             Or pass --server. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(tetres::config))]
    Config(#[from] ConfigError),

    // ── Core ─────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(tetres::core))]
    Core(CoreError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(tetres::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::RequestFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Busy { .. } => exit_code::BUSY,
            Self::Validation { .. } | Self::ProfileNotFound { .. } | Self::NoConfig { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Turn a failed exchange into the matching user-facing error.
    pub fn from_failure(kind: &str, res: &HttpResult) -> Self {
        let url = res.url.to_string();
        if res.is_transport_failure() {
            return Self::ConnectionFailed {
                url,
                reason: res.message.clone().unwrap_or_default(),
            };
        }
        if !res.is_success() {
            return match res.status {
                401 | 403 => Self::AuthFailed { url },
                status => Self::RequestFailed {
                    url,
                    status,
                    message: res.message.clone().unwrap_or_default(),
                },
            };
        }
        Self::Rejected {
            kind: kind.into(),
            message: server_message(&res.body),
        }
    }
}

/// The envelope's `message`, when the body carries one.
fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "no reason given".into())
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unsupported { kind, operation } => CliError::Unsupported {
                kind: kind.into(),
                operation: operation.to_string(),
            },
            CoreError::MissingId { kind, operation } => CliError::Validation {
                field: "id".into(),
                reason: format!("cannot {operation} a {kind} without an id"),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "server".into(),
                reason: message,
            },
            other => CliError::Core(other),
        }
    }
}
