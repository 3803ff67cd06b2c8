// Raw outcome of one HTTP exchange
//
// Every failure event handed to listeners carries one of these, so a
// transport error is folded into the same shape as a received response
// (status 0, empty body, message set).

use std::fmt;

use serde::Serialize;
use url::Url;

/// Structured result of one request: transport flag, status and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpResult {
    /// The URL the request was sent to.
    pub url: Url,
    /// `true` for a 2xx response received without transport errors.
    pub success: bool,
    /// HTTP status code, or `0` when no response arrived.
    pub status: u16,
    /// Reason phrase or transport error description.
    pub message: Option<String>,
    /// Raw response body (empty on transport failure).
    pub body: String,
}

impl HttpResult {
    /// Build a result from a received response.
    pub fn from_response(url: Url, status: u16, message: Option<String>, body: String) -> Self {
        Self {
            url,
            success: (200..300).contains(&status),
            status,
            message,
            body,
        }
    }

    /// Build a result for a request that never produced a response.
    pub fn transport_failure(url: Url, message: impl Into<String>) -> Self {
        Self {
            url,
            success: false,
            status: 0,
            message: Some(message.into()),
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// `true` when the failure happened before any HTTP response arrived.
    pub fn is_transport_failure(&self) -> bool {
        self.status == 0
    }

    /// Body truncated for log lines.
    pub fn body_preview(&self) -> &str {
        let end = self
            .body
            .char_indices()
            .nth(200)
            .map_or(self.body.len(), |(i, _)| i);
        &self.body[..end]
    }
}

impl fmt::Display for HttpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.status) {
            (Some(msg), 0) => write!(f, "{} failed: {msg}", self.url),
            (Some(msg), status) => write!(f, "{} -> HTTP {status} {msg}", self.url),
            (None, status) => write!(f, "{} -> HTTP {status}", self.url),
        }
    }
}
