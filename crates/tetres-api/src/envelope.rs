// Response envelope decoding
//
// Every admin endpoint answers with `{ "code": N, "message": "...", "obj": ... }`.
// `code == 1` is the only success value. HTTP success and envelope success
// are independent: both must hold before a payload is handed out.

use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use thiserror::Error;
use tracing::{debug, warn};

use crate::result::HttpResult;

/// Envelope `code` reported by the server for a successful operation.
pub const SUCCESS_CODE: i32 = 1;

/// Standard TeTRES response envelope.
///
/// ```json
/// { "code": 1, "message": "optional", "obj": <payload> }
/// ```
#[derive(Debug, Deserialize)]
pub struct Envelope<P> {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    // No `default` here: it would add a `P: Default` bound. A missing
    // `Option` field already decodes as `None`.
    pub obj: Option<P>,
}

impl<P> Envelope<P> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Payload of list-of-entities responses: `{"list": [...]}`.
#[derive(Debug, Deserialize)]
pub struct ListPayload<T> {
    pub list: Vec<T>,
}

/// Why a response could not be turned into an operation success.
///
/// Consumers of the data clients never see this directly; it is logged and
/// the original [`HttpResult`] is routed to the failure event instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The exchange itself failed (no response or non-2xx status).
    #[error("transport failure (HTTP {status}): {message}")]
    Transport { status: u16, message: String },

    /// The server answered but reported a logical failure.
    #[error("server rejected request (code {code}): {message}")]
    Envelope { code: i32, message: String },

    /// The body was not the expected envelope shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Decode an envelope and return its payload.
///
/// Transport status is checked first and the body is not parsed when it
/// failed. A parse error is reported as [`Rejection::Malformed`]; it never
/// propagates as a panic or a serde error.
pub fn decode_payload<P: DeserializeOwned>(res: &HttpResult) -> Result<P, Rejection> {
    let envelope = parse_envelope::<P>(res)?;
    envelope.obj.ok_or_else(|| {
        warn!(url = %res.url, "success envelope without payload");
        Rejection::Malformed("missing `obj` in success envelope".into())
    })
}

/// Decode a list-of-entities envelope.
pub fn decode_list<T: DeserializeOwned>(res: &HttpResult) -> Result<Vec<T>, Rejection> {
    decode_payload::<ListPayload<T>>(res).map(|p| p.list)
}

/// Decode a single-entity envelope.
pub fn decode_object<T: DeserializeOwned>(res: &HttpResult) -> Result<T, Rejection> {
    decode_payload(res)
}

/// Decode an integer-id envelope (insert / update).
pub fn decode_id(res: &HttpResult) -> Result<i64, Rejection> {
    decode_payload(res)
}

/// Decode an integer-list envelope (years / delete).
pub fn decode_ids(res: &HttpResult) -> Result<Vec<i64>, Rejection> {
    decode_payload(res)
}

/// Decode a bare success/failure envelope, ignoring any payload.
pub fn decode_ack(res: &HttpResult) -> Result<(), Rejection> {
    parse_envelope::<IgnoredAny>(res).map(|_| ())
}

fn parse_envelope<P: DeserializeOwned>(res: &HttpResult) -> Result<Envelope<P>, Rejection> {
    if !res.is_success() {
        return Err(Rejection::Transport {
            status: res.status,
            message: res.message.clone().unwrap_or_default(),
        });
    }

    let envelope: Envelope<P> = serde_json::from_str(&res.body).map_err(|e| {
        warn!(url = %res.url, error = %e, body = res.body_preview(), "failed to decode envelope");
        Rejection::Malformed(e.to_string())
    })?;

    if !envelope.is_success() {
        debug!(url = %res.url, code = envelope.code, "envelope reported failure");
        return Err(Rejection::Envelope {
            code: envelope.code,
            message: envelope.message.unwrap_or_default(),
        });
    }

    Ok(envelope)
}
