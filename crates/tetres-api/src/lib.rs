// tetres-api: HTTP transport and envelope decoding for the TeTRES admin API

pub mod envelope;
pub mod error;
pub mod form;
pub mod result;
pub mod transport;

pub use envelope::{
    Envelope, ListPayload, Rejection, SUCCESS_CODE, decode_ack, decode_id, decode_ids,
    decode_list, decode_object, decode_payload,
};
pub use error::Error;
pub use form::FormData;
pub use result::HttpResult;
pub use transport::{BasicAuth, HttpClient, TlsMode, Transport, TransportConfig};
