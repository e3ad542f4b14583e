//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod error;
mod lenient;
mod send_sms;
mod timestamp;
mod webhook;

pub use error::{DecodeError, TimestampError};
pub use send_sms::{check_outbound_error, encode_send_sms_form, normalize_outbound_response};
pub use webhook::decode_inbound_webhook;
