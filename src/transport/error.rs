use std::num::ParseIntError;

/// Failure to turn a response or webhook body into a typed value.
///
/// Decoding is all-or-nothing: no partially filled result is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {field} timestamp {value:?}: {source}")]
    Timestamp {
        field: &'static str,
        value: String,
        #[source]
        source: TimestampError,
    },

    #[error("malformed form body: {reason}")]
    MalformedForm { reason: String },

    #[error("invalid integer in {field}: {value:?}")]
    InvalidInteger {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Why a provider timestamp did not match `"<Wdy>, <d> <Mon> <yyyy> <hh>:<mm>:<ss> <zone>"`.
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error("expected a three-letter weekday, got {0:?}")]
    Weekday(String),

    #[error(transparent)]
    Layout(#[from] chrono::ParseError),
}
