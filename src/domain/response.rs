use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// The Messages endpoint overloads `status`: error payloads carry the HTTP status as a number,
/// success payloads carry the message state as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    /// Numeric `status` of an error payload.
    Http(u16),
    /// String `status` of a success payload, e.g. `"queued"`.
    Message(String),
}

/// Normalized outcome of one send attempt.
///
/// A structurally valid error payload is still an `Ok` decode; call
/// [`OutboundResult::check_error`] to turn it into a [`ProviderError`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OutboundResult {
    /// `true` iff the payload carried a non-zero `code`.
    pub is_error: bool,

    // Error payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<DateTime<FixedOffset>>,

    // Success payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_service_sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Segment count, sent by Twilio as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_segments: Option<String>,
    /// Media count, sent by Twilio as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_media: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<String>,
    /// Per-message delivery error code (unrelated to [`OutboundResult::code`]).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sub_resource_uris: BTreeMap<String, String>,
}

impl OutboundResult {
    /// HTTP status carried by an error payload's numeric `status`.
    pub fn http_status_code(&self) -> Option<u16> {
        match self.status {
            Some(ResponseStatus::Http(code)) => Some(code),
            _ => None,
        }
    }

    /// Message state carried by a success payload's string `status`.
    pub fn message_status(&self) -> Option<&str> {
        match &self.status {
            Some(ResponseStatus::Message(status)) => Some(status),
            _ => None,
        }
    }

    /// Returns the provider failure described by this result, if any.
    pub fn check_error(&self) -> Result<(), ProviderError> {
        if !self.is_error {
            return Ok(());
        }
        Err(ProviderError {
            http_status: self.http_status_code(),
            code: self.code.unwrap_or_default(),
            message: self.message.clone(),
            more_info: self.more_info.clone(),
        })
    }
}

/// A logical failure reported by Twilio in an otherwise well-formed response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: error {code}{}", status_line(.http_status), more_info_suffix(.more_info))]
pub struct ProviderError {
    pub http_status: Option<u16>,
    pub code: i64,
    pub message: Option<String>,
    pub more_info: Option<String>,
}

impl ProviderError {
    /// Canonical reason phrase for [`ProviderError::http_status`], e.g. `"Bad Request"`.
    pub fn status_text(&self) -> Option<&'static str> {
        self.http_status.and_then(canonical_reason)
    }
}

fn canonical_reason(status: u16) -> Option<&'static str> {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
}

fn status_line(http_status: &Option<u16>) -> String {
    match *http_status {
        Some(status) => match canonical_reason(status) {
            Some(text) => format!("{status} {text}"),
            None => status.to_string(),
        },
        None => "unknown HTTP status".to_owned(),
    }
}

fn more_info_suffix(more_info: &Option<String>) -> String {
    more_info
        .as_deref()
        .map(|url| format!(" (for more info see {url})"))
        .unwrap_or_default()
}

/// One incoming-message webhook call, flattened.
///
/// Every field is optional on the wire; missing ones keep their zero value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InboundWebhookEvent {
    pub to: String,
    pub from: String,
    pub body: String,
    pub to_city: String,
    pub from_city: String,
    pub to_zip: String,
    pub from_zip: i64,
    pub to_country: String,
    pub from_country: String,
    pub from_state: String,
    /// Provider-defined delivery state (`received`, ...); kept open-ended.
    pub sms_status: String,
    pub message_sid: String,
    pub sms_message_sid: String,
    pub sms_sid: String,
    pub account_sid: String,
    pub num_media: i64,
    pub num_segments: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_result() -> OutboundResult {
        OutboundResult {
            is_error: true,
            code: Some(21211),
            message: Some("The 'To' number is not a valid phone number.".to_owned()),
            more_info: Some("https://www.twilio.com/docs/errors/21211".to_owned()),
            status: Some(ResponseStatus::Http(400)),
            ..Default::default()
        }
    }

    #[test]
    fn status_accessors_are_exclusive() {
        let result = error_result();
        assert_eq!(result.http_status_code(), Some(400));
        assert_eq!(result.message_status(), None);

        let result = OutboundResult {
            status: Some(ResponseStatus::Message("queued".to_owned())),
            ..Default::default()
        };
        assert_eq!(result.http_status_code(), None);
        assert_eq!(result.message_status(), Some("queued"));
    }

    #[test]
    fn check_error_is_ok_for_success() {
        let result = OutboundResult {
            status: Some(ResponseStatus::Message("queued".to_owned())),
            ..Default::default()
        };
        assert!(result.check_error().is_ok());
    }

    #[test]
    fn check_error_describes_provider_failure() {
        let err = error_result().check_error().unwrap_err();
        assert_eq!(err.http_status, Some(400));
        assert_eq!(err.code, 21211);
        assert_eq!(
            err.to_string(),
            "400 Bad Request: error 21211 (for more info see https://www.twilio.com/docs/errors/21211)"
        );
    }

    #[test]
    fn provider_error_display_without_status() {
        let err = ProviderError {
            http_status: None,
            code: 20003,
            message: None,
            more_info: None,
        };
        assert_eq!(err.to_string(), "unknown HTTP status: error 20003");
        assert_eq!(err.status_text(), None);
    }

    #[test]
    fn provider_error_display_with_unnamed_status() {
        let err: Box<dyn std::error::Error> = Box::new(ProviderError {
            http_status: Some(599),
            code: 30001,
            message: None,
            more_info: Some("https://www.twilio.com/docs/errors/30001".to_owned()),
        });
        assert_eq!(
            err.to_string(),
            "599: error 30001 (for more info see https://www.twilio.com/docs/errors/30001)"
        );
    }
}
