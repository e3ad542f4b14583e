use std::collections::BTreeMap;

use serde::Deserialize;

use super::DecodeError;
use super::lenient::TransportText;
use super::timestamp::parse_provider_timestamp;
use crate::domain::{
    MessageBody, OutboundResult, ProviderError, RawPhoneNumber, ResponseStatus, SendSms,
};

/// `status` is a number on error payloads and a string on success payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportStatus {
    Number(serde_json::Number),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl TransportStatus {
    fn into_domain(self) -> Option<ResponseStatus> {
        match self {
            Self::Number(number) => http_status_from_number(&number).map(ResponseStatus::Http),
            Self::Text(text) => Some(ResponseStatus::Message(text)),
            Self::Other(_) => None,
        }
    }
}

fn http_status_from_number(number: &serde_json::Number) -> Option<u16> {
    if let Some(value) = number.as_u64() {
        return u16::try_from(value).ok();
    }
    number
        .as_f64()
        .filter(|value| value.is_finite() && (0.0..=f64::from(u16::MAX)).contains(value))
        .map(|value| value.trunc() as u16)
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    more_info: Option<String>,
    #[serde(default)]
    status: Option<TransportStatus>,
    #[serde(default)]
    date_created: Option<String>,
    #[serde(default)]
    date_updated: Option<String>,
    #[serde(default)]
    date_sent: Option<String>,
    #[serde(default)]
    sid: Option<String>,
    #[serde(default)]
    account_sid: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    messaging_service_sid: Option<String>,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    num_segments: Option<TransportText>,
    #[serde(default)]
    num_media: Option<TransportText>,
    #[serde(default)]
    direction: Option<String>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    price: Option<TransportText>,
    #[serde(default)]
    price_unit: Option<String>,
    #[serde(default)]
    error_code: Option<TransportText>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    sub_resource_uris: Option<BTreeMap<String, Option<String>>>,
}

pub fn encode_send_sms_form(
    request: &SendSms,
    default_from: &RawPhoneNumber,
) -> Vec<(String, String)> {
    let from = request.sender().unwrap_or(default_from);
    vec![
        (SendSms::TO_FIELD.to_owned(), request.to().raw().to_owned()),
        (SendSms::FROM_FIELD.to_owned(), from.raw().to_owned()),
        (
            MessageBody::FIELD.to_owned(),
            request.body().as_str().to_owned(),
        ),
    ]
}

/// Decode the JSON body returned by the Messages endpoint.
///
/// Both success and error payloads decode successfully; use [`check_outbound_error`] to find
/// out whether the send failed.
pub fn normalize_outbound_response(body: &[u8]) -> Result<OutboundResult, DecodeError> {
    let parsed: MessageJsonResponse = serde_json::from_slice(body)?;

    let created = parse_provider_timestamp("date_created", parsed.date_created.as_deref())?;
    let updated = parse_provider_timestamp("date_updated", parsed.date_updated.as_deref())?;
    let sent = parse_provider_timestamp("date_sent", parsed.date_sent.as_deref())?;

    let result = OutboundResult {
        is_error: parsed.code.is_some_and(|code| code != 0),
        code: parsed.code,
        message: parsed.message,
        more_info: parsed.more_info,
        status: parsed.status.and_then(TransportStatus::into_domain),
        created,
        updated,
        sent,
        sid: parsed.sid,
        account_sid: parsed.account_sid,
        to: parsed.to,
        from: parsed.from,
        messaging_service_sid: parsed.messaging_service_sid,
        body: parsed.body,
        num_segments: parsed.num_segments.map(TransportText::into_string),
        num_media: parsed.num_media.map(TransportText::into_string),
        direction: parsed.direction,
        api_version: parsed.api_version,
        price: parsed.price.map(TransportText::into_string),
        price_unit: parsed.price_unit,
        error_code: parsed.error_code.map(TransportText::into_string),
        error_message: parsed.error_message,
        uri: parsed.uri,
        sub_resource_uris: parsed
            .sub_resource_uris
            .unwrap_or_default()
            .into_iter()
            .map(|(name, uri)| (name, uri.unwrap_or_default()))
            .collect(),
    };

    tracing::debug!(
        sid = result.sid.as_deref().unwrap_or_default(),
        is_error = result.is_error,
        "normalized outbound response"
    );

    Ok(result)
}

/// Turn a decoded error payload into a [`ProviderError`]; success payloads yield `Ok(())`.
pub fn check_outbound_error(result: &OutboundResult) -> Result<(), ProviderError> {
    result.check_error()
}
