use std::borrow::Cow;
use std::collections::HashMap;

use url::form_urlencoded;

use super::DecodeError;
use crate::domain::InboundWebhookEvent;

/// Form parameters of the incoming-message webhook that [`InboundWebhookEvent`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WebhookField {
    To,
    From,
    Body,
    ToCity,
    FromCity,
    ToZip,
    FromZip,
    ToCountry,
    FromCountry,
    FromState,
    SmsStatus,
    MessageSid,
    SmsMessageSid,
    SmsSid,
    AccountSid,
    NumMedia,
    NumSegments,
}

impl WebhookField {
    const ALL: [Self; 17] = [
        Self::To,
        Self::From,
        Self::Body,
        Self::ToCity,
        Self::FromCity,
        Self::ToZip,
        Self::FromZip,
        Self::ToCountry,
        Self::FromCountry,
        Self::FromState,
        Self::SmsStatus,
        Self::MessageSid,
        Self::SmsMessageSid,
        Self::SmsSid,
        Self::AccountSid,
        Self::NumMedia,
        Self::NumSegments,
    ];

    fn wire_name(self) -> &'static str {
        match self {
            Self::To => "To",
            Self::From => "From",
            Self::Body => "Body",
            Self::ToCity => "ToCity",
            Self::FromCity => "FromCity",
            Self::ToZip => "ToZip",
            Self::FromZip => "FromZip",
            Self::ToCountry => "ToCountry",
            Self::FromCountry => "FromCountry",
            Self::FromState => "FromState",
            Self::SmsStatus => "SMSStatus",
            Self::MessageSid => "MessageSID",
            Self::SmsMessageSid => "SMSMessageSID",
            Self::SmsSid => "SMSSid",
            Self::AccountSid => "AccountSID",
            Self::NumMedia => "NumMedia",
            Self::NumSegments => "NumSegments",
        }
    }

    /// Spelling Twilio actually posts, consulted when [`WebhookField::wire_name`] is absent.
    fn provider_alias(self) -> Option<&'static str> {
        match self {
            Self::SmsStatus => Some("SmsStatus"),
            Self::MessageSid => Some("MessageSid"),
            Self::SmsMessageSid => Some("SmsMessageSid"),
            Self::SmsSid => Some("SmsSid"),
            Self::AccountSid => Some("AccountSid"),
            _ => None,
        }
    }

    fn assign(self, event: &mut InboundWebhookEvent, value: &str) -> Result<(), DecodeError> {
        match self {
            Self::To => event.to = value.to_owned(),
            Self::From => event.from = value.to_owned(),
            Self::Body => event.body = value.to_owned(),
            Self::ToCity => event.to_city = value.to_owned(),
            Self::FromCity => event.from_city = value.to_owned(),
            Self::ToZip => event.to_zip = value.to_owned(),
            Self::FromZip => event.from_zip = self.parse_integer(value)?,
            Self::ToCountry => event.to_country = value.to_owned(),
            Self::FromCountry => event.from_country = value.to_owned(),
            Self::FromState => event.from_state = value.to_owned(),
            Self::SmsStatus => event.sms_status = value.to_owned(),
            Self::MessageSid => event.message_sid = value.to_owned(),
            Self::SmsMessageSid => event.sms_message_sid = value.to_owned(),
            Self::SmsSid => event.sms_sid = value.to_owned(),
            Self::AccountSid => event.account_sid = value.to_owned(),
            Self::NumMedia => event.num_media = self.parse_integer(value)?,
            Self::NumSegments => event.num_segments = self.parse_integer(value)?,
        }
        Ok(())
    }

    // Twilio posts `FromZip=` for numbers without geography; treat it like a missing key.
    fn parse_integer(self, value: &str) -> Result<i64, DecodeError> {
        if value.is_empty() {
            return Ok(0);
        }
        value
            .parse::<i64>()
            .map_err(|source| DecodeError::InvalidInteger {
                field: self.wire_name(),
                value: value.to_owned(),
                source,
            })
    }
}

/// Decode the `application/x-www-form-urlencoded` body of an incoming-message webhook.
///
/// Missing fields keep their zero value, unknown fields are ignored, and only the first value
/// of a repeated field is used.
pub fn decode_inbound_webhook(body: &[u8]) -> Result<InboundWebhookEvent, DecodeError> {
    check_form_syntax(body)?;

    let mut values = HashMap::<Cow<'_, str>, Cow<'_, str>>::new();
    for (key, value) in form_urlencoded::parse(body) {
        values.entry(key).or_insert(value);
    }

    let mut event = InboundWebhookEvent::default();
    for field in WebhookField::ALL {
        let value = values.get(field.wire_name()).or_else(|| {
            field
                .provider_alias()
                .and_then(|alias| values.get(alias))
        });
        if let Some(value) = value {
            field.assign(&mut event, value)?;
        }
    }

    tracing::debug!(
        message_sid = %event.message_sid,
        from = %event.from,
        "decoded inbound webhook"
    );

    Ok(event)
}

/// Reject bodies a strict query-string parser would refuse: bad `%` escapes and `;` separators.
fn check_form_syntax(body: &[u8]) -> Result<(), DecodeError> {
    let mut index = 0;
    while index < body.len() {
        match body[index] {
            b'%' => {
                let valid = matches!(
                    body.get(index + 1..index + 3),
                    Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
                );
                if !valid {
                    return Err(DecodeError::MalformedForm {
                        reason: format!("invalid percent escape at byte {index}"),
                    });
                }
                index += 3;
            }
            b';' => {
                return Err(DecodeError::MalformedForm {
                    reason: format!("unexpected semicolon separator at byte {index}"),
                });
            }
            _ => index += 1,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_zero_values() {
        let event = decode_inbound_webhook(b"From=%2B15551234567&Body=hi").unwrap();
        assert_eq!(event.from, "+15551234567");
        assert_eq!(event.body, "hi");
        assert_eq!(event.from_zip, 0);
        assert_eq!(event.num_media, 0);
        assert_eq!(event.to, "");
        assert_eq!(event.sms_status, "");
    }

    #[test]
    fn plus_sign_decodes_as_space() {
        let event = decode_inbound_webhook(b"From=+15551234567&Body=hello+there").unwrap();
        assert_eq!(event.from, " 15551234567");
        assert_eq!(event.body, "hello there");
    }

    #[test]
    fn decodes_full_payload() {
        let body = "ToCountry=US&ToState=CA&SMSMessageSID=SM1&NumMedia=2&ToCity=SAN+FRANCISCO\
            &FromZip=94105&SMSSid=SM2&FromState=CA&SMSStatus=received&FromCity=SAN+FRANCISCO\
            &Body=Hello%2C+world%21&FromCountry=US&To=%2B15557654321&ToZip=94016\
            &NumSegments=1&MessageSID=SM3&AccountSID=AC1&From=%2B15551234567";
        let event = decode_inbound_webhook(body.as_bytes()).unwrap();

        assert_eq!(
            event,
            InboundWebhookEvent {
                to: "+15557654321".to_owned(),
                from: "+15551234567".to_owned(),
                body: "Hello, world!".to_owned(),
                to_city: "SAN FRANCISCO".to_owned(),
                from_city: "SAN FRANCISCO".to_owned(),
                to_zip: "94016".to_owned(),
                from_zip: 94105,
                to_country: "US".to_owned(),
                from_country: "US".to_owned(),
                from_state: "CA".to_owned(),
                sms_status: "received".to_owned(),
                message_sid: "SM3".to_owned(),
                sms_message_sid: "SM1".to_owned(),
                sms_sid: "SM2".to_owned(),
                account_sid: "AC1".to_owned(),
                num_media: 2,
                num_segments: 1,
            }
        );
    }

    #[test]
    fn provider_spellings_are_accepted() {
        let body = b"MessageSid=SM3&SmsMessageSid=SM1&SmsSid=SM2&SmsStatus=received&AccountSid=AC1";
        let event = decode_inbound_webhook(body).unwrap();
        assert_eq!(event.message_sid, "SM3");
        assert_eq!(event.sms_message_sid, "SM1");
        assert_eq!(event.sms_sid, "SM2");
        assert_eq!(event.sms_status, "received");
        assert_eq!(event.account_sid, "AC1");
    }

    #[test]
    fn documented_spelling_wins_over_provider_alias() {
        let event = decode_inbound_webhook(b"MessageSid=alias&MessageSID=primary").unwrap();
        assert_eq!(event.message_sid, "primary");
    }

    #[test]
    fn only_first_value_is_used() {
        let event = decode_inbound_webhook(b"Body=first&Body=second&NumMedia=1&NumMedia=x").unwrap();
        assert_eq!(event.body, "first");
        assert_eq!(event.num_media, 1);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let with_extra = decode_inbound_webhook(b"From=%2B15551234567&Body=hi&Foo=bar").unwrap();
        let without = decode_inbound_webhook(b"From=%2B15551234567&Body=hi").unwrap();
        assert_eq!(with_extra, without);
    }

    #[test]
    fn non_numeric_integer_field_fails() {
        let err = decode_inbound_webhook(b"From=%2B15551234567&NumMedia=abc").unwrap_err();
        match err {
            DecodeError::InvalidInteger { field, value, .. } => {
                assert_eq!(field, "NumMedia");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_integer_field_is_zero() {
        let event = decode_inbound_webhook(b"FromZip=&NumSegments=3").unwrap();
        assert_eq!(event.from_zip, 0);
        assert_eq!(event.num_segments, 3);
    }

    #[test]
    fn signed_integers_parse() {
        let event = decode_inbound_webhook(b"NumSegments=%2B2&FromZip=-1").unwrap();
        assert_eq!(event.num_segments, 2);
        assert_eq!(event.from_zip, -1);
    }

    #[test]
    fn malformed_query_string_fails() {
        assert!(matches!(
            decode_inbound_webhook(b"Body=100%zz"),
            Err(DecodeError::MalformedForm { .. })
        ));
        assert!(matches!(
            decode_inbound_webhook(b"Body=50%"),
            Err(DecodeError::MalformedForm { .. })
        ));
        assert!(matches!(
            decode_inbound_webhook(b"Body=a;From=b"),
            Err(DecodeError::MalformedForm { .. })
        ));
    }

    #[test]
    fn empty_body_decodes_to_default() {
        assert_eq!(
            decode_inbound_webhook(b"").unwrap(),
            InboundWebhookEvent::default()
        );
    }
}
