//! Typed Rust client for the Twilio SMS REST API.
//!
//! Two wire formats need taming: the JSON returned by the Messages endpoint, whose `status`
//! is a number on errors and a string on success, and the form-encoded body of the
//! incoming-message webhook. The domain layer holds the strong types, the transport layer
//! the wire-format quirks, and a small client layer performs the authenticated POST.
//!
//! ```rust,no_run
//! use twilio_sms::{Credentials, MessageBody, RawPhoneNumber, SendSms, TwilioClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twilio_sms::TwilioError> {
//!     let credentials = Credentials::new("AC...", "...", "+15557654321")?;
//!     let client = TwilioClient::new(credentials);
//!     let request = SendSms::new(
//!         RawPhoneNumber::new("+15551234567")?,
//!         MessageBody::new("Oh, hello.")?,
//!     );
//!     let result = client.send_sms(request).await?;
//!     println!("queued as {:?}", result.sid);
//!     Ok(())
//! }
//! ```
//!
//! Webhook bodies are decoded without any HTTP framework:
//!
//! ```rust
//! let event = twilio_sms::decode_inbound_webhook(b"From=%2B15551234567&Body=hi")?;
//! assert_eq!(event.from, "+15551234567");
//! assert_eq!(event.num_media, 0);
//! # Ok::<(), twilio_sms::DecodeError>(())
//! ```
//!
//! [`RawPhoneNumber`] is sent as typed. To normalize user input to E.164 first, parse it as a
//! [`PhoneNumber`] (backed by the `phonenumber` crate) and convert:
//!
//! ```rust
//! use twilio_sms::{PhoneNumber, RawPhoneNumber};
//!
//! let number = PhoneNumber::parse(Some(phonenumber::country::Id::US), "(415) 555-2671")?;
//! let to: RawPhoneNumber = number.into();
//! assert_eq!(to.raw(), "+14155552671");
//! # Ok::<(), twilio_sms::ValidationError>(())
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{TwilioClient, TwilioClientBuilder, TwilioError};
pub use domain::{
    AccountSid, AuthToken, Credentials, InboundWebhookEvent, MessageBody, OutboundResult,
    PhoneNumber, ProviderError, RawPhoneNumber, ResponseStatus, SendSms, ValidationError,
};
pub use transport::{
    DecodeError, TimestampError, check_outbound_error, decode_inbound_webhook,
    normalize_outbound_response,
};
