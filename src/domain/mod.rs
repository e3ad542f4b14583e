//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::SendSms;
pub use response::{InboundWebhookEvent, OutboundResult, ProviderError, ResponseStatus};
pub use validation::ValidationError;
pub use value::{AccountSid, AuthToken, Credentials, MessageBody, PhoneNumber, RawPhoneNumber};
