use crate::domain::value::{MessageBody, RawPhoneNumber};

/// One outbound SMS.
///
/// The sender defaults to the number in [`crate::Credentials`]; use [`SendSms::from`] to
/// send from another number on the same account.
#[derive(Debug, Clone)]
pub struct SendSms {
    to: RawPhoneNumber,
    body: MessageBody,
    from: Option<RawPhoneNumber>,
}

impl SendSms {
    pub const TO_FIELD: &'static str = "To";
    pub const FROM_FIELD: &'static str = "From";

    pub fn new(to: RawPhoneNumber, body: MessageBody) -> Self {
        Self {
            to,
            body,
            from: None,
        }
    }

    /// Override the sender number for this message.
    pub fn from(mut self, from: RawPhoneNumber) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn sender(&self) -> Option<&RawPhoneNumber> {
        self.from.as_ref()
    }
}
