use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account SID (`AC...`).
///
/// Invariant: non-empty after trimming. Used as the basic-auth username and inside the
/// `Accounts/{sid}/Messages.json` path.
pub struct AccountSid(String);

impl AccountSid {
    /// Human-readable name used in validation errors.
    pub const LABEL: &'static str = "SID";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::LABEL });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Twilio auth token, sent as the basic-auth password.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct AuthToken(String);

impl AuthToken {
    /// Human-readable name used in validation errors.
    pub const LABEL: &'static str = "auth token";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::LABEL });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to Twilio (`To` / `From`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Human-readable name used in validation errors.
    pub const LABEL: &'static str = "phone number";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::LABEL });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Twilio.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::LABEL,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`Body`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageBody(String);

impl MessageBody {
    /// Form field name used by Twilio (`Body`).
    pub const FIELD: &'static str = "Body";

    /// Create a validated message body.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message body as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
/// Everything needed to talk to the Messages endpoint on behalf of one account.
///
/// Build it once at startup and hand it to [`crate::TwilioClient`]; nothing in this crate reads
/// the process environment.
pub struct Credentials {
    account_sid: AccountSid,
    auth_token: AuthToken,
    phone_number: RawPhoneNumber,
}

impl Credentials {
    /// Validate all three settings, reporting every missing one at once.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let account_sid = AccountSid::new(account_sid);
        let auth_token = AuthToken::new(auth_token);
        let phone_number = RawPhoneNumber::new(phone_number);

        match (account_sid, auth_token, phone_number) {
            (Ok(account_sid), Ok(auth_token), Ok(phone_number)) => Ok(Self {
                account_sid,
                auth_token,
                phone_number,
            }),
            (account_sid, auth_token, phone_number) => {
                let mut fields = Vec::new();
                if account_sid.is_err() {
                    fields.push(AccountSid::LABEL);
                }
                if auth_token.is_err() {
                    fields.push(AuthToken::LABEL);
                }
                if phone_number.is_err() {
                    fields.push(RawPhoneNumber::LABEL);
                }
                Err(ValidationError::MissingSettings { fields })
            }
        }
    }

    /// Assemble credentials from already-validated parts.
    pub fn from_parts(
        account_sid: AccountSid,
        auth_token: AuthToken,
        phone_number: RawPhoneNumber,
    ) -> Self {
        Self {
            account_sid,
            auth_token,
            phone_number,
        }
    }

    pub fn account_sid(&self) -> &AccountSid {
        &self.account_sid
    }

    pub fn auth_token(&self) -> &AuthToken {
        &self.auth_token
    }

    /// Default sender number (`From`).
    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }
}
