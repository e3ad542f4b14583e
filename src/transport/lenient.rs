use serde::Deserialize;
use serde::de::Error as DeError;

/// Text field that Twilio documents as a string but sometimes sends as a JSON number
/// (`price`, `error_code`, `num_segments`, ...).
///
/// For numbers, the raw JSON token is preserved (`-0.00750` stays `"-0.00750"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportText(String);

impl TransportText {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom(
                "expected text field to be JSON string or number",
            )),
        }
    }
}
