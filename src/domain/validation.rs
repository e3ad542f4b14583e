use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingSettings { fields: Vec<&'static str> },
    InvalidPhoneNumber { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingSettings { fields } => {
                write!(f, "some things aren't set: {}", join_without_oxford_comma(fields))
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

fn join_without_oxford_comma(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "Body" };
        assert_eq!(err.to_string(), "Body must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");
    }

    #[test]
    fn missing_settings_are_listed_without_oxford_comma() {
        let err = ValidationError::MissingSettings {
            fields: vec!["SID"],
        };
        assert_eq!(err.to_string(), "some things aren't set: SID");

        let err = ValidationError::MissingSettings {
            fields: vec!["SID", "auth token"],
        };
        assert_eq!(err.to_string(), "some things aren't set: SID and auth token");

        let err = ValidationError::MissingSettings {
            fields: vec!["SID", "auth token", "phone number"],
        };
        assert_eq!(
            err.to_string(),
            "some things aren't set: SID, auth token and phone number"
        );
    }
}
