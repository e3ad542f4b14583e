use chrono::{DateTime, FixedOffset, Weekday};

use super::{DecodeError, TimestampError};

/// Layout of Twilio's `date_*` fields after the `"<Wdy>, "` prefix, e.g.
/// `30 Jul 2015 20:12:31 +0000`. The day of month may be one or two digits.
pub const PROVIDER_DATE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// Parse one provider timestamp. Missing or empty input is `None`, not an error.
///
/// The leading weekday must be a three-letter weekday name but is not checked against the
/// date itself.
pub fn parse_provider_timestamp(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, DecodeError> {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return Ok(None);
    };

    parse_layout(value)
        .map(Some)
        .map_err(|source| DecodeError::Timestamp {
            field,
            value: value.to_owned(),
            source,
        })
}

fn parse_layout(value: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let (weekday, date) = value.split_once(", ").unwrap_or(("", value));
    match weekday.parse::<Weekday>() {
        Ok(_) if weekday.len() == 3 => {}
        _ => return Err(TimestampError::Weekday(weekday.to_owned())),
    }
    Ok(DateTime::parse_from_str(date, PROVIDER_DATE_FORMAT)?)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::*;

    #[test]
    fn parses_reference_layout() {
        let parsed = parse_provider_timestamp("date_created", Some("Mon, 2 Jan 2006 15:04:05 +0000"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap());
    }

    #[test]
    fn keeps_the_provider_offset() {
        let parsed = parse_provider_timestamp("date_sent", Some("Mon, 2 Jan 2006 15:04:05 -0700"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.offset(), &FixedOffset::west_opt(7 * 3600).unwrap());
        assert_eq!(parsed, Utc.with_ymd_and_hms(2006, 1, 2, 22, 4, 5).unwrap());
    }

    #[test]
    fn accepts_two_digit_days() {
        let parsed = parse_provider_timestamp("date_updated", Some("Thu, 30 Jul 2015 20:12:31 +0000"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2015, 7, 30, 20, 12, 31).unwrap());
    }

    #[test]
    fn weekday_is_not_checked_against_the_date() {
        let parsed = parse_provider_timestamp("date_created", Some("Tue, 2 Jan 2006 15:04:05 +0000"))
            .unwrap()
            .unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap());
    }

    #[test]
    fn weekday_must_be_an_abbreviated_name() {
        for value in [
            "Foo, 2 Jan 2006 15:04:05 +0000",
            "Monday, 2 Jan 2006 15:04:05 +0000",
            "2 Jan 2006 15:04:05 +0000",
        ] {
            let err = parse_provider_timestamp("date_sent", Some(value)).unwrap_err();
            assert!(
                matches!(
                    err,
                    DecodeError::Timestamp {
                        source: TimestampError::Weekday(_),
                        ..
                    }
                ),
                "{value}: {err:?}"
            );
        }
    }

    #[test]
    fn empty_or_missing_is_none() {
        assert_eq!(parse_provider_timestamp("date_sent", Some("")).unwrap(), None);
        assert_eq!(parse_provider_timestamp("date_sent", None).unwrap(), None);
    }

    #[test]
    fn malformed_value_names_the_field() {
        let err = parse_provider_timestamp("date_created", Some("not-a-date")).unwrap_err();
        match err {
            DecodeError::Timestamp { field, value, .. } => {
                assert_eq!(field, "date_created");
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(parse_provider_timestamp("date_created", Some("2006-01-02T15:04:05Z")).is_err());
        assert!(parse_provider_timestamp("date_created", Some("Mon, 2 Jan 2006 15:04:05")).is_err());
    }
}
