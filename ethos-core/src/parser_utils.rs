//! Common parser utilities for Ethos API records.
//!
//! Dates arrive as ISO-8601 strings and are normalised to UTC. They are
//! rendered back with millisecond precision and a `Z` suffix
//! (`2024-01-15T10:30:00.000Z`).

use crate::error::{Error, ParseError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Canonical textual form of record timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parses an ISO-8601 timestamp into UTC.
///
/// Accepts RFC 3339 with any offset, a naive date-time (taken as UTC) and a
/// bare date (midnight UTC).
///
/// ```rust
/// use ethos_core::parser_utils::{format_datetime, parse_datetime};
///
/// let dt = parse_datetime("2024-01-15T12:30:00+02:00").unwrap();
/// assert_eq!(format_datetime(&dt), "2024-01-15T10:30:00.000Z");
/// ```
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            Error::from(ParseError::timestamp_owned(format!(
                "unrecognised date {input:?}"
            )))
        })
}

/// Renders a timestamp in [`DATETIME_FORMAT`].
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Deserializes one raw API record, naming the record type on failure.
pub fn parse_record<T: DeserializeOwned>(value: Value, record: &'static str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        Error::from(ParseError::invalid_value(record, e.to_string()))
    })
}

/// Deserializes `null` as `T::default()`, for fields the API may null out.
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde adapter for optional timestamps.
///
/// Missing, `null` and empty values deserialize to `None`; `None` serializes
/// as `null`.
pub mod option_datetime {
    use super::{format_datetime, parse_datetime};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    #[allow(missing_docs)]
    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&format_datetime(dt)),
            None => serializer.serialize_none(),
        }
    }

    #[allow(missing_docs)]
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                parse_datetime(&raw).map(Some).map_err(de::Error::custom)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(default, with = "option_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = "2024-01-15T10:30:00.000Z";
        assert_eq!(format_datetime(&parse_datetime("2024-01-15T10:30:00Z").unwrap()), expected);
        assert_eq!(format_datetime(&parse_datetime("2024-01-15T10:30:00.000Z").unwrap()), expected);
        assert_eq!(format_datetime(&parse_datetime("2024-01-15T10:30:00").unwrap()), expected);
        assert_eq!(
            format_datetime(&parse_datetime("2024-01-15").unwrap()),
            "2024-01-15T00:00:00.000Z"
        );
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_option_datetime_serde() {
        let parsed: Stamped = serde_json::from_value(json!({"at": "2024-03-01T08:00:00.5Z"})).unwrap();
        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({"at": "2024-03-01T08:00:00.500Z"})
        );

        let missing: Stamped = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.at, None);
        let null: Stamped = serde_json::from_value(json!({"at": null})).unwrap();
        assert_eq!(null.at, None);
        let empty: Stamped = serde_json::from_value(json!({"at": ""})).unwrap();
        assert_eq!(empty.at, None);

        assert!(serde_json::from_value::<Stamped>(json!({"at": "soon"})).is_err());
    }

    #[test]
    fn test_null_as_default() {
        #[derive(Debug, Deserialize)]
        struct Counts {
            #[serde(default, deserialize_with = "null_as_default")]
            total: u64,
        }
        let counts: Counts = serde_json::from_value(json!({"total": null})).unwrap();
        assert_eq!(counts.total, 0);
        let counts: Counts = serde_json::from_value(json!({"total": 4})).unwrap();
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn test_parse_record_names_record() {
        #[derive(Debug, Deserialize)]
        struct Needs {
            #[allow(dead_code)]
            id: u64,
        }
        let err = parse_record::<Needs>(json!({}), "Profile").unwrap_err();
        assert!(err.to_string().contains("Profile"));
    }
}
