//! Serde helpers for the backend date-time format
//!
//! The backend stores `YYYY-MM-DD HH:MM:SS`. Rows coming back may also carry
//! RFC 3339 timestamps (`2024-03-15T14:02:26.000Z`) or bare dates, so decoding
//! accepts all three; encoding always produces the storage format.
//!
//! Values are wall-clock times. An RFC 3339 offset is dropped, not applied, so
//! a loaded value is written back unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse any of the accepted wire representations
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, WIRE_FORMAT) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

/// `#[serde(with = "wire_datetime::option")]` for nullable columns
pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {}", s))),
        }
    }
}

/// `#[serde(with = "wire_datetime::required")]` for non-null columns
pub mod required {
    use super::*;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date-time: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 2, 26)
            .unwrap();
        assert_eq!(parse("2024-03-15 14:02:26"), Some(expected));
        assert_eq!(parse("2024-03-15T14:02:26.000Z"), Some(expected));
        assert_eq!(parse("2024-03-15T14:02:26"), Some(expected));
        assert_eq!(
            parse("2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_offset_keeps_wall_time() {
        let dt = parse("2025-01-20T08:30:00-05:00").unwrap();
        assert_eq!(format(&dt), "2025-01-20 08:30:00");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("15.03.2024"), None);
    }

    #[test]
    fn test_format_uses_storage_layout() {
        let dt = parse("2024-12-31T23:59:59Z").unwrap();
        assert_eq!(format(&dt), "2024-12-31 23:59:59");
    }
}
