//! Lenient calendar-date decoding for backend payloads.
//!
//! Stock rows come back with `in_day` / `exp_day` as `YYYY-MM-DD` strings, but
//! partial records (nulls, empty strings, timestamps, garbage) must not take the
//! whole medication list down. Anything that is not a recognizable date decodes
//! to `None`, which the expiry classifier reads as "no expiry constraint known".

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a backend date string at day granularity.
///
/// Accepts plain dates, RFC 3339 timestamps and naive `T`-separated
/// timestamps; the time-of-day part is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }

    tracing::warn!(value = raw, "unrecognized date in stock payload; treating as unknown");
    None
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Other(IgnoredAny),
}

/// `#[serde(with = "dates::lenient")]` adapter for `Option<NaiveDate>` fields.
pub mod lenient {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawDate>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawDate::Text(text)) => parse_date(&text),
            Some(RawDate::Other(_)) => {
                tracing::warn!("non-string date in stock payload; treating as unknown");
                None
            }
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(default, with = "lenient")]
        day: Option<NaiveDate>,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        assert_eq!(parse_date("2024-06-01"), Some(date(2024, 6, 1)));
        assert_eq!(parse_date(" 2024-06-01 "), Some(date(2024, 6, 1)));
        assert_eq!(parse_date("2024-06-01T23:59:59Z"), Some(date(2024, 6, 1)));
        assert_eq!(parse_date("2024-06-01T08:30:00"), Some(date(2024, 6, 1)));
    }

    #[test]
    fn garbage_and_blank_become_unknown() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn decodes_missing_null_and_malformed_fields_as_none() {
        let missing: Row = serde_json::from_str("{}").unwrap();
        let null: Row = serde_json::from_str(r#"{"day":null}"#).unwrap();
        let number: Row = serde_json::from_str(r#"{"day":20240601}"#).unwrap();
        let text: Row = serde_json::from_str(r#"{"day":"soon"}"#).unwrap();
        assert_eq!(missing.day, None);
        assert_eq!(null.day, None);
        assert_eq!(number.day, None);
        assert_eq!(text.day, None);
    }

    #[test]
    fn serializes_as_iso_date() {
        let row = Row { day: Some(date(2025, 1, 1)) };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"day":"2025-01-01"}"#);
    }
}
