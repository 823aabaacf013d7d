//! Field decoders that never fail.
//!
//! A data file edited by hand or written by an older build may carry a
//! wrong type in any field. Each decoder takes whatever JSON value is
//! present and falls back to the type's default instead of rejecting the
//! whole record. Combine with `#[serde(default)]` for missing keys.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::color::Color;

pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

pub(crate) fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_timestamp(&s).unwrap_or_default(),
        _ => DateTime::<Utc>::default(),
    })
}

pub(crate) fn color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.parse().unwrap_or_default(),
        _ => Color::default(),
    })
}

/// RFC 3339 first; offset-less ISO-8601 (as older files store local
/// time without a zone) is taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
