//! Timestamp formats used on the wire.

use chrono::{DateTime, Utc};
use serde::Serializer;

/// Millisecond precision, used for query offsets.
pub const MILLIS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Microsecond precision, used for dates inside request bodies.
pub const MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Formats a UTC timestamp with millisecond precision.
pub fn format_millis(value: &DateTime<Utc>) -> String {
    value.format(MILLIS_FORMAT).to_string()
}

/// Formats a UTC timestamp with microsecond precision.
pub fn format_micros(value: &DateTime<Utc>) -> String {
    value.format(MICROS_FORMAT).to_string()
}

pub(crate) fn serialize_micros_opt<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&format_micros(date)),
        None => serializer.serialize_none(),
    }
}
