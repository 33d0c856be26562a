//! Timestamp encoding shared by every stored record.
//!
//! Timestamps are written as RFC 3339 strings with a fixed microsecond
//! precision so that the lexicographic order MongoDB uses when sorting
//! strings matches chronological order. Reading accepts any RFC 3339 value.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

/// Render a timestamp in the stored representation.
pub fn format(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}
