use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Renders a timestamp as ISO-8601 with millisecond precision and a `Z` designator.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}
