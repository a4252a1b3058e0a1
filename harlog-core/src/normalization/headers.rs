use crate::har::NameValue;
use http::HeaderMap;
use http::header::CONTENT_TYPE;

/// Flattens a header map into ordered `{name, value}` pairs.
///
/// Every value of a repeated header becomes its own pair. `HeaderMap` stores names
/// in lowercase and yields all values of one name together, so received case and
/// interleaving between different names are not recoverable from it. Values that
/// are not valid UTF-8 are decoded lossily so that a header is never silently
/// dropped.
pub fn header_pairs(headers: &HeaderMap) -> Vec<NameValue> {
    headers
        .iter()
        .map(|(name, value)| {
            NameValue::new(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// The declared `Content-Type` among header pairs, if present and non-blank.
pub fn content_type(pairs: &[NameValue]) -> Option<&str> {
    find_pair(pairs, CONTENT_TYPE.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Looks up a header among already-normalized pairs (names compared ASCII case-insensitively).
pub fn find_pair<'a>(pairs: &'a [NameValue], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(|p| p.value.as_str())
}
