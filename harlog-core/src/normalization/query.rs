use crate::har::NameValue;
use url::form_urlencoded;

/// Decodes a raw query string into ordered `{name, value}` pairs.
///
/// # Decoding Behavior
/// 1. Splits on `&`; empty segments are skipped
/// 2. A segment without `=` yields an empty value
/// 3. `+` decodes to a space and percent-encoded triplets are decoded (lossy UTF-8)
/// 4. Malformed percent triplets are kept literally
///
/// Ordering and duplicates are preserved exactly as received. Bracketed keys such as
/// `arr[1]` are not collapsed into nested structures; they surface as flat names so the
/// output is deterministic for a given input ordering.
pub fn query_pairs(query: Option<&str>) -> Vec<NameValue> {
    match query {
        None | Some("") => Vec::new(),
        Some(raw) => decode_pairs(raw.as_bytes()),
    }
}

/// Same decoding applied to an `application/x-www-form-urlencoded` payload.
pub fn decode_pairs(raw: &[u8]) -> Vec<NameValue> {
    form_urlencoded::parse(raw)
        .map(|(name, value)| NameValue::new(name, value))
        .collect()
}

/// Re-encodes pairs as `application/x-www-form-urlencoded`.
pub fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}
