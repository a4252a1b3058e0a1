use crate::body::multipart::{split_params, unquote};
use mime_guess::Mime;

/// How a body is interpreted, decided from its declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    /// `application/json` or any `+json` vendored type.
    Json,
    /// `application/x-www-form-urlencoded`.
    UrlEncodedForm,
    /// `multipart/form-data` with its boundary.
    Multipart { boundary: String },
    /// `multipart/form-data` whose boundary is missing. The body cannot be split,
    /// but it still carries form fields.
    UnsplittableMultipart,
    /// Anything else, including absent or unparseable content types.
    Text,
}

/// Classifies on the media type alone. Parameters are scanned separately, so a
/// header that a strict MIME parser rejects (an unquoted boundary containing `=`,
/// say) still lands in the right kind.
pub fn classify(content_type: Option<&str>) -> ContentKind {
    let Some(content_type) = content_type else {
        return ContentKind::Text;
    };
    let (essence, params) = split_media_type(content_type);

    let Ok(mime) = essence.parse::<Mime>() else {
        return ContentKind::Text;
    };
    let type_ = mime.type_();
    let subtype = mime.subtype();

    let is_json = (type_ == "application" && subtype == "json")
        || mime.suffix().is_some_and(|suffix| suffix == "json");
    if is_json {
        return ContentKind::Json;
    }

    if type_ == "application" && subtype == "x-www-form-urlencoded" {
        return ContentKind::UrlEncodedForm;
    }

    if type_ == "multipart" && subtype == "form-data" {
        return match media_type_param(params, "boundary") {
            Some(boundary) => ContentKind::Multipart { boundary },
            None => ContentKind::UnsplittableMultipart,
        };
    }

    ContentKind::Text
}

fn split_media_type(content_type: &str) -> (&str, &str) {
    match content_type.split_once(';') {
        Some((essence, params)) => (essence.trim(), params),
        None => (content_type.trim(), ""),
    }
}

/// Looks up a `name=value` parameter. Only the first `=` of a parameter separates
/// name from value; quoted values are unquoted. Empty values count as absent.
fn media_type_param(params: &str, name: &str) -> Option<String> {
    split_params(params)
        .iter()
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        .map(|(_, value)| unquote(value.trim()))
        .filter(|value| !value.is_empty())
}
