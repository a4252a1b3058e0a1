//! Body classification and encoding.
//!
//! A raw body is first classified by its declared content type, then decoded into
//! a [`DecodedBody`]. Field filtering runs on the decoded form, never on raw bytes,
//! and [`DecodedBody::into_record`] produces the final [`BodyRecord`].

mod classify;
mod data_url;
mod multipart;
mod record;
#[cfg(test)]
mod tests;

pub use classify::*;
pub use data_url::data_url;
pub use multipart::*;
pub use record::*;

use crate::normalization::decode_pairs;
use crate::redaction::{FieldFilter, REDACTED};
use bytes::Bytes;
use serde_json::Value;
use tracing::debug;

/// MIME type reported for bodies sent without a content type.
pub const DEFAULT_TEXT_MIME: &str = "text/plain";

/// A classified body, before field filtering.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    /// JSON text; its structure is only decoded if filtering needs it.
    Json { mime_type: String, raw: Bytes },
    /// Form fields from a URL-encoded or multipart body.
    Params { mime_type: String, params: Vec<Param> },
    /// Raw content with no field structure.
    Text { mime_type: String, raw: Bytes },
    /// A form body that could not be split into fields. Its raw text may hold
    /// filtered fields, so it is masked whenever a filter is active.
    Opaque { mime_type: String, raw: Bytes },
}

/// Classifies and decodes a body. Empty bodies yield `None`.
///
/// Malformed multipart bodies degrade to [`DecodedBody::Opaque`] with the declared
/// MIME type.
pub fn decode_body(content_type: Option<&str>, body: &Bytes) -> Option<DecodedBody> {
    if body.is_empty() {
        return None;
    }

    let mime_type = content_type.unwrap_or(DEFAULT_TEXT_MIME).to_owned();

    let decoded = match classify(content_type) {
        ContentKind::Json => DecodedBody::Json {
            mime_type,
            raw: body.clone(),
        },
        ContentKind::UrlEncodedForm => DecodedBody::Params {
            mime_type,
            params: decode_pairs(body)
                .into_iter()
                .map(|pair| Param::field(pair.name, pair.value))
                .collect(),
        },
        ContentKind::Multipart { boundary } => match parse_multipart(body, &boundary) {
            Ok(parts) => DecodedBody::Params {
                mime_type,
                params: parts_to_params(parts),
            },
            Err(error) => {
                debug!(%error, "multipart body could not be decoded");
                DecodedBody::Opaque {
                    mime_type,
                    raw: body.clone(),
                }
            }
        },
        ContentKind::UnsplittableMultipart => {
            debug!("multipart body has no boundary");
            DecodedBody::Opaque {
                mime_type,
                raw: body.clone(),
            }
        }
        ContentKind::Text => DecodedBody::Text {
            mime_type,
            raw: body.clone(),
        },
    };

    Some(decoded)
}

/// Classifies, decodes and filters a body in one step.
pub fn encode_body(
    content_type: Option<&str>,
    body: &Bytes,
    filter: &FieldFilter,
) -> Option<BodyRecord> {
    decode_body(content_type, body).map(|decoded| decoded.into_record(filter))
}

impl DecodedBody {
    pub fn mime_type(&self) -> &str {
        match self {
            Self::Json { mime_type, .. }
            | Self::Params { mime_type, .. }
            | Self::Text { mime_type, .. }
            | Self::Opaque { mime_type, .. } => mime_type,
        }
    }

    /// Applies the field filter and produces the wire record.
    pub fn into_record(self, filter: &FieldFilter) -> BodyRecord {
        match self {
            Self::Json { mime_type, raw } => {
                let payload = match std::str::from_utf8(&raw) {
                    Ok(text) => BodyPayload::Text {
                        text: filter_json_text(text, filter),
                        encoding: None,
                    },
                    Err(_) => binary_payload(&raw),
                };
                BodyRecord { mime_type, payload }
            }
            Self::Params { mime_type, params } => {
                BodyRecord::params(mime_type, filter.filter(params))
            }
            Self::Text { mime_type, raw } => BodyRecord {
                mime_type,
                payload: text_payload(&raw),
            },
            Self::Opaque { mime_type, .. } if filter.is_active() => {
                BodyRecord::text(mime_type, REDACTED)
            }
            Self::Opaque { mime_type, raw } => BodyRecord {
                mime_type,
                payload: text_payload(&raw),
            },
        }
    }
}

/// Redacts a JSON document, echoing the original text unless a value changed.
fn filter_json_text(text: &str, filter: &FieldFilter) -> String {
    if !filter.is_active() {
        return text.to_owned();
    }

    let mut document = match serde_json::from_str::<Value>(text) {
        Ok(document) => document,
        Err(error) => {
            debug!(%error, "json body did not parse; keeping raw text");
            return text.to_owned();
        }
    };

    if !filter.apply_json(&mut document) {
        return text.to_owned();
    }

    serde_json::to_string(&document).unwrap_or_else(|_| text.to_owned())
}

fn text_payload(raw: &[u8]) -> BodyPayload {
    match std::str::from_utf8(raw) {
        Ok(text) => BodyPayload::Text {
            text: text.to_owned(),
            encoding: None,
        },
        Err(_) => binary_payload(raw),
    }
}

fn binary_payload(raw: &[u8]) -> BodyPayload {
    debug!(bytes = raw.len(), "body is not valid UTF-8; encoding as base64");
    BodyPayload::Text {
        text: data_url::base64(raw),
        encoding: Some(TextEncoding::Base64),
    }
}
