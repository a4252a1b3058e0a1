use crate::body::{BodyPayload, BodyRecord, TextEncoding, encode_body};
use crate::capture::CapturedResponse;
use crate::har::{HarResponse, NameValue, ResponseContent};
use crate::normalization::{content_type, find_pair, http_version};
use crate::redaction::FieldFilter;
use crate::serialize::UNKNOWN_SIZE;
use bytes::Bytes;
use http::header::LOCATION;

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseHead {
    pub status: u16,
    pub status_text: String,
    pub http_version: String,
    /// Filtered header pairs.
    pub headers: Vec<NameValue>,
    pub content_type: Option<String>,
}

impl ResponseHead {
    pub fn capture<R>(res: &R, filter: &FieldFilter) -> Self
    where
        R: CapturedResponse + ?Sized,
    {
        let status = res.status();
        let status_text = res
            .status_text()
            .or_else(|| status.canonical_reason())
            .unwrap_or_default()
            .to_owned();

        // Content type is read before filtering so a redacted header still drives
        // body classification.
        let headers = res.header_pairs();
        let content_type = content_type(&headers).map(str::to_owned);

        Self {
            status: status.as_u16(),
            status_text,
            http_version: http_version(res.version()).to_owned(),
            headers: filter.filter(headers),
            content_type,
        }
    }

    pub fn into_record(self, body: Option<&Bytes>, filter: &FieldFilter) -> HarResponse {
        let content = body.and_then(|raw| {
            encode_body(self.content_type.as_deref(), raw, filter).map(|record| {
                let size = content_size(&record, raw);
                ResponseContent { body: record, size }
            })
        });

        // The location header has already been through the filter, so a redacted
        // location stays redacted here.
        let redirect_url = find_pair(&self.headers, LOCATION.as_str())
            .unwrap_or_default()
            .to_owned();

        HarResponse {
            status: self.status,
            status_text: self.status_text,
            http_version: self.http_version,
            headers: self.headers,
            content,
            cookies: Vec::new(),
            redirect_url,
            headers_size: UNKNOWN_SIZE,
            body_size: UNKNOWN_SIZE,
        }
    }
}

/// Byte length of the final textual content. Base64 and params forms report the
/// length of the raw body instead.
fn content_size(record: &BodyRecord, raw: &Bytes) -> usize {
    match &record.payload {
        BodyPayload::Text {
            text,
            encoding: None,
        } => text.len(),
        BodyPayload::Text {
            encoding: Some(TextEncoding::Base64),
            ..
        }
        | BodyPayload::Params { .. } => raw.len(),
    }
}
