use crate::body::encode_body;
use crate::capture::CapturedRequest;
use crate::har::{HarRequest, NameValue};
use crate::normalization::{absolute_url, content_type, http_version, query_pairs};
use crate::redaction::FieldFilter;
use crate::serialize::UNKNOWN_SIZE;
use bytes::Bytes;

/// Everything about a request that is known before its body arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestHead {
    pub method: String,
    pub url: String,
    pub http_version: String,
    /// Filtered header pairs.
    pub headers: Vec<NameValue>,
    /// Filtered query pairs.
    pub query_string: Vec<NameValue>,
    /// Declared content type, taken before filtering so a redacted header still
    /// drives body classification.
    pub content_type: Option<String>,
}

impl RequestHead {
    /// Captures the head of `req`. A `log_path` is used verbatim in place of the
    /// reconstructed absolute URL.
    pub fn capture<R>(req: &R, log_path: Option<&str>, filter: &FieldFilter) -> Self
    where
        R: CapturedRequest + ?Sized,
    {
        let url = match log_path {
            Some(path) => path.to_owned(),
            None => absolute_url(req.uri(), req.headers()),
        };

        let headers = req.header_pairs();
        let content_type = content_type(&headers).map(str::to_owned);

        Self {
            method: req.method().as_str().to_owned(),
            url,
            http_version: http_version(req.version()).to_owned(),
            query_string: filter.filter(query_pairs(req.uri().query())),
            headers: filter.filter(headers),
            content_type,
        }
    }

    /// Completes the record with the (possibly absent) body.
    pub fn into_record(self, body: Option<&Bytes>, filter: &FieldFilter) -> HarRequest {
        let post_data = body.and_then(|b| encode_body(self.content_type.as_deref(), b, filter));

        HarRequest {
            method: self.method,
            url: self.url,
            http_version: self.http_version,
            headers: self.headers,
            query_string: self.query_string,
            post_data,
            cookies: Vec::new(),
            headers_size: UNKNOWN_SIZE,
            body_size: UNKNOWN_SIZE,
        }
    }
}
