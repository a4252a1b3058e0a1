//! Minimal capability interface over a live request/response pair.
//!
//! The pipeline never touches a framework's own request or response types. A
//! binding implements [`CapturedRequest`] and [`CapturedResponse`] (or wraps its
//! `http` types in [`BufferedRequest`] / [`BufferedResponse`]) and hands them to
//! the payload assembler.

mod error;
mod http_adapter;

pub use error::*;
pub use http_adapter::*;

use async_trait::async_trait;
use bytes::Bytes;
use crate::har::NameValue;
use crate::normalization::header_pairs;
use http::{HeaderMap, Method, StatusCode, Uri, Version};
use std::net::IpAddr;

#[async_trait]
pub trait CapturedRequest: Send {
    fn method(&self) -> &Method;

    /// Request target as received; may be origin-form or absolute-form.
    fn uri(&self) -> &Uri;

    fn version(&self) -> Version;

    fn headers(&self) -> &HeaderMap;

    /// Headers as ordered `{name, value}` pairs, names spelled as received.
    ///
    /// The default flattens [`Self::headers`], which loses the received case and
    /// the interleaving of different names. Adapters that see the raw header block
    /// should override it.
    fn header_pairs(&self) -> Vec<NameValue> {
        header_pairs(self.headers())
    }

    /// Network origin of the request, when the transport knows it.
    fn client_addr(&self) -> Option<IpAddr>;

    /// Buffers and returns the full body. This is the only suspension point of
    /// the pipeline.
    async fn body(&mut self) -> Result<Bytes, BodyReadError>;
}

#[async_trait]
pub trait CapturedResponse: Send {
    fn status(&self) -> StatusCode;

    /// Reason phrase sent on the wire, if the framework exposes one.
    fn status_text(&self) -> Option<&str> {
        None
    }

    fn version(&self) -> Version;

    fn headers(&self) -> &HeaderMap;

    /// Headers as ordered `{name, value}` pairs, names spelled as received.
    ///
    /// The default flattens [`Self::headers`], which loses the received case and
    /// the interleaving of different names. Adapters that see the raw header block
    /// should override it.
    fn header_pairs(&self) -> Vec<NameValue> {
        header_pairs(self.headers())
    }

    async fn body(&mut self) -> Result<Bytes, BodyReadError>;
}
