use crate::capture::{BodyReadError, CapturedRequest, CapturedResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, StatusCode, Uri, Version, request, response};
use http_body::Body;
use http_body_util::BodyExt;
use std::error::Error;
use std::net::{IpAddr, SocketAddr};

/// Lifecycle of a wrapped body. Once collected the bytes are kept so that repeated
/// reads return the same content.
#[derive(Debug)]
enum BodyState<B> {
    Pending(B),
    Ready(Bytes),
    Failed,
}

impl<B> BodyState<B>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    async fn read(&mut self) -> Result<Bytes, BodyReadError> {
        match std::mem::replace(self, Self::Failed) {
            Self::Pending(body) => {
                let bytes = body
                    .collect()
                    .await
                    .map_err(BodyReadError::stream)?
                    .to_bytes();
                *self = Self::Ready(bytes.clone());
                Ok(bytes)
            }
            Self::Ready(bytes) => {
                *self = Self::Ready(bytes.clone());
                Ok(bytes)
            }
            Self::Failed => Err(BodyReadError::Consumed),
        }
    }
}

//-----------------------------------------------------------------------------
// Request
//-----------------------------------------------------------------------------

/// [`CapturedRequest`] over an `http::Request` with any [`Body`].
///
/// Header pairs come from the request's `HeaderMap`: names are lowercase and all
/// values of a repeated name are adjacent.
#[derive(Debug)]
pub struct BufferedRequest<B> {
    parts: request::Parts,
    body: BodyState<B>,
    client_addr: Option<IpAddr>,
}

impl<B> BufferedRequest<B> {
    /// Wraps a request. The client address defaults to a `SocketAddr` found in the
    /// request extensions, as inserted by most connection-aware servers.
    pub fn new(req: Request<B>) -> Self {
        let (parts, body) = req.into_parts();
        let client_addr = parts.extensions.get::<SocketAddr>().map(SocketAddr::ip);
        Self {
            parts,
            body: BodyState::Pending(body),
            client_addr,
        }
    }

    pub fn with_client_addr(mut self, addr: IpAddr) -> Self {
        self.client_addr = Some(addr);
        self
    }

    pub fn parts(&self) -> &request::Parts {
        &self.parts
    }
}

impl<B> From<Request<B>> for BufferedRequest<B> {
    fn from(req: Request<B>) -> Self {
        Self::new(req)
    }
}

#[async_trait]
impl<B> CapturedRequest for BufferedRequest<B>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    fn method(&self) -> &Method {
        &self.parts.method
    }

    fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    fn version(&self) -> Version {
        self.parts.version
    }

    fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    fn client_addr(&self) -> Option<IpAddr> {
        self.client_addr
    }

    async fn body(&mut self) -> Result<Bytes, BodyReadError> {
        self.body.read().await
    }
}

//-----------------------------------------------------------------------------
// Response
//-----------------------------------------------------------------------------

/// [`CapturedResponse`] over an `http::Response` with any [`Body`].
///
/// Header pairs have the same `HeaderMap` shape as [`BufferedRequest`]'s.
#[derive(Debug)]
pub struct BufferedResponse<B> {
    parts: response::Parts,
    body: BodyState<B>,
    status_text: Option<String>,
}

impl<B> BufferedResponse<B> {
    pub fn new(res: Response<B>) -> Self {
        let (parts, body) = res.into_parts();
        Self {
            parts,
            body: BodyState::Pending(body),
            status_text: None,
        }
    }

    /// Overrides the canonical reason phrase of the status code.
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    pub fn parts(&self) -> &response::Parts {
        &self.parts
    }
}

impl<B> From<Response<B>> for BufferedResponse<B> {
    fn from(res: Response<B>) -> Self {
        Self::new(res)
    }
}

#[async_trait]
impl<B> CapturedResponse for BufferedResponse<B>
where
    B: Body + Send,
    B::Data: Send,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    fn status(&self) -> StatusCode {
        self.parts.status
    }

    fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    fn version(&self) -> Version {
        self.parts.version
    }

    fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    async fn body(&mut self) -> Result<Bytes, BodyReadError> {
        self.body.read().await
    }
}
