use bytes::Bytes;
use harlog_core::{BufferedRequest, BufferedResponse};
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use std::net::IpAddr;

/// Builder for one request/response pair wrapped in the `http` adapters.
#[derive(Debug, Clone)]
pub struct Exchange {
    method: Method,
    uri: String,
    request_headers: Vec<(String, String)>,
    request_body: Bytes,
    client_addr: Option<IpAddr>,
    status: StatusCode,
    response_headers: Vec<(String, String)>,
    response_body: Bytes,
}

impl Default for Exchange {
    fn default() -> Self {
        Self {
            method: Method::GET,
            uri: "/".to_owned(),
            request_headers: vec![("host".to_owned(), "api.example.com".to_owned())],
            request_body: Bytes::new(),
            client_addr: None,
            status: StatusCode::OK,
            response_headers: Vec::new(),
            response_body: Bytes::new(),
        }
    }
}

impl Exchange {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            ..Self::default()
        }
    }

    pub fn request_header(mut self, name: &str, value: &str) -> Self {
        self.request_headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn request_body(mut self, content_type: &str, body: impl Into<Bytes>) -> Self {
        self.request_body = body.into();
        self.request_header("content-type", content_type)
    }

    /// Sets a request body without declaring its content type.
    pub fn untyped_request_body(mut self, body: impl Into<Bytes>) -> Self {
        self.request_body = body.into();
        self
    }

    pub fn client_addr(mut self, addr: IpAddr) -> Self {
        self.client_addr = Some(addr);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn response_header(mut self, name: &str, value: &str) -> Self {
        self.response_headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn response_body(mut self, content_type: &str, body: impl Into<Bytes>) -> Self {
        self.response_body = body.into();
        self.response_header("content-type", content_type)
    }

    pub fn build(self) -> (BufferedRequest<Full<Bytes>>, BufferedResponse<Full<Bytes>>) {
        let mut req = Request::builder().method(self.method).uri(self.uri);
        for (name, value) in &self.request_headers {
            req = req.header(name.as_str(), value.as_str());
        }
        let req = req
            .body(Full::new(self.request_body))
            .expect("invalid test request");

        let mut res = Response::builder().status(self.status);
        for (name, value) in &self.response_headers {
            res = res.header(name.as_str(), value.as_str());
        }
        let res = res
            .body(Full::new(self.response_body))
            .expect("invalid test response");

        let mut req = BufferedRequest::new(req);
        if let Some(addr) = self.client_addr {
            req = req.with_client_addr(addr);
        }
        (req, BufferedResponse::new(res))
    }
}

/// One part of a hand-built multipart body.
pub enum Part<'a> {
    Field(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Encodes `parts` as `multipart/form-data` with the given boundary.
pub fn multipart_body(boundary: &str, parts: &[Part<'_>]) -> Bytes {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part {
            Part::Field(name, value) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(data);
            }
        }
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    Bytes::from(out)
}
