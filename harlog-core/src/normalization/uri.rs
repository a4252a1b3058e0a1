use http::header::HOST;
use http::{HeaderMap, Uri, Version};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Reconstructs the absolute URL of a request.
///
/// An absolute-form URI (as seen by proxies and HTTP/2 servers) is used as is.
/// Origin-form URIs are completed from `X-Forwarded-Proto` (else `http`) and the
/// `Host` header (else `localhost`).
pub fn absolute_url(uri: &Uri, headers: &HeaderMap) -> String {
    if uri.scheme().is_some() && uri.authority().is_some() {
        return uri.to_string();
    }

    let scheme = uri
        .scheme_str()
        .map(str::to_owned)
        .or_else(|| first_token(headers, FORWARDED_PROTO))
        .unwrap_or_else(|| "http".to_owned());

    let host = uri
        .authority()
        .map(|a| a.as_str().to_owned())
        .or_else(|| first_token(headers, HOST.as_str()))
        .unwrap_or_else(|| "localhost".to_owned());

    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    format!("{scheme}://{host}{path_and_query}")
}

fn first_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// HAR spelling of the protocol version.
pub fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/1.1",
    }
}
