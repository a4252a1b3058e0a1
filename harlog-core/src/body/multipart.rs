use crate::body::{Param, data_url};
use bytes::Bytes;
use percent_encoding::percent_decode_str;
use thiserror::Error;

const FALLBACK_FILE_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultipartError {
    #[error("multipart boundary not found in body")]
    MissingBoundary,

    #[error("multipart body is not terminated by a closing boundary")]
    Unterminated,

    #[error("part {index} has no end of headers")]
    UnterminatedHeaders { index: usize },

    #[error("part {index} has no form-data disposition with a name")]
    MissingDisposition { index: usize },
}

/// One decoded `multipart/form-data` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Splits a buffered `multipart/form-data` body into its parts.
///
/// Parts are returned in body order. Part data is sliced from `body` without copying.
pub fn parse_multipart(body: &Bytes, boundary: &str) -> Result<Vec<Part>, MultipartError> {
    let delimiter = format!("--{boundary}");
    let delimiter = delimiter.as_bytes();
    let next_delimiter = format!("\r\n--{boundary}");
    let next_delimiter = next_delimiter.as_bytes();

    let mut pos = find(body, delimiter, 0).ok_or(MultipartError::MissingBoundary)?;
    let mut parts = Vec::new();

    loop {
        pos += delimiter.len();

        if body[pos..].starts_with(b"--") {
            return Ok(parts);
        }

        // Transport padding, then the line break ending the delimiter line.
        while pos < body.len() && matches!(body[pos], b' ' | b'\t') {
            pos += 1;
        }
        if body[pos..].starts_with(b"\r\n") {
            pos += 2;
        } else {
            return Err(MultipartError::Unterminated);
        }

        let end = find(body, next_delimiter, pos).ok_or(MultipartError::Unterminated)?;
        parts.push(parse_part(body.slice(pos..end), parts.len())?);

        // Skip the CRLF owned by the next delimiter.
        pos = end + 2;
    }
}

fn parse_part(raw: Bytes, index: usize) -> Result<Part, MultipartError> {
    let (head, data) = if raw.starts_with(b"\r\n") {
        (Bytes::new(), raw.slice(2..))
    } else {
        let split = find(&raw, b"\r\n\r\n", 0)
            .ok_or(MultipartError::UnterminatedHeaders { index })?;
        (raw.slice(..split), raw.slice(split + 4..))
    };

    let head = String::from_utf8_lossy(&head);
    let mut disposition = None;
    let mut content_type = None;

    for line in head.split("\r\n") {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if name.trim().eq_ignore_ascii_case("content-disposition") {
            disposition = Some(parse_disposition(value));
        } else if name.trim().eq_ignore_ascii_case("content-type") && !value.is_empty() {
            content_type = Some(value.to_owned());
        }
    }

    let Some(Disposition {
        name: Some(name),
        file_name,
    }) = disposition
    else {
        return Err(MultipartError::MissingDisposition { index });
    };

    Ok(Part {
        name,
        file_name,
        content_type,
        data,
    })
}

#[derive(Debug, Default)]
struct Disposition {
    name: Option<String>,
    file_name: Option<String>,
}

/// Parses `form-data; name="field"; filename="a.png"` (RFC 7578), including the
/// RFC 5987 `filename*=UTF-8''...` form, which takes precedence.
fn parse_disposition(value: &str) -> Disposition {
    let mut params = split_params(value).into_iter();
    let mut out = Disposition::default();

    if !params
        .next()
        .is_some_and(|kind| kind.trim().eq_ignore_ascii_case("form-data"))
    {
        return out;
    }

    let mut extended_file_name = None;
    for param in params {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let raw = raw.trim();
        match key.as_str() {
            "name" => out.name = Some(unquote(raw)),
            "filename" => out.file_name = Some(unquote(raw)),
            "filename*" => {
                extended_file_name = raw
                    .split_once("''")
                    .map(|(_, encoded)| percent_decode_str(encoded).decode_utf8_lossy().into_owned());
            }
            _ => {}
        }
    }

    if extended_file_name.is_some() {
        out.file_name = extended_file_name;
    }
    out
}

/// Splits on `;` outside of quoted strings.
/// Splits a header parameter list on `;`, ignoring separators inside quotes.
pub(crate) fn split_params(value: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut escaped = false;

    for c in value.chars() {
        match c {
            _ if escaped => {
                current.push(c);
                escaped = false;
            }
            '\\' if quoted => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                current.push(c);
                quoted = !quoted;
            }
            ';' if !quoted => out.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    out.push(current);
    out
}

pub(crate) fn unquote(raw: &str) -> String {
    match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else {
                    out.push(c);
                }
            }
            out
        }
        None => raw.to_owned(),
    }
}

/// Turns parts into params.
///
/// Scalar fields come first in first-occurrence order, with repeated names joined by
/// `,`. File parts follow in body order and carry a data URL of their bytes.
pub fn parts_to_params(parts: Vec<Part>) -> Vec<Param> {
    let mut fields: Vec<Param> = Vec::new();
    let mut files: Vec<Param> = Vec::new();

    for part in parts {
        match part.file_name {
            Some(file_name) => {
                let content_type = part
                    .content_type
                    .or_else(|| {
                        mime_guess::from_path(&file_name)
                            .first_raw()
                            .map(str::to_owned)
                    })
                    .unwrap_or_else(|| FALLBACK_FILE_TYPE.to_owned());
                let value = data_url(&content_type, &part.data);
                files.push(Param::file(&part.name, value, file_name, content_type));
            }
            None => {
                let value = String::from_utf8_lossy(&part.data);
                match fields.iter_mut().find(|p| p.name == part.name) {
                    Some(existing) => {
                        existing.value.push(',');
                        existing.value.push_str(&value);
                    }
                    None => fields.push(Param::field(part.name, value)),
                }
            }
        }
    }

    fields.extend(files);
    fields
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() || needle.is_empty() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}
