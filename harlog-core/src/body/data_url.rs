use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// `data:<content-type>;base64,<bytes>`
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

pub(crate) fn base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
