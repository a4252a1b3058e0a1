use serde::Serialize;

/// Canonical body representation: a MIME type plus either raw text or decoded params.
///
/// Exactly one of `text`/`params` appears on the wire. An empty body never produces a
/// record at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyRecord {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(flatten)]
    pub payload: BodyPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BodyPayload {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        encoding: Option<TextEncoding>,
    },
    Params {
        params: Vec<Param>,
    },
}

/// Transfer encoding of a text payload that could not be carried as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Base64,
}

impl BodyRecord {
    pub fn text(mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: BodyPayload::Text {
                text: text.into(),
                encoding: None,
            },
        }
    }

    pub fn params(mime_type: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: BodyPayload::Params { params },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            BodyPayload::Text { text, .. } => Some(text),
            BodyPayload::Params { .. } => None,
        }
    }

    pub fn as_params(&self) -> Option<&[Param]> {
        match &self.payload {
            BodyPayload::Params { params } => Some(params),
            BodyPayload::Text { .. } => None,
        }
    }
}

/// A decoded form field. File parts also carry `file_name` and `content_type`, and their
/// value is a data URL of the file bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Param {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Field name as received, when `name` had to be sanitized.
    #[serde(skip)]
    original_name: Option<String>,
}

impl Param {
    pub fn field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            file_name: None,
            content_type: None,
            original_name: None,
        }
    }

    /// A file part. The output name is sanitized; the literal one stays resolvable
    /// through [`Param::original_name`].
    pub fn file(
        field_name: &str,
        value: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        let name = sanitize_field_name(field_name);
        let original_name = (name != field_name).then(|| field_name.to_owned());
        Self {
            name,
            value: value.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            original_name,
        }
    }

    pub fn original_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_file(&self) -> bool {
        self.file_name.is_some()
    }
}

/// Output key for a file field: every character other than an ASCII letter, digit or
/// `_` becomes `_`.
pub fn sanitize_field_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
