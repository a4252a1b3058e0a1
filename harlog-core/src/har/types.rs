use crate::body::BodyRecord;
use crate::har::Creator;
use crate::har::timestamp;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Schema version understood by the collector.
pub const PAYLOAD_VERSION: u8 = 3;

/// A single `{name, value}` pair, used for headers, query parameters and cookies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The end-customer a logged request is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    /// The caller's API key.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The unit emitted to the collector.
///
/// On the wire the request/response pair is wrapped in a HAR log with exactly one
/// entry; the accessors below expose that entry directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_version")]
    pub version: u8,
    pub group: Group,
    #[serde(rename = "clientIPAddress")]
    pub client_address: String,
    pub development: bool,
    pub request: HarLog,
}

impl LogEntry {
    pub fn har_entry(&self) -> &HarEntry {
        &self.request.log.entries[0]
    }

    pub fn request(&self) -> &HarRequest {
        &self.har_entry().request
    }

    pub fn response(&self) -> &HarResponse {
        &self.har_entry().response
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.har_entry().started_date_time
    }

    pub fn finished_at(&self) -> DateTime<Utc> {
        let started = self.started_at();
        i64::try_from(self.duration_ms())
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .and_then(|elapsed| started.checked_add_signed(elapsed))
            .unwrap_or(started)
    }

    pub fn duration_ms(&self) -> u64 {
        self.har_entry().time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarLog {
    pub log: HarLogBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarLogBody {
    pub creator: Creator,
    pub entries: [HarEntry; 1],
}

impl HarLog {
    pub fn single(creator: Creator, entry: HarEntry) -> Self {
        Self {
            log: HarLogBody {
                creator,
                entries: [entry],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarEntry {
    pub pageref: String,
    #[serde(serialize_with = "timestamp::serialize")]
    pub started_date_time: DateTime<Utc>,
    /// Total elapsed time in milliseconds, never negative.
    pub time: u64,
    pub request: HarRequest,
    pub response: HarResponse,
    pub cache: HarCache,
    pub timings: HarTimings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarCache {}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HarTimings {
    pub wait: u64,
    pub receive: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarRequest {
    pub method: String,
    pub url: String,
    pub http_version: String,
    pub headers: Vec<NameValue>,
    pub query_string: Vec<NameValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_data: Option<BodyRecord>,
    pub cookies: Vec<NameValue>,
    pub headers_size: i64,
    pub body_size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarResponse {
    pub status: u16,
    pub status_text: String,
    pub http_version: String,
    pub headers: Vec<NameValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ResponseContent>,
    pub cookies: Vec<NameValue>,
    #[serde(rename = "redirectURL")]
    pub redirect_url: String,
    pub headers_size: i64,
    pub body_size: i64,
}

/// Response body plus the byte length of its content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseContent {
    #[serde(flatten)]
    pub body: BodyRecord,
    pub size: usize,
}
