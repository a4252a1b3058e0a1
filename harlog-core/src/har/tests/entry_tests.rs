use crate::body::BodyRecord;
use crate::har::{
    Creator, Group, HarCache, HarEntry, HarLog, HarRequest, HarResponse, HarTimings, LogEntry,
    NameValue, PAYLOAD_VERSION, ResponseContent, timestamp,
};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn started() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).single().unwrap()
        + chrono::TimeDelta::milliseconds(7)
}

fn entry(time: u64) -> LogEntry {
    let request = HarRequest {
        method: "POST".to_owned(),
        url: "http://localhost/api".to_owned(),
        http_version: "HTTP/1.1".to_owned(),
        headers: vec![NameValue::new("content-type", "text/plain")],
        query_string: vec![],
        post_data: Some(BodyRecord::text("text/plain", "hi")),
        cookies: vec![],
        headers_size: -1,
        body_size: -1,
    };
    let response = HarResponse {
        status: 302,
        status_text: "Found".to_owned(),
        http_version: "HTTP/1.1".to_owned(),
        headers: vec![NameValue::new("location", "/next")],
        content: None,
        cookies: vec![],
        redirect_url: "/next".to_owned(),
        headers_size: -1,
        body_size: -1,
    };
    LogEntry {
        id: "3c7f3c3e-0000-4000-8000-000000000000".to_owned(),
        version: PAYLOAD_VERSION,
        group: Group {
            id: "key".to_owned(),
            label: None,
            email: None,
        },
        client_address: "127.0.0.1".to_owned(),
        development: false,
        request: HarLog::single(
            Creator::new("harlog", "1.0.0", "x86_64-linux/rust"),
            HarEntry {
                pageref: "http://localhost/api".to_owned(),
                started_date_time: started(),
                time,
                request,
                response,
                cache: HarCache::default(),
                timings: HarTimings {
                    wait: time,
                    receive: 0,
                },
            },
        ),
    }
}

//-----------------------------------------------------------------------------
// Timestamps
//-----------------------------------------------------------------------------
#[test]
fn timestamps_use_millisecond_precision_and_z() {
    assert_eq!(timestamp::format(&started()), "2024-03-01T12:30:45.007Z");
}

#[test]
fn finished_at_adds_the_duration() {
    let entry = entry(1500);

    assert_eq!(
        timestamp::format(&entry.finished_at()),
        "2024-03-01T12:30:46.507Z"
    );
}

#[test]
fn zero_duration_finishes_when_it_starts() {
    let entry = entry(0);

    assert_eq!(entry.finished_at(), entry.started_at());
}

//-----------------------------------------------------------------------------
// Wire shape
//-----------------------------------------------------------------------------
#[test]
fn envelope_field_names() {
    // Act
    let value = serde_json::to_value(entry(12)).unwrap();

    // Assert
    assert_eq!(value["_id"], json!("3c7f3c3e-0000-4000-8000-000000000000"));
    assert_eq!(value["_version"], json!(3));
    assert_eq!(value["clientIPAddress"], json!("127.0.0.1"));
    assert_eq!(value["group"], json!({"id": "key"}));
    assert_eq!(value["request"]["log"]["entries"].as_array().map(Vec::len), Some(1));
}

#[test]
fn har_entry_shape() {
    let value = serde_json::to_value(entry(12)).unwrap();
    let har = &value["request"]["log"]["entries"][0];

    assert_eq!(har["startedDateTime"], json!("2024-03-01T12:30:45.007Z"));
    assert_eq!(har["time"], json!(12));
    assert_eq!(har["cache"], json!({}));
    assert_eq!(har["timings"], json!({"wait": 12, "receive": 0}));
    assert_eq!(har["request"]["httpVersion"], json!("HTTP/1.1"));
    assert_eq!(har["request"]["queryString"], json!([]));
    assert_eq!(har["request"]["postData"], json!({"mimeType": "text/plain", "text": "hi"}));
    assert_eq!(har["response"]["redirectURL"], json!("/next"));
    assert_eq!(har["response"]["statusText"], json!("Found"));
}

#[test]
fn absent_content_is_omitted() {
    let value = serde_json::to_value(entry(1)).unwrap();
    let response = &value["request"]["log"]["entries"][0]["response"];

    assert_eq!(response.get("content"), None::<&Value>);
}

#[test]
fn response_content_flattens_the_body_record() {
    let content = ResponseContent {
        body: BodyRecord::text("application/json", "{}"),
        size: 2,
    };

    assert_eq!(
        serde_json::to_value(content).unwrap(),
        json!({"mimeType": "application/json", "text": "{}", "size": 2})
    );
}
