use crate::body::TextEncoding;
use crate::capture::BufferedResponse;
use crate::redaction::{REDACTED, RedactionConfig};
use crate::serialize::ResponseHead;
use bytes::Bytes;
use http::{Response, StatusCode};
use http_body_util::Full;
use pretty_assertions::assert_eq;

fn captured(status: StatusCode, headers: &[(&str, &str)]) -> BufferedResponse<Full<Bytes>> {
    let mut builder = Response::builder().status(status);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    BufferedResponse::new(builder.body(Full::new(Bytes::new())).unwrap())
}

//-----------------------------------------------------------------------------
// Status line
//-----------------------------------------------------------------------------
#[test]
fn status_text_defaults_to_the_canonical_reason() {
    let res = captured(StatusCode::NOT_FOUND, &[]);

    let head = ResponseHead::capture(&res, &Default::default());

    assert_eq!(head.status, 404);
    assert_eq!(head.status_text, "Not Found");
}

#[test]
fn unknown_status_has_empty_text() {
    let res = captured(StatusCode::from_u16(599).unwrap(), &[]);

    let head = ResponseHead::capture(&res, &Default::default());

    assert_eq!(head.status_text, "");
}

#[test]
fn adapter_status_text_wins() {
    let res = captured(StatusCode::OK, &[]).with_status_text("Fine");

    let head = ResponseHead::capture(&res, &Default::default());

    assert_eq!(head.status_text, "Fine");
}

//-----------------------------------------------------------------------------
// Content
//-----------------------------------------------------------------------------
#[test]
fn text_content_reports_its_byte_length() {
    // Arrange
    let res = captured(StatusCode::OK, &[("content-type", "text/plain; charset=utf-8")]);
    let filter = Default::default();
    let body = Bytes::from("héllo");

    // Act
    let record = ResponseHead::capture(&res, &filter).into_record(Some(&body), &filter);

    // Assert
    let content = record.content.unwrap();
    assert_eq!(content.body.as_text(), Some("héllo"));
    assert_eq!(content.size, 6);
}

#[test]
fn size_follows_the_filtered_json_text() {
    // Arrange
    let res = captured(StatusCode::OK, &[("content-type", "application/json")]);
    let filter = RedactionConfig::deny(["token"]).filter();
    let body = Bytes::from_static(br#"{"token":"abc"}"#);

    // Act
    let record = ResponseHead::capture(&res, &filter).into_record(Some(&body), &filter);

    // Assert
    let content = record.content.unwrap();
    let expected = format!(r#"{{"token":"{REDACTED}"}}"#);
    assert_eq!(content.body.as_text(), Some(expected.as_str()));
    assert_eq!(content.size, expected.len());
}

#[test]
fn binary_content_reports_the_raw_length() {
    let res = captured(StatusCode::OK, &[("content-type", "application/octet-stream")]);
    let filter = Default::default();
    let body = Bytes::from_static(&[0xff, 0xfe, 0x00]);

    let record = ResponseHead::capture(&res, &filter).into_record(Some(&body), &filter);

    let content = record.content.unwrap();
    assert!(matches!(
        content.body.payload,
        crate::body::BodyPayload::Text {
            encoding: Some(TextEncoding::Base64),
            ..
        }
    ));
    assert_eq!(content.size, 3);
}

#[test]
fn empty_response_body_omits_content() {
    let res = captured(StatusCode::NO_CONTENT, &[]);
    let filter = Default::default();

    let record = ResponseHead::capture(&res, &filter).into_record(Some(&Bytes::new()), &filter);

    assert_eq!(record.content, None);
}

//-----------------------------------------------------------------------------
// Redirects
//-----------------------------------------------------------------------------
#[test]
fn redirect_url_comes_from_location() {
    let res = captured(StatusCode::FOUND, &[("location", "https://example.com/next")]);
    let filter = Default::default();

    let record = ResponseHead::capture(&res, &filter).into_record(None, &filter);

    assert_eq!(record.redirect_url, "https://example.com/next");
}

#[test]
fn redacted_location_stays_redacted() {
    let res = captured(StatusCode::FOUND, &[("location", "/secret")]);
    let filter = RedactionConfig::deny(["location"]).filter();

    let record = ResponseHead::capture(&res, &filter).into_record(None, &filter);

    assert_eq!(record.redirect_url, REDACTED);
}

#[test]
fn no_location_means_empty_redirect_url() {
    let res = captured(StatusCode::OK, &[]);
    let filter = Default::default();

    let record = ResponseHead::capture(&res, &filter).into_record(None, &filter);

    assert_eq!(record.redirect_url, "");
}
