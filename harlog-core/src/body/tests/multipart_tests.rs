use crate::body::{
    BodyRecord, MultipartError, Param, Part, data_url, encode_body, parse_multipart,
    parts_to_params,
};
use crate::redaction::{FieldFilter, REDACTED, RedactionConfig};
use bytes::Bytes;
use pretty_assertions::assert_eq;

const BOUNDARY: &str = "----formdata-owl";

/// Builds a multipart body from `(name, file_name, content_type, data)` tuples.
fn multipart_body(parts: &[(&str, Option<&str>, Option<&str>, &[u8])]) -> Bytes {
    let mut out = Vec::new();
    for (name, file_name, content_type, data) in parts {
        out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{name}\"");
        if let Some(file_name) = file_name {
            disposition.push_str(&format!("; filename=\"{file_name}\""));
        }
        out.extend_from_slice(disposition.as_bytes());
        out.extend_from_slice(b"\r\n");
        if let Some(content_type) = content_type {
            out.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(data);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Bytes::from(out)
}

fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a];

//-----------------------------------------------------------------------------
// Parsing
//-----------------------------------------------------------------------------
#[test]
fn parses_scalar_and_file_parts() {
    // Arrange
    let body = multipart_body(&[
        ("password", None, None, b"123456"),
        ("owlbert.png", Some("owlbert.png"), Some("image/png"), PNG),
    ]);

    // Act
    let parts = parse_multipart(&body, BOUNDARY).unwrap();

    // Assert
    assert_eq!(
        parts,
        vec![
            Part {
                name: "password".to_owned(),
                file_name: None,
                content_type: None,
                data: Bytes::from_static(b"123456"),
            },
            Part {
                name: "owlbert.png".to_owned(),
                file_name: Some("owlbert.png".to_owned()),
                content_type: Some("image/png".to_owned()),
                data: Bytes::from_static(PNG),
            },
        ]
    );
}

#[test]
fn part_data_may_contain_line_breaks() {
    let body = multipart_body(&[("note", None, None, b"line one\r\nline two")]);

    let parts = parse_multipart(&body, BOUNDARY).unwrap();

    assert_eq!(parts[0].data, Bytes::from_static(b"line one\r\nline two"));
}

#[test]
fn quoted_names_may_contain_semicolons() {
    // Arrange
    let body = Bytes::from(format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"a;b\"; filename=\"x \\\"y\\\".txt\"\r\n\r\nhi\r\n--{BOUNDARY}--"
    ));

    // Act
    let parts = parse_multipart(&body, BOUNDARY).unwrap();

    // Assert
    assert_eq!(parts[0].name, "a;b");
    assert_eq!(parts[0].file_name.as_deref(), Some("x \"y\".txt"));
}

#[test]
fn extended_file_name_takes_precedence() {
    let body = Bytes::from(format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"doc\"; filename=\"a.txt\"; filename*=UTF-8''%C3%A9t%C3%A9.txt\r\n\r\nhi\r\n--{BOUNDARY}--"
    ));

    let parts = parse_multipart(&body, BOUNDARY).unwrap();

    assert_eq!(parts[0].file_name.as_deref(), Some("été.txt"));
}

#[test]
fn missing_boundary_is_an_error() {
    let body = Bytes::from_static(b"no delimiters here");

    assert_eq!(
        parse_multipart(&body, BOUNDARY),
        Err(MultipartError::MissingBoundary)
    );
}

#[test]
fn missing_closing_delimiter_is_an_error() {
    let body = Bytes::from(format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1"
    ));

    assert_eq!(
        parse_multipart(&body, BOUNDARY),
        Err(MultipartError::Unterminated)
    );
}

#[test]
fn part_without_name_is_an_error() {
    let body = Bytes::from(format!(
        "--{BOUNDARY}\r\nContent-Disposition: attachment\r\n\r\n1\r\n--{BOUNDARY}--"
    ));

    assert_eq!(
        parse_multipart(&body, BOUNDARY),
        Err(MultipartError::MissingDisposition { index: 0 })
    );
}

//-----------------------------------------------------------------------------
// Params
//-----------------------------------------------------------------------------
#[test]
fn scalars_repeats_and_files_become_params() {
    // Arrange
    let body = multipart_body(&[
        ("password", None, None, b"123456"),
        ("apiKey", None, None, b"abcdef"),
        ("buster", None, None, b"1234"),
        ("owlbert.png", Some("owlbert.png"), Some("image/png"), PNG),
        ("buster", None, None, b"5678"),
    ]);

    // Act
    let record = encode_body(Some(content_type().as_str()), &body, &FieldFilter::PassThrough).unwrap();

    // Assert
    assert_eq!(
        record,
        BodyRecord::params(
            content_type(),
            vec![
                Param::field("password", "123456"),
                Param::field("apiKey", "abcdef"),
                Param::field("buster", "1234,5678"),
                Param::file(
                    "owlbert.png",
                    data_url("image/png", PNG),
                    "owlbert.png",
                    "image/png"
                ),
            ]
        )
    );
    let file = &record.as_params().unwrap()[3];
    assert_eq!(file.name, "owlbert_png");
    assert_eq!(file.original_name(), "owlbert.png");
    assert_eq!(file.value, "data:image/png;base64,iVBORw0K");
}

#[test]
fn file_without_content_type_is_guessed_from_its_name() {
    let parts = vec![Part {
        name: "avatar".to_owned(),
        file_name: Some("me.png".to_owned()),
        content_type: None,
        data: Bytes::from_static(PNG),
    }];

    let params = parts_to_params(parts);

    assert_eq!(params[0].content_type.as_deref(), Some("image/png"));
}

#[test]
fn file_with_unknown_extension_is_octet_stream() {
    let parts = vec![Part {
        name: "blob".to_owned(),
        file_name: Some("data.unknownext".to_owned()),
        content_type: None,
        data: Bytes::from_static(b"x"),
    }];

    let params = parts_to_params(parts);

    assert_eq!(
        params[0].content_type.as_deref(),
        Some("application/octet-stream")
    );
}

#[test]
fn deny_list_redacts_scalars_and_file_values_only() {
    // Arrange
    let body = multipart_body(&[
        ("password", None, None, b"123456"),
        ("owlbert.png", Some("owlbert.png"), Some("image/png"), PNG),
    ]);
    let filter = RedactionConfig::deny(["password", "owlbert.png"]).filter();

    // Act
    let record = encode_body(Some(content_type().as_str()), &body, &filter).unwrap();

    // Assert
    let params = record.as_params().unwrap();
    assert_eq!(params[0], Param::field("password", REDACTED));
    assert_eq!(params[1].name, "owlbert_png");
    assert_eq!(params[1].value, REDACTED);
    assert_eq!(params[1].file_name.as_deref(), Some("owlbert.png"));
    assert_eq!(params[1].content_type.as_deref(), Some("image/png"));
}

#[test]
fn sanitized_name_also_matches_filters() {
    let body = multipart_body(&[("owlbert.png", Some("owlbert.png"), Some("image/png"), PNG)]);
    let filter = RedactionConfig::allow(["owlbert_png"]).filter();

    let record = encode_body(Some(content_type().as_str()), &body, &filter).unwrap();

    assert_eq!(
        record.as_params().unwrap()[0].value,
        data_url("image/png", PNG)
    );
}

#[test]
fn broken_multipart_degrades_to_text() {
    // Arrange
    let body = Bytes::from_static(b"definitely not multipart");

    // Act
    let record = encode_body(Some(content_type().as_str()), &body, &FieldFilter::PassThrough).unwrap();

    // Assert
    assert_eq!(
        record,
        BodyRecord::text(content_type(), "definitely not multipart")
    );
}

#[test]
fn broken_multipart_is_masked_when_filtering() {
    // Arrange
    let body = Bytes::from_static(b"--x\r\nname=\"password\"\r\n\r\nhunter2");
    let filter = RedactionConfig::deny(["password"]).filter();

    // Act
    let record = encode_body(Some(content_type().as_str()), &body, &filter).unwrap();

    // Assert
    assert_eq!(record, BodyRecord::text(content_type(), REDACTED));
}

#[test]
fn boundaryless_multipart_is_masked_when_filtering() {
    let body = Bytes::from_static(b"password=hunter2");
    let filter = RedactionConfig::allow(["username"]).filter();

    let record = encode_body(Some("multipart/form-data"), &body, &filter).unwrap();

    assert_eq!(record, BodyRecord::text("multipart/form-data", REDACTED));
}

#[test]
fn unquoted_boundary_with_equals_sign_is_decoded_and_filtered() {
    // Arrange
    let content_type = "multipart/form-data; boundary=----=_Part_0_123";
    let body = Bytes::from_static(
        b"------=_Part_0_123\r\n\
          Content-Disposition: form-data; name=\"username\"\r\n\r\n\
          owl\r\n\
          ------=_Part_0_123\r\n\
          Content-Disposition: form-data; name=\"password\"\r\n\r\n\
          hunter2\r\n\
          ------=_Part_0_123--\r\n",
    );
    let filter = RedactionConfig::deny(["password"]).filter();

    // Act
    let record = encode_body(Some(content_type), &body, &filter).unwrap();

    // Assert
    assert_eq!(
        record,
        BodyRecord::params(
            content_type,
            vec![
                Param::field("username", "owl"),
                Param::field("password", REDACTED),
            ]
        )
    );
}
