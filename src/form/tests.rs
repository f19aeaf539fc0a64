//! Tests for the multipart form module

use super::*;
use pretty_assertions::assert_eq;
use std::io::Write;

fn body_text(body: &FormBody) -> String {
    String::from_utf8_lossy(&body.body).into_owned()
}

#[test]
fn test_text_and_file_parts_share_boundary() {
    let mut form = FormData::new();
    form.append("chat_id", 42).append_file(
        "photo",
        b"PNGDATA".to_vec(),
        Some(FileMeta::new().filename("cat.png").content_type("image/png")),
    );

    let body = form.data();
    let boundary = &body.boundary;
    assert_eq!(
        body.content_type,
        format!("multipart/form-data; boundary={boundary}")
    );

    let expected = format!(
        "\r\n--{boundary}\r\n\
         Content-Disposition: form-data; name=\"chat_id\"\r\n\r\n42\
         \r\n--{boundary}\r\n\
         Content-Disposition: form-data; name=\"photo\"; filename=\"cat.png\"\r\n\
         Content-Type: image/png\r\n\r\nPNGDATA\
         \r\n--{boundary}--\r\n"
    );
    assert_eq!(body_text(&body), expected);
    assert!(body_text(&body).ends_with(&format!("--{boundary}--\r\n")));
}

#[test]
fn test_scalar_values_use_display_form() {
    let mut form = FormData::new();
    form.append("disable_notification", true)
        .append("caption", "hello world")
        .append("latitude", 51.5);

    let text = body_text(&form.data());
    assert!(text.contains("name=\"disable_notification\"\r\n\r\ntrue"));
    assert!(text.contains("name=\"caption\"\r\n\r\nhello world"));
    assert!(text.contains("name=\"latitude\"\r\n\r\n51.5"));
}

#[test]
fn test_file_without_meta_has_bare_disposition() {
    let mut form = FormData::new();
    form.append_file("document", b"abc".to_vec(), None);

    let text = body_text(&form.data());
    assert!(text.contains("Content-Disposition: form-data; name=\"document\"\r\n\r\nabc"));
    assert!(!text.contains("filename="));
    assert!(!text.contains("Content-Type:"));
}

#[test]
fn test_binary_content_is_preserved() {
    let bytes: Vec<u8> = (0u8..=255).collect();
    let mut form = FormData::new();
    form.append_file("blob", bytes.clone(), None);

    let body = form.data();
    let marker = b"name=\"blob\"\r\n\r\n";
    let start = body
        .body
        .windows(marker.len())
        .position(|w| w == marker)
        .unwrap()
        + marker.len();
    assert_eq!(&body.body[start..start + bytes.len()], bytes.as_slice());
}

#[test]
fn test_each_serialization_uses_new_boundary() {
    let mut form = FormData::new();
    form.append("a", 1);

    let first = form.data();
    let second = form.data();
    assert_ne!(first.boundary, second.boundary);
    assert_ne!(first.body, second.body);
    assert!(!body_text(&second).contains(&first.boundary));
}

#[test]
fn test_separate_builders_do_not_share_boundaries() {
    let mut left = FormData::new();
    left.append("a", 1);
    let mut right = FormData::new();
    right.append("a", 1);

    let left_body = left.data();
    let right_body = right.data();
    assert_ne!(left_body.boundary, right_body.boundary);
    assert!(!body_text(&right_body).contains(&left_body.boundary));
}

#[test]
fn test_empty_form_only_has_closing_delimiter() {
    let form = FormData::new();
    assert!(form.is_empty());

    let body = form.data();
    assert_eq!(body_text(&body), format!("\r\n--{}--\r\n", body.boundary));
}

#[test]
fn test_parts_keep_insertion_order() {
    let mut form = FormData::new();
    form.append("first", "1").append("second", "2").append("third", "3");
    assert_eq!(form.len(), 3);

    let text = body_text(&form.data());
    let first = text.find("name=\"first\"").unwrap();
    let second = text.find("name=\"second\"").unwrap();
    let third = text.find("name=\"third\"").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn test_append_file_read() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"file contents\x00\xff").unwrap();

    let mut form = FormData::new();
    form.append_file_read(
        "document",
        file.path(),
        Some(FileMeta::new().filename("notes.bin")),
    )
    .await
    .unwrap();

    let body = form.data();
    let needle = b"filename=\"notes.bin\"\r\n\r\nfile contents\x00\xff";
    assert!(body.body.windows(needle.len()).any(|w| w == needle));
}

#[tokio::test]
async fn test_append_file_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut form = FormData::new();

    let err = form
        .append_file_read("document", dir.path().join("missing.txt"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, crate::Error::Io(_)));
    assert!(form.is_empty());
}
