mod support;

use std::fs;
use std::sync::Arc;

use enml_engine::{
    content_hash, decode_input, from_file, from_string, ConvertError, ConvertOptions,
    EnmlConverter,
};
use pretty_assertions::assert_eq;
use support::{init_logging, note, StubFetcher, PNG_BYTES};
use tempfile::TempDir;

#[test]
fn content_type_charset_wins_over_detection() {
    let decoded = decode_input(b"<p>caf\xe9</p>", Some("text/html; charset=ISO-8859-1")).unwrap();
    assert_eq!(decoded.html, "<p>caf\u{e9}</p>");
    assert_eq!(decoded.encoding_label, "windows-1252");
}

#[test]
fn byte_order_mark_is_honoured_and_stripped() {
    let decoded = decode_input(b"\xef\xbb\xbf<p>ok</p>", Some("text/html; charset=windows-1252")).unwrap();
    assert_eq!(decoded.html, "<p>ok</p>");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn malformed_utf8_is_rejected() {
    let err = decode_input(b"<p>\xff\xfe\xfd</p>", Some("text/html; charset=utf-8")).unwrap_err();
    assert_eq!(err.to_string(), "failed to decode input as UTF-8");
}

#[tokio::test]
async fn latin1_bytes_convert_to_utf8_note() {
    init_logging();
    let converter = EnmlConverter::default();
    let out = converter
        .convert_bytes(
            b"<html><body><p>na\xefve</p></body></html>",
            Some("text/html; charset=latin1"),
        )
        .await
        .unwrap();
    assert_eq!(out.enml, note("<p>na\u{ef}ve</p>"));
}

#[tokio::test]
async fn undecodable_bytes_are_a_parse_failure() {
    let err = EnmlConverter::default()
        .convert_bytes(b"<p>\xff</p>", Some("text/html; charset=utf-8"))
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::ParseFailure(_)));
}

#[tokio::test]
async fn file_conversion_reads_and_decodes_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.html");
    fs::write(
        &path,
        b"<html><head><meta charset=\"windows-1252\"></head><body><p>\x93quoted\x94</p></body></html>",
    )
    .unwrap();

    let out = from_file(&path, ConvertOptions::default()).await.unwrap();
    assert_eq!(out.enml, note("<p>\u{201c}quoted\u{201d}</p>"));
}

#[tokio::test]
async fn missing_input_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = from_file(&dir.path().join("absent.html"), ConvertOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
}

#[tokio::test]
async fn from_string_uses_a_fresh_converter() {
    let out = from_string(
        "<!DOCTYPE html><html><head></head><body><b>bold</b></body></html>",
        ConvertOptions::default(),
    )
        .await
        .unwrap();
    assert_eq!(out.enml, note("<b>bold</b>"));
    assert!(out.diagnostics.is_clean());
}

#[tokio::test]
async fn images_in_a_file_resolve_against_the_base_url() {
    let base = "http://example.com/dir/page.html";
    let fetcher = Arc::new(StubFetcher::new().with("http://example.com/dir/img/a.png", PNG_BYTES));
    let converter = EnmlConverter::with_fetcher(ConvertOptions::with_base_url(base), fetcher.clone());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, r#"<body><p><img src="img/a.png"></p></body>"#).unwrap();

    let out = converter.convert_file(&path).await.unwrap();
    let hash = content_hash(PNG_BYTES);
    assert_eq!(
        out.enml,
        note(&format!(r#"<p><en-media hash="{hash}" type="image/png"></en-media></p>"#))
    );
    assert_eq!(fetcher.calls(), vec!["http://example.com/dir/img/a.png".to_string()]);
}
