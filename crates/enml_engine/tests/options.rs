use std::fs;
use std::time::Duration;

use enml_engine::{ConvertOptions, FetchSettings, OptionsError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn options_survive_ron_round_trip() {
    let options = ConvertOptions {
        base_url: "http://example.com/notes/".to_string(),
        strict: true,
        include_comments: true,
        ignore_files: false,
        max_input_bytes: 4096,
        fetch: FetchSettings {
            redirect_limit: 2,
            max_concurrent_fetches: 3,
            ..FetchSettings::default()
        },
    };

    let text = options.to_ron_string().unwrap();
    let loaded = ConvertOptions::from_ron_str(&text).unwrap();
    assert_eq!(loaded, options);
}

#[test]
fn partial_ron_keeps_defaults() {
    let loaded = ConvertOptions::from_ron_str(r#"(strict: true, base_url: "file:///tmp/")"#).unwrap();

    assert!(loaded.strict);
    assert_eq!(loaded.base_url, "file:///tmp/");
    assert!(!loaded.include_comments);
    assert_eq!(loaded.max_input_bytes, ConvertOptions::default().max_input_bytes);
    assert_eq!(loaded.fetch, FetchSettings::default());
}

#[test]
fn nested_fetch_settings_can_be_overridden() {
    let loaded = ConvertOptions::from_ron_str(
        "(fetch: (request_timeout: (secs: 2, nanos: 0), max_bytes: 1024))",
    )
    .unwrap();

    assert_eq!(loaded.fetch.request_timeout, Duration::from_secs(2));
    assert_eq!(loaded.fetch.max_bytes, 1024);
    assert_eq!(loaded.fetch.redirect_limit, FetchSettings::default().redirect_limit);
}

#[test]
fn options_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("enml.ron");
    fs::write(&path, "(ignore_files: true)").unwrap();

    let loaded = ConvertOptions::load(&path).unwrap();
    assert!(loaded.ignore_files);
}

#[test]
fn invalid_ron_is_reported() {
    let err = ConvertOptions::from_ron_str("(strict: maybe)").unwrap_err();
    assert!(matches!(err, OptionsError::Parse(_)));
}

#[test]
fn missing_options_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ConvertOptions::load(&dir.path().join("absent.ron")).unwrap_err();
    assert!(matches!(err, OptionsError::Io(_)));
}
