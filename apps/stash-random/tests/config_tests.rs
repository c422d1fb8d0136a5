//! Integration tests for config file loading.

#![allow(clippy::unwrap_used, clippy::panic)]

use stash_random::client::StashClient;
use stash_random::config::StashConfig;
use stash_random_core::RandomError;
use std::io::Write;

fn write_config(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"
url = "http://nas.local:9999/stash"
api_key = "secret"
per_page = 60
marker_page_size = 250
follow_sticky_scope = true
"#,
    );

    let config = StashConfig::from_file(file.path()).unwrap();

    assert_eq!(config.url, "http://nas.local:9999/stash");
    assert_eq!(config.api_key.as_deref(), Some("secret"));
    assert_eq!(config.per_page, 60);
    assert_eq!(config.marker_page_size, 250);
    assert!(config.follow_sticky_scope);
    assert_eq!(config.resolver().per_page, 60);
    assert!(config.resolver().follow_sticky_scope);
    assert_eq!(
        StashClient::from_config(&config)
            .unwrap()
            .endpoint()
            .as_str(),
        "http://nas.local:9999/stash/graphql"
    );
}

#[test]
fn test_partial_config_keeps_defaults() {
    let file = write_config("per_page = 10\n");

    let config = StashConfig::from_file(file.path()).unwrap();

    assert_eq!(config.per_page, 10);
    assert_eq!(config.url, "http://localhost:9999");
    assert_eq!(config.marker_page_size, 1000);
}

#[test]
fn test_unknown_key_is_rejected() {
    let file = write_config("per_pgae = 10\n");

    let err = StashConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err, RandomError::Config(_)));
}

#[test]
fn test_zero_page_size_fails_validation() {
    let file = write_config("marker_page_size = 0\n");

    let config = StashConfig::from_file(file.path()).unwrap();

    assert!(matches!(config.validate(), Err(RandomError::Config(_))));
}

#[test]
fn test_bad_url_fails_validation() {
    let config = StashConfig {
        url: "not a url".into(),
        ..StashConfig::default()
    };

    assert!(matches!(config.validate(), Err(RandomError::Config(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = StashConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, RandomError::Io(_)));
}
