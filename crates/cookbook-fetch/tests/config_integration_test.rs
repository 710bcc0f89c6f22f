/// Integration tests for configuration loading
///
/// These tests verify that configuration files load with the expected
/// defaults and that the resulting dispatcher honours source order.

use cookbook_fetch::config::{FetchConfig, SourceConfig, DEFAULT_ARCHIVE_HOST};
use cookbook_fetch::{DownloadDispatcher, FetchError};
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_full_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fetch.json");
    fs::write(
        &config_path,
        r#"{
            "sources": [
                { "uri": "https://index.internal" },
                { "uri": "https://supermarket.chef.io" }
            ],
            "chef": {
                "node-name": "builder",
                "client-key": "/etc/chef/client.pem"
            },
            "ssl": { "verify": false },
            "archive-host": "https://tarballs.internal",
            "http": { "timeout": 60, "max-retries": 5, "user-agent": "builder/1.0" },
            "server-client-log": "debug"
        }"#,
    )
    .unwrap();

    let config = FetchConfig::load(&config_path).unwrap();

    assert_eq!(
        config.sources,
        vec![
            SourceConfig::new("https://index.internal"),
            SourceConfig::new("https://supermarket.chef.io"),
        ]
    );
    assert_eq!(config.chef.node_name.as_deref(), Some("builder"));
    assert_eq!(config.chef.client_key, Some(PathBuf::from("/etc/chef/client.pem")));
    assert!(!config.ssl.verify);
    assert_eq!(config.archive_host, "https://tarballs.internal");
    assert_eq!(config.http.timeout, 60);
    assert_eq!(config.http.max_retries, 5);
    assert_eq!(config.http.connect_timeout, 10);
    assert_eq!(config.server_client_log, LevelFilter::Debug);

    let http = config.http_client_config();
    assert!(!http.verify_tls);
    assert_eq!(http.user_agent, "builder/1.0");

    let creds = config.server_credentials("https://chef.internal").unwrap();
    assert_eq!(creds.client_name, "builder");
    assert!(!creds.verify_tls);
}

#[test]
fn test_load_minimal_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fetch.json");
    fs::write(&config_path, r#"{ "sources": [{ "uri": "https://supermarket.chef.io" }] }"#).unwrap();

    let config = FetchConfig::load(&config_path).unwrap();

    assert_eq!(config.sources.len(), 1);
    assert!(config.ssl.verify);
    assert_eq!(config.archive_host, DEFAULT_ARCHIVE_HOST);
    assert_eq!(config.server_client_log, LevelFilter::Off);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = FetchConfig::load(&temp_dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, FetchError::Config(_)));
}

#[test]
fn test_load_rejects_invalid_source_uri() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fetch.json");
    fs::write(&config_path, r#"{ "sources": [{ "uri": "not a url" }] }"#).unwrap();

    let err = FetchConfig::load(&config_path).unwrap_err();
    assert!(matches!(err, FetchError::Config(_)));
}

#[test]
fn test_load_rejects_malformed_json() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("fetch.json");
    fs::write(&config_path, "{ \"sources\": ").unwrap();

    let err = FetchConfig::load(&config_path).unwrap_err();
    assert!(matches!(err, FetchError::JsonParse(_)));
}

#[test]
fn test_dispatcher_from_config_keeps_source_order() {
    let config = FetchConfig::new()
        .with_source("https://c.example")
        .with_source("https://a.example")
        .with_source("https://b.example");

    let dispatcher = DownloadDispatcher::from_config(&config, None).unwrap();
    let uris: Vec<&str> = dispatcher.sources().iter().map(|s| s.uri()).collect();

    assert_eq!(uris, vec!["https://c.example", "https://a.example", "https://b.example"]);
}

#[test]
fn test_dispatcher_from_config_rejects_bad_archive_host() {
    let config = FetchConfig::new().with_archive_host("::nope::");
    assert!(matches!(
        DownloadDispatcher::from_config(&config, None),
        Err(FetchError::Config(_))
    ));
}
