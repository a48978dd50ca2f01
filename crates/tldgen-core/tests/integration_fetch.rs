//! Integration test: download from a local server, cache hits, forced refresh
//! and non-200 responses.

mod common;

use std::fs;
use tempfile::tempdir;
use tldgen_core::config::TldConfig;
use tldgen_core::error::TldError;
use tldgen_core::fetch::{fetch_list, FetchOutcome, FetchPolicy};

const LIST: &str = "# Version 2025012200, Last Updated Wed Jan 22 07:07:01 2025 UTC\nAAA\nCOM\nXN--P1AI\n";

fn config(dir: &std::path::Path, url: &str) -> TldConfig {
    TldConfig {
        source_url: url.to_string(),
        raw_path: dir.join("tlds-alpha-by-domain.txt"),
        ..TldConfig::default()
    }
}

#[test]
fn downloads_when_cache_is_missing() {
    let server = common::list_server::start(LIST);
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), &server.url);

    let outcome = fetch_list(&cfg, FetchPolicy::default()).unwrap();
    assert!(matches!(outcome, FetchOutcome::Downloaded { .. }));
    assert_eq!(outcome.path(), cfg.raw_path.as_path());
    assert_eq!(fs::read_to_string(&cfg.raw_path).unwrap(), LIST);
    assert_eq!(server.hits(), 1);
}

#[test]
fn second_fetch_is_a_cache_hit_with_no_request() {
    let server = common::list_server::start(LIST);
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), &server.url);

    fetch_list(&cfg, FetchPolicy::default()).unwrap();
    let first = fs::read(&cfg.raw_path).unwrap();

    let outcome = fetch_list(&cfg, FetchPolicy::default()).unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::Cached {
            path: cfg.raw_path.clone(),
            bytes: LIST.len() as u64
        }
    );
    assert_eq!(server.hits(), 1);
    assert_eq!(fs::read(&cfg.raw_path).unwrap(), first);
}

#[test]
fn empty_cache_file_is_refetched() {
    let server = common::list_server::start(LIST);
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), &server.url);
    fs::write(&cfg.raw_path, "").unwrap();

    let outcome = fetch_list(&cfg, FetchPolicy::default()).unwrap();
    assert!(matches!(outcome, FetchOutcome::Downloaded { .. }));
    assert_eq!(server.hits(), 1);
}

#[test]
fn force_refresh_overwrites_cache() {
    let server = common::list_server::start(LIST);
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), &server.url);
    fs::write(&cfg.raw_path, "STALE\n").unwrap();

    let outcome = fetch_list(&cfg, FetchPolicy { force_refresh: true }).unwrap();
    assert!(matches!(outcome, FetchOutcome::Downloaded { .. }));
    assert_eq!(server.hits(), 1);
    assert_eq!(fs::read_to_string(&cfg.raw_path).unwrap(), LIST);
}

#[test]
fn non_200_is_an_error_and_writes_nothing() {
    let server = common::list_server::start_with_status("gone\n", 404);
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), &server.url);

    match fetch_list(&cfg, FetchPolicy::default()) {
        Err(TldError::HttpStatus { status, url }) => {
            assert_eq!(status, 404);
            assert_eq!(url, server.url);
        }
        other => panic!("expected HttpStatus, got {:?}", other),
    }
    assert!(!cfg.raw_path.exists());
}

#[test]
fn failed_refresh_keeps_previous_cache() {
    let server = common::list_server::start_with_status("oops\n", 500);
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), &server.url);
    fs::write(&cfg.raw_path, "COM\n").unwrap();

    let err = fetch_list(&cfg, FetchPolicy { force_refresh: true }).unwrap_err();
    assert!(matches!(err, TldError::HttpStatus { status: 500, .. }));
    assert_eq!(fs::read_to_string(&cfg.raw_path).unwrap(), "COM\n");
}

#[test]
fn creates_missing_parent_directory() {
    let server = common::list_server::start(LIST);
    let dir = tempdir().unwrap();
    let cfg = TldConfig {
        source_url: server.url.clone(),
        raw_path: dir.path().join("cache/raw.txt"),
        ..TldConfig::default()
    };

    fetch_list(&cfg, FetchPolicy::default()).unwrap();
    assert_eq!(fs::read_to_string(&cfg.raw_path).unwrap(), LIST);
}
