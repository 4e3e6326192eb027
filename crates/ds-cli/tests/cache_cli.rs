//! Integration tests driving cache maintenance through the binary.
//!
//! The cache commands are the only surface that works without network
//! access or credentials, so they exercise the full startup path: config
//! loading from the environment, cache opening, and command dispatch.

use std::process::Command;

use tempfile::TempDir;

fn devstats_binary() -> String {
    env!("CARGO_BIN_EXE_devstats").to_string()
}

/// Runs the binary with the cache directory pinned to a temp dir.
fn run_devstats(temp: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(devstats_binary())
        .env("DEVSTATS_CACHE__DIR", temp.path().join("cache"))
        .args(args)
        .output()
        .expect("failed to run devstats")
}

#[test]
fn cache_info_reports_empty_cache() {
    let temp = TempDir::new().unwrap();

    let output = run_devstats(&temp, &["cache", "info"]);

    assert!(
        output.status.success(),
        "cache info should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No cached responses."), "got: {stdout}");
}

#[test]
fn cache_clear_removes_seeded_entries() {
    let temp = TempDir::new().unwrap();
    let cache_dir = temp.path().join("cache");

    // Seed two entries the way the generate command would.
    let cache = ds_cache::Cache::open(&cache_dir, 24).unwrap();
    cache.put("github_stats", &vec![1, 2, 3]).unwrap();
    cache.put("gitea_stats", &vec![4, 5]).unwrap();

    let output = run_devstats(&temp, &["cache", "clear"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Removed 2 cached responses."), "got: {stdout}");

    // A second clear finds nothing left.
    let output = run_devstats(&temp, &["cache", "clear"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Removed 0 cached responses."), "got: {stdout}");
}

#[test]
fn cache_info_lists_seeded_keys() {
    let temp = TempDir::new().unwrap();
    let cache_dir = temp.path().join("cache");

    let cache = ds_cache::Cache::open(&cache_dir, 24).unwrap();
    cache.put("wakatime_raw_all_time", &"payload").unwrap();

    let output = run_devstats(&temp, &["cache", "info"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wakatime_raw_all_time"), "got: {stdout}");
}

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();

    let output = run_devstats(&temp, &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("cache"));
}
