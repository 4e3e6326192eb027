//! Cache maintenance commands.

use std::io::Write;

use anyhow::{Context, Result};

use ds_cache::{Cache, EntryInfo};

use crate::Config;

fn open_cache(config: &Config) -> Result<Cache> {
    Cache::open(&config.cache.dir, config.cache.ttl_hours)
        .with_context(|| format!("failed to open cache at {}", config.cache.dir.display()))
}

/// Formats one entry line for `cache info`.
fn format_entry(entry: &EntryInfo) -> String {
    format!(
        "- {}: cached {} ({} bytes)",
        entry.key,
        entry.cached_at.format("%Y-%m-%d %H:%M UTC"),
        entry.size_bytes
    )
}

/// Lists cached responses.
pub fn info<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let cache = open_cache(config)?;
    let entries = cache.entries()?;

    writeln!(writer, "Cache directory: {}", cache.dir().display())?;
    writeln!(writer, "TTL: {} hours", config.cache.ttl_hours)?;

    if entries.is_empty() {
        writeln!(writer, "No cached responses.")?;
        return Ok(());
    }

    writeln!(writer, "Entries:")?;
    for entry in entries {
        writeln!(writer, "{}", format_entry(&entry))?;
    }

    Ok(())
}

/// Removes cached responses, either one key or everything.
pub fn clear<W: Write>(writer: &mut W, config: &Config, key: Option<&str>) -> Result<()> {
    let cache = open_cache(config)?;

    match key {
        Some(key) => {
            if cache.remove(key)? {
                writeln!(writer, "Removed cached response: {key}")?;
            } else {
                writeln!(writer, "No cached response for: {key}")?;
            }
        }
        None => {
            let removed = cache.clear()?;
            writeln!(writer, "Removed {removed} cached responses.")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use insta::assert_snapshot;

    fn test_config(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.cache.dir = dir.to_path_buf();
        config.cache.ttl_hours = 24;
        config
    }

    #[test]
    fn entry_line_formats_key_time_and_size() {
        let entry = EntryInfo {
            key: "github_stats".to_string(),
            cached_at: Utc.with_ymd_and_hms(2025, 1, 29, 16, 5, 0).unwrap(),
            size_bytes: 123,
        };
        assert_snapshot!(
            format_entry(&entry),
            @"- github_stats: cached 2025-01-29 16:05 UTC (123 bytes)"
        );
    }

    #[test]
    fn info_reports_empty_cache() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());

        let mut output = Vec::new();
        info(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("No cached responses."));
        assert!(output.contains("TTL: 24 hours"));
    }

    #[test]
    fn info_lists_entries_by_key() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        let cache = Cache::open(temp.path(), 24).unwrap();
        cache.put("github_stats", &vec![1, 2, 3]).unwrap();

        let mut output = Vec::new();
        info(&mut output, &config).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("- github_stats: cached"));
    }

    #[test]
    fn clear_reports_removed_count() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());
        let cache = Cache::open(temp.path(), 24).unwrap();
        cache.put("a", &1).unwrap();
        cache.put("b", &2).unwrap();

        let mut output = Vec::new();
        clear(&mut output, &config, None).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Removed 2 cached responses."));
    }

    #[test]
    fn clear_single_key_reports_misses() {
        let temp = tempfile::tempdir().unwrap();
        let config = test_config(temp.path());

        let mut output = Vec::new();
        clear(&mut output, &config, Some("absent")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("No cached response for: absent"));
    }
}
