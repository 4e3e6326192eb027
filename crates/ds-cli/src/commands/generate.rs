//! Generate command: fetch activity data and render all charts.
//!
//! The pipeline is fetch -> classify -> render. Raw API responses are
//! cached; classification and rendering re-run on every invocation so rule
//! or style changes take effect without waiting out the TTL. A service with
//! missing credentials, or whose fetch fails, is skipped with a warning and
//! contributes empty data.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use ds_api::{GiteaClient, GithubClient, LanguageReport, WakatimeClient};
use ds_cache::Cache;
use ds_core::{DailyContribution, HostStats, contribution, process_languages};

use crate::Config;
use crate::charts::{self, Theme};

const THEMES: [Theme; 2] = [Theme::Light, Theme::Dark];

/// Runs the full pipeline.
pub async fn run(config: &Config, days: u32, out: Option<&Path>, refresh: bool) -> Result<()> {
    let cache = Cache::open(&config.cache.dir, config.cache.ttl_hours)
        .with_context(|| format!("failed to open cache at {}", config.cache.dir.display()))?;

    if refresh {
        let removed = cache.clear().context("failed to clear cache")?;
        tracing::info!(removed, "cache cleared for refresh");
    }

    let (github_contributions, github_stats) = fetch_github(config, &cache, days).await;
    let (gitea_contributions, gitea_stats) = fetch_gitea(config, &cache, days).await;
    let report = fetch_wakatime(config, &cache).await;

    let mut contributions = github_contributions;
    contributions.extend(gitea_contributions);
    contributions.sort_by_key(|c| c.date);

    tracing::info!(
        total = contribution::total_contributions(&contributions),
        github = contribution::contributions_from(&contributions, ds_core::ContributionSource::Github),
        gitea = contribution::contributions_from(&contributions, ds_core::ContributionSource::Gitea),
        "contribution records merged"
    );

    let languages = process_languages(&report.languages);
    tracing::info!(
        raw = report.languages.len(),
        cleaned = languages.len(),
        total_hours = report.total_seconds / 3600.0,
        "language report processed"
    );

    let figures_dir = out.unwrap_or(&config.output.figures_dir);
    fs::create_dir_all(figures_dir)
        .with_context(|| format!("failed to create {}", figures_dir.display()))?;

    let today = Local::now().date_naive();
    for theme in THEMES {
        write_chart(
            figures_dir,
            "contributions_heatmap",
            theme,
            &charts::heatmap::render(&contributions, today, theme),
        )?;
        if languages.is_empty() {
            tracing::warn!("no language data, skipping language chart");
        } else {
            write_chart(
                figures_dir,
                "wakatime_languages",
                theme,
                &charts::languages::render(&languages, theme),
            )?;
        }
        write_chart(
            figures_dir,
            "summary_stats",
            theme,
            &charts::summary::render(&github_stats, &gitea_stats, &contributions, theme),
        )?;
    }

    tracing::info!(dir = %figures_dir.display(), "charts rendered");
    Ok(())
}

fn write_chart(dir: &Path, stem: &str, theme: Theme, svg: &str) -> Result<()> {
    let path = dir.join(format!("{stem}_{}.svg", theme.name()));
    fs::write(&path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "chart written");
    Ok(())
}

// ── Source fetches ─────────────────────────────────────────────────────────

async fn fetch_github(
    config: &Config,
    cache: &Cache,
    days: u32,
) -> (Vec<DailyContribution>, HostStats) {
    let (Some(token), Some(username)) = (&config.github.token, &config.github.username) else {
        tracing::warn!("GitHub credentials not configured, skipping");
        return (Vec::new(), HostStats::default());
    };

    match github_data(token, username, cache, days).await {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(%err, "GitHub fetch failed, continuing without it");
            (Vec::new(), HostStats::default())
        }
    }
}

async fn github_data(
    token: &str,
    username: &str,
    cache: &Cache,
    days: u32,
) -> Result<(Vec<DailyContribution>, HostStats)> {
    let client = GithubClient::new(token, username)?;

    let contributions_key = format!("github_contributions_{days}");
    let contributions = match cache.get::<Vec<DailyContribution>>(&contributions_key)? {
        Some(cached) => {
            tracing::debug!("using cached GitHub contributions");
            cached
        }
        None => {
            let fresh = client.contributions(days).await?;
            cache.put(&contributions_key, &fresh)?;
            fresh
        }
    };

    let stats = match cache.get::<HostStats>("github_stats")? {
        Some(cached) => {
            tracing::debug!("using cached GitHub stats");
            cached
        }
        None => {
            let fresh = client.stats().await?;
            cache.put("github_stats", &fresh)?;
            fresh
        }
    };

    Ok((contributions, stats))
}

async fn fetch_gitea(
    config: &Config,
    cache: &Cache,
    days: u32,
) -> (Vec<DailyContribution>, HostStats) {
    let (Some(url), Some(token), Some(username)) = (
        &config.gitea.url,
        &config.gitea.token,
        &config.gitea.username,
    ) else {
        tracing::warn!("Gitea not configured, skipping");
        return (Vec::new(), HostStats::default());
    };

    match gitea_data(url, token, username, config, cache, days).await {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(%err, "Gitea fetch failed, continuing without it");
            (Vec::new(), HostStats::default())
        }
    }
}

async fn gitea_data(
    url: &str,
    token: &str,
    username: &str,
    config: &Config,
    cache: &Cache,
    days: u32,
) -> Result<(Vec<DailyContribution>, HostStats)> {
    let client = GiteaClient::new(url, token, username, config.gitea.ca_cert.as_deref())?;

    let contributions_key = format!("gitea_contributions_{days}");
    let contributions = match cache.get::<Vec<DailyContribution>>(&contributions_key)? {
        Some(cached) => {
            tracing::debug!("using cached Gitea contributions");
            cached
        }
        None => {
            let fresh = client.contributions(days).await?;
            cache.put(&contributions_key, &fresh)?;
            fresh
        }
    };

    let stats = match cache.get::<HostStats>("gitea_stats")? {
        Some(cached) => {
            tracing::debug!("using cached Gitea stats");
            cached
        }
        None => {
            let fresh = client.stats().await?;
            cache.put("gitea_stats", &fresh)?;
            fresh
        }
    };

    Ok((contributions, stats))
}

async fn fetch_wakatime(config: &Config, cache: &Cache) -> LanguageReport {
    let Some(api_key) = &config.wakatime.api_key else {
        tracing::warn!("WakaTime API key not configured, skipping");
        return empty_report();
    };

    match wakatime_data(api_key, cache).await {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(%err, "WakaTime fetch failed, continuing without it");
            empty_report()
        }
    }
}

async fn wakatime_data(api_key: &str, cache: &Cache) -> Result<LanguageReport> {
    // Only the raw report is cached; classification re-runs every time.
    if let Some(cached) = cache.get::<LanguageReport>("wakatime_raw_all_time")? {
        tracing::debug!("using cached WakaTime report");
        return Ok(cached);
    }

    let client = WakatimeClient::new(api_key)?;
    let fresh = client.all_time_stats().await?;
    cache.put("wakatime_raw_all_time", &fresh)?;
    Ok(fresh)
}

const fn empty_report() -> LanguageReport {
    LanguageReport {
        languages: Vec::new(),
        total_seconds: 0.0,
    }
}
