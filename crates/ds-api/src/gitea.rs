//! Gitea client: heatmap contributions and repository statistics.
//!
//! Works against self-hosted instances, which commonly run with self-signed
//! certificates: the client accepts invalid certificates and can
//! additionally trust a configured CA bundle.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use reqwest::Certificate;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;

use ds_core::{ContributionSource, DailyContribution, HostStats};

use crate::{ApiError, DEFAULT_TIMEOUT, daily_counts, error_for_status};

/// Gitea API client.
#[derive(Clone)]
pub struct GiteaClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    username: String,
}

impl fmt::Debug for GiteaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GiteaClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GiteaClient {
    /// Creates a client for the given instance.
    ///
    /// `ca_cert` optionally points at a PEM bundle to trust; an unreadable
    /// bundle is logged and skipped. Certificate verification is disabled
    /// either way, since self-hosted instances frequently serve self-signed
    /// or extension-poor certificates.
    ///
    /// # Errors
    ///
    /// Returns an error if any credential is empty or the HTTP client fails
    /// to build.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        username: impl Into<String>,
        ca_cert: Option<&Path>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let token = token.into();
        let username = username.into();

        if base_url.trim().is_empty() {
            return Err(ApiError::MissingCredentials("Gitea URL"));
        }
        if token.trim().is_empty() {
            return Err(ApiError::MissingCredentials("Gitea token"));
        }
        if username.trim().is_empty() {
            return Err(ApiError::MissingCredentials("Gitea username"));
        }

        let mut builder = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("devstats")
            .danger_accept_invalid_certs(true);

        if let Some(path) = ca_cert {
            match fs::read(path) {
                Ok(pem) => {
                    let cert = Certificate::from_pem(&pem).map_err(ApiError::ClientBuild)?;
                    builder = builder.add_root_certificate(cert);
                    tracing::debug!(path = %path.display(), "trusting CA bundle");
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "CA bundle unreadable, skipping");
                }
            }
        }

        let http = builder.build().map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            token,
            username,
        })
    }

    /// Fetches daily contribution counts for the trailing window from the
    /// user heatmap.
    pub async fn contributions(&self, days: u32) -> Result<Vec<DailyContribution>, ApiError> {
        let url = format!(
            "{}/api/v1/users/{}/heatmap",
            self.base_url, self.username
        );
        let response = self
            .http
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let entries: Vec<HeatmapEntry> = response.json().await?;
        tracing::debug!(entries = entries.len(), "heatmap fetched");

        let cutoff = Utc::now() - Duration::days(i64::from(days));
        Ok(heatmap_to_daily(&entries, cutoff))
    }

    /// Fetches repository statistics for the authenticated user.
    pub async fn stats(&self) -> Result<HostStats, ApiError> {
        let url = format!("{}/api/v1/user/repos", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/json")
            .query(&[("limit", "100")])
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let repos: Vec<GiteaRepo> = response.json().await?;

        Ok(HostStats {
            total_repos: u32::try_from(repos.len()).unwrap_or(u32::MAX),
            total_stars: repos.iter().map(|r| r.stars_count).sum(),
            total_forks: repos.iter().map(|r| r.forks_count).sum(),
        })
    }
}

// ── Wire shapes ────────────────────────────────────────────────────────────

/// One heatmap bucket: a unix timestamp (hour granularity) and its count.
#[derive(Debug, Deserialize)]
struct HeatmapEntry {
    timestamp: i64,
    contributions: u32,
}

#[derive(Debug, Deserialize)]
struct GiteaRepo {
    #[serde(default)]
    stars_count: u64,
    #[serde(default)]
    forks_count: u64,
}

/// Groups heatmap buckets into per-day counts, dropping entries older than
/// the cutoff or with unrepresentable timestamps.
fn heatmap_to_daily(entries: &[HeatmapEntry], cutoff: DateTime<Utc>) -> Vec<DailyContribution> {
    let mut counts = HashMap::new();
    for entry in entries {
        let Some(moment) = DateTime::from_timestamp(entry.timestamp, 0) else {
            continue;
        };
        if moment < cutoff {
            continue;
        }
        *counts.entry(moment.date_naive()).or_default() += entry.contributions;
    }
    daily_counts(counts, ContributionSource::Gitea)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn client_rejects_missing_url() {
        assert!(matches!(
            GiteaClient::new("", "token", "user", None),
            Err(ApiError::MissingCredentials(_))
        ));
    }

    #[test]
    fn client_debug_redacts_token() {
        let client =
            GiteaClient::new("https://git.example.com", "secret-token", "user", None).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client =
            GiteaClient::new("https://git.example.com/", "token", "user", None).unwrap();
        assert_eq!(client.base_url, "https://git.example.com");
    }

    #[test]
    fn heatmap_buckets_group_into_days() {
        let cutoff = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let jan_2 = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        let jan_2_later = Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap();
        let jan_3 = Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap();

        let entries = vec![
            HeatmapEntry {
                timestamp: jan_2.timestamp(),
                contributions: 2,
            },
            HeatmapEntry {
                timestamp: jan_2_later.timestamp(),
                contributions: 3,
            },
            HeatmapEntry {
                timestamp: jan_3.timestamp(),
                contributions: 1,
            },
        ];

        let daily = heatmap_to_daily(&entries, cutoff);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.to_string(), "2025-01-02");
        assert_eq!(daily[0].count, 5);
        assert_eq!(daily[1].count, 1);
        assert!(daily.iter().all(|d| d.source == ContributionSource::Gitea));
    }

    #[test]
    fn heatmap_entries_before_cutoff_are_dropped() {
        let cutoff = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let old = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();

        let entries = vec![HeatmapEntry {
            timestamp: old.timestamp(),
            contributions: 10,
        }];

        assert!(heatmap_to_daily(&entries, cutoff).is_empty());
    }

    #[test]
    fn heatmap_response_parses() {
        let body = r#"[{"timestamp": 1735819200, "contributions": 4}]"#;
        let entries: Vec<HeatmapEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries[0].contributions, 4);
    }
}
