//! WakaTime client: the all-time language duration report.

use std::fmt;

use serde::{Deserialize, Serialize};

use ds_core::RawLanguageEntry;

use crate::{ApiError, DEFAULT_TIMEOUT, error_for_status};

const WAKATIME_API_URL: &str = "https://wakatime.com/api/v1";

/// The raw all-time report: per-language durations plus the service's own
/// total. Languages are fed to the classification engine untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageReport {
    pub languages: Vec<RawLanguageEntry>,
    pub total_seconds: f64,
}

/// WakaTime API client.
#[derive(Clone)]
pub struct WakatimeClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl fmt::Debug for WakatimeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WakatimeClient")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl WakatimeClient {
    /// Creates a client for the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or whitespace-only, or if the
    /// HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingCredentials("WakaTime API key"));
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("devstats")
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            api_key,
            api_url: WAKATIME_API_URL.to_string(),
        })
    }

    /// Fetches the all-time language statistics for the current user.
    pub async fn all_time_stats(&self) -> Result<LanguageReport, ApiError> {
        let url = format!("{}/users/current/stats/all_time", self.api_url);
        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let payload: StatsResponse = response.json().await?;

        let data = payload
            .data
            .ok_or_else(|| ApiError::InvalidResponse("missing data".to_string()))?;
        tracing::debug!(
            languages = data.languages.len(),
            total_hours = data.total_seconds / 3600.0,
            "all-time stats fetched"
        );

        Ok(LanguageReport {
            languages: data.languages,
            total_seconds: data.total_seconds,
        })
    }
}

// ── Wire shapes ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default)]
    data: Option<StatsData>,
}

#[derive(Debug, Deserialize)]
struct StatsData {
    #[serde(default)]
    languages: Vec<RawLanguageEntry>,
    #[serde(default)]
    total_seconds: f64,
}
