//! Service clients for devstats.
//!
//! One client per upstream service:
//! - [`GithubClient`]: contribution calendar over GraphQL with a REST
//!   fallback, plus repository statistics
//! - [`GiteaClient`]: heatmap and repository statistics from a self-hosted
//!   instance
//! - [`WakatimeClient`]: the all-time language duration report
//!
//! Each client owns a configured `reqwest::Client` and is safe to clone and
//! share; clones reuse the underlying connection pool. Credentials never
//! appear in `Debug` output.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use ds_core::{ContributionSource, DailyContribution};

pub mod gitea;
pub mod github;
pub mod wakatime;

pub use gitea::GiteaClient;
pub use github::GithubClient;
pub use wakatime::{LanguageReport, WakatimeClient};

/// Default request timeout for API calls.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required credential was empty or missing.
    #[error("missing credentials: {0}")]
    MissingCredentials(&'static str),
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The GraphQL endpoint reported query errors.
    #[error("GraphQL error: {0}")]
    Graphql(String),
    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Resolves a response into an error carrying the body on non-success.
pub(crate) async fn error_for_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}

/// Collapses per-day counts into a date-sorted contribution list.
pub(crate) fn daily_counts(
    counts: HashMap<NaiveDate, u32>,
    source: ContributionSource,
) -> Vec<DailyContribution> {
    let mut daily: Vec<_> = counts
        .into_iter()
        .map(|(date, count)| DailyContribution {
            date,
            count,
            source,
        })
        .collect();
    daily.sort_by_key(|d| d.date);
    daily
}
