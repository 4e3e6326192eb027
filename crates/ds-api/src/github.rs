//! GitHub client: contribution calendar and repository statistics.
//!
//! Daily contributions come from the GraphQL `contributionsCollection`
//! calendar, which covers everything the profile heatmap shows. When the
//! GraphQL call fails (missing scope, outage), the client falls back to the
//! REST API: it lists every accessible repository and scans each one's
//! recent commits concurrently, filtering to the configured user locally.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use ds_core::{ContributionSource, DailyContribution, HostStats};

use crate::{ApiError, DEFAULT_TIMEOUT, daily_counts, error_for_status};

const GITHUB_API_URL: &str = "https://api.github.com";
const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

const CONTRIBUTIONS_QUERY: &str = r"
query($from: DateTime!, $to: DateTime!) {
  viewer {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
      totalCommitContributions
    }
  }
}
";

/// GitHub API client.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    token: String,
    username: String,
    api_url: String,
    graphql_url: String,
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("username", &self.username)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Creates a client for the given token and username.
    ///
    /// # Errors
    ///
    /// Returns an error if either credential is empty or whitespace-only,
    /// or if the HTTP client fails to build.
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Result<Self, ApiError> {
        let token = token.into();
        let username = username.into();

        if token.trim().is_empty() {
            return Err(ApiError::MissingCredentials("GitHub token"));
        }
        if username.trim().is_empty() {
            return Err(ApiError::MissingCredentials("GitHub username"));
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent("devstats")
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            token,
            username,
            api_url: GITHUB_API_URL.to_string(),
            graphql_url: GITHUB_GRAPHQL_URL.to_string(),
        })
    }

    /// Fetches daily contribution counts for the trailing window.
    ///
    /// Tries GraphQL first and falls back to scanning repositories over
    /// REST when the query fails.
    pub async fn contributions(&self, days: u32) -> Result<Vec<DailyContribution>, ApiError> {
        match self.contributions_graphql(days).await {
            Ok(daily) => Ok(daily),
            Err(err) => {
                tracing::warn!(%err, "GraphQL contributions failed, falling back to REST");
                self.contributions_rest(days).await
            }
        }
    }

    /// Fetches repository statistics for owned repositories.
    pub async fn stats(&self) -> Result<HostStats, ApiError> {
        let repos = self.repos("owner").await?;
        Ok(HostStats {
            total_repos: u32::try_from(repos.len()).unwrap_or(u32::MAX),
            total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
            total_forks: repos.iter().map(|r| r.forks_count).sum(),
        })
    }

    async fn contributions_graphql(&self, days: u32) -> Result<Vec<DailyContribution>, ApiError> {
        let to = Utc::now();
        let from = to - Duration::days(i64::from(days));

        let request = GraphqlRequest {
            query: CONTRIBUTIONS_QUERY,
            variables: CalendarVariables {
                from: from.to_rfc3339(),
                to: to.to_rfc3339(),
            },
        };

        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        let payload: GraphqlResponse = response.json().await?;

        if let Some(error) = payload.errors.first() {
            return Err(ApiError::Graphql(error.message.clone()));
        }
        let data = payload
            .data
            .ok_or_else(|| ApiError::InvalidResponse("missing data".to_string()))?;

        let collection = data.viewer.contributions_collection;
        tracing::debug!(
            commit_contributions = collection.total_commit_contributions,
            calendar_total = collection.contribution_calendar.total_contributions,
            weeks = collection.contribution_calendar.weeks.len(),
            "contribution calendar fetched"
        );

        Ok(calendar_to_daily(collection.contribution_calendar))
    }

    async fn contributions_rest(&self, days: u32) -> Result<Vec<DailyContribution>, ApiError> {
        let since = Utc::now() - Duration::days(i64::from(days));
        let repos = self
            .repos("owner,collaborator,organization_member")
            .await?;
        tracing::debug!(repos = repos.len(), "scanning repositories for commits");

        let mut scans = JoinSet::new();
        for repo in repos {
            let client = self.clone();
            scans.spawn(async move {
                match client.repo_commits(&repo.full_name, since).await {
                    Ok(dates) => dates,
                    Err(err) => {
                        tracing::warn!(repo = %repo.full_name, %err, "skipping repository");
                        Vec::new()
                    }
                }
            });
        }

        let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
        while let Some(joined) = scans.join_next().await {
            let dates = joined
                .map_err(|err| ApiError::InvalidResponse(format!("repo scan failed: {err}")))?;
            for date in dates {
                *counts.entry(date).or_default() += 1;
            }
        }

        Ok(daily_counts(counts, ContributionSource::Github))
    }

    /// Fetches commit dates for one repository, filtered to the configured
    /// user. A 409 means an empty repository and yields no commits.
    async fn repo_commits(
        &self,
        full_name: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<NaiveDate>, ApiError> {
        let url = format!("{}/repos/{full_name}/commits", self.api_url);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(&[
                ("since", since.to_rfc3339()),
                ("per_page", "100".to_string()),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Ok(Vec::new());
        }
        let response = error_for_status(response).await?;
        let commits: Vec<CommitEntry> = response.json().await?;

        Ok(commits
            .iter()
            .filter(|commit| is_own_commit(commit, &self.username))
            .map(|commit| commit.commit.author.date.date_naive())
            .collect())
    }

    async fn repos(&self, affiliation: &str) -> Result<Vec<RepoSummary>, ApiError> {
        let url = format!("{}/user/repos", self.api_url);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(&[("affiliation", affiliation), ("per_page", "100")])
            .send()
            .await?;
        let response = error_for_status(response).await?;
        Ok(response.json().await?)
    }
}

// ── Wire shapes ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: CalendarVariables,
}

#[derive(Debug, Serialize)]
struct CalendarVariables {
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<CalendarData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CalendarData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Viewer {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
    #[serde(default)]
    total_commit_contributions: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionCalendar {
    #[serde(default)]
    total_contributions: u64,
    weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarWeek {
    contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarDay {
    date: NaiveDate,
    contribution_count: u32,
}

#[derive(Debug, Deserialize)]
struct RepoSummary {
    full_name: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
    #[serde(default)]
    author: Option<ActorRef>,
    #[serde(default)]
    committer: Option<ActorRef>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: CommitAuthor,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: String,
    date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ActorRef {
    login: String,
}

/// The commit belongs to the user when either API actor matches their login
/// or the raw commit author name matches.
fn is_own_commit(commit: &CommitEntry, username: &str) -> bool {
    commit
        .author
        .as_ref()
        .is_some_and(|actor| actor.login == username)
        || commit
            .committer
            .as_ref()
            .is_some_and(|actor| actor.login == username)
        || commit.commit.author.name == username
}

/// Flattens the calendar into per-day records, dropping empty days.
fn calendar_to_daily(calendar: ContributionCalendar) -> Vec<DailyContribution> {
    calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .filter(|day| day.contribution_count > 0)
        .map(|day| DailyContribution {
            date: day.date,
            count: day.contribution_count,
            source: ContributionSource::Github,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejects_empty_token() {
        assert!(matches!(
            GithubClient::new("", "user"),
            Err(ApiError::MissingCredentials(_))
        ));
    }

    #[test]
    fn client_rejects_whitespace_username() {
        assert!(matches!(
            GithubClient::new("ghp_token", "   "),
            Err(ApiError::MissingCredentials(_))
        ));
    }

    #[test]
    fn client_debug_redacts_token() {
        let client = GithubClient::new("ghp_secret", "user").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn calendar_response_parses_and_flattens() {
        let body = r#"{
            "data": {
                "viewer": {
                    "contributionsCollection": {
                        "contributionCalendar": {
                            "totalContributions": 5,
                            "weeks": [
                                {"contributionDays": [
                                    {"date": "2025-01-05", "contributionCount": 0},
                                    {"date": "2025-01-06", "contributionCount": 3}
                                ]},
                                {"contributionDays": [
                                    {"date": "2025-01-12", "contributionCount": 2}
                                ]}
                            ]
                        },
                        "totalCommitContributions": 5
                    }
                }
            }
        }"#;

        let payload: GraphqlResponse = serde_json::from_str(body).unwrap();
        let calendar = payload
            .data
            .unwrap()
            .viewer
            .contributions_collection
            .contribution_calendar;
        let daily = calendar_to_daily(calendar);

        // Zero-count days are dropped.
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date.to_string(), "2025-01-06");
        assert_eq!(daily[0].count, 3);
        assert_eq!(daily[1].count, 2);
        assert!(daily.iter().all(|d| d.source == ContributionSource::Github));
    }

    #[test]
    fn graphql_errors_are_parsed() {
        let body = r#"{"errors": [{"message": "Bad credentials"}]}"#;
        let payload: GraphqlResponse = serde_json::from_str(body).unwrap();
        assert_eq!(payload.errors[0].message, "Bad credentials");
        assert!(payload.data.is_none());
    }

    #[test]
    fn commit_ownership_checks_both_actors_and_author_name() {
        let body = r#"[
            {"commit": {"author": {"name": "Someone Else", "date": "2025-01-06T10:00:00Z"}},
             "author": {"login": "me"}, "committer": null},
            {"commit": {"author": {"name": "Someone Else", "date": "2025-01-06T11:00:00Z"}},
             "author": null, "committer": {"login": "me"}},
            {"commit": {"author": {"name": "me", "date": "2025-01-06T12:00:00Z"}},
             "author": null, "committer": null},
            {"commit": {"author": {"name": "Someone Else", "date": "2025-01-06T13:00:00Z"}},
             "author": {"login": "other"}, "committer": null}
        ]"#;

        let commits: Vec<CommitEntry> = serde_json::from_str(body).unwrap();
        let own: Vec<_> = commits
            .iter()
            .filter(|commit| is_own_commit(commit, "me"))
            .collect();
        assert_eq!(own.len(), 3);
    }
}
