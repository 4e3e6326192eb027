//! Normalized contribution records shared by the fetch and render layers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The code host a contribution was recorded on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributionSource {
    Github,
    Gitea,
}

impl fmt::Display for ContributionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Github => "github",
            Self::Gitea => "gitea",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ContributionSource {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Self::Github),
            "gitea" => Ok(Self::Gitea),
            _ => Err(UnknownSource(s.to_string())),
        }
    }
}

impl Serialize for ContributionSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContributionSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown contribution source strings.
#[derive(Debug, Clone, Error)]
#[error("unknown contribution source: {0}")]
pub struct UnknownSource(String);

/// One day's contribution count from a single host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContribution {
    pub date: NaiveDate,
    pub count: u32,
    pub source: ContributionSource,
}

/// Repository statistics for one code host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStats {
    pub total_repos: u32,
    pub total_stars: u64,
    pub total_forks: u64,
}

impl HostStats {
    /// Combines the statistics of two hosts for the summary card.
    pub const fn merged(self, other: Self) -> Self {
        Self {
            total_repos: self.total_repos + other.total_repos,
            total_stars: self.total_stars + other.total_stars,
            total_forks: self.total_forks + other.total_forks,
        }
    }
}

/// Sums contribution counts across all days.
pub fn total_contributions(days: &[DailyContribution]) -> u64 {
    days.iter().map(|d| u64::from(d.count)).sum()
}

/// Sums contribution counts for one host.
pub fn contributions_from(days: &[DailyContribution], source: ContributionSource) -> u64 {
    days.iter()
        .filter(|d| d.source == source)
        .map(|d| u64::from(d.count))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_roundtrips_through_strings() {
        for source in [ContributionSource::Github, ContributionSource::Gitea] {
            let s = source.to_string();
            let parsed: ContributionSource = s.parse().expect("should parse");
            assert_eq!(parsed, source, "roundtrip failed for {source:?}");
        }
    }

    #[test]
    fn unknown_source_errors() {
        let result: Result<ContributionSource, _> = "bitbucket".parse();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown contribution source: bitbucket");
    }

    #[test]
    fn counts_split_by_source() {
        let day = |d: u32, count, source| DailyContribution {
            date: NaiveDate::from_ymd_opt(2025, 6, d).unwrap(),
            count,
            source,
        };
        let days = vec![
            day(1, 3, ContributionSource::Github),
            day(1, 2, ContributionSource::Gitea),
            day(2, 5, ContributionSource::Github),
        ];

        assert_eq!(total_contributions(&days), 10);
        assert_eq!(contributions_from(&days, ContributionSource::Github), 8);
        assert_eq!(contributions_from(&days, ContributionSource::Gitea), 2);
    }

    #[test]
    fn merged_stats_add_fields() {
        let a = HostStats {
            total_repos: 10,
            total_stars: 100,
            total_forks: 5,
        };
        let b = HostStats {
            total_repos: 3,
            total_stars: 7,
            total_forks: 1,
        };

        let merged = a.merged(b);
        assert_eq!(merged.total_repos, 13);
        assert_eq!(merged.total_stars, 107);
        assert_eq!(merged.total_forks, 6);
    }
}
