//! Build-orchestrator share computation.
//!
//! Time tracked against Gradle itself says nothing about which language the
//! build work was for, so it is split across Java / Kotlin / Groovy in
//! proportion to how much time each of those languages received on its own.
//! The shares must be computed from the report *before* any redistribution,
//! which is why this is a separate pass from classification.

use crate::language::RawLanguageEntry;
use crate::rules::GRADLE_TARGETS;

/// Fractional split of orchestrator time across the Gradle target languages.
///
/// Shares sum to 1.0. When none of the target languages has any observed
/// duration, the whole split falls back to Java.
#[derive(Debug, Clone, PartialEq)]
pub struct GradleShares {
    shares: Vec<(String, f64)>,
}

impl GradleShares {
    /// Iterates `(lowercased language key, fraction)` pairs in target order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.shares.iter().map(|(key, frac)| (key.as_str(), *frac))
    }
}

/// Computes redistribution shares from the raw report.
///
/// Target languages are matched case-insensitively. A label that appears
/// more than once keeps its last reported duration.
pub fn gradle_shares(raw: &[RawLanguageEntry]) -> GradleShares {
    let mut observed: Vec<(String, f64)> = Vec::new();
    for entry in raw {
        let lower = entry.name.to_lowercase();
        if !GRADLE_TARGETS.contains(&lower.as_str()) {
            continue;
        }
        if let Some(slot) = observed.iter_mut().find(|(key, _)| *key == lower) {
            slot.1 = entry.total_seconds;
        } else {
            observed.push((lower, entry.total_seconds));
        }
    }

    let total: f64 = observed.iter().map(|(_, seconds)| seconds).sum();
    if total > 0.0 {
        GradleShares {
            shares: observed
                .into_iter()
                .map(|(key, seconds)| (key, seconds / total))
                .collect(),
        }
    } else {
        GradleShares {
            shares: vec![("java".to_string(), 1.0)],
        }
    }
}
