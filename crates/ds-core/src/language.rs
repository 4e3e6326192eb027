//! Record shapes for the time-tracking language report.

use serde::{Deserialize, Serialize};

/// One language's total tracked duration as reported by the time-tracking
/// service, before any cleanup.
///
/// Field names match the service's statistics payload. Values are accepted
/// as-is: the classification engine is total and does not validate durations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLanguageEntry {
    /// Label exactly as reported (case preserved).
    pub name: String,
    /// Tracked duration in seconds.
    pub total_seconds: f64,
}

impl RawLanguageEntry {
    pub fn new(name: impl Into<String>, total_seconds: f64) -> Self {
        Self {
            name: name.into(),
            total_seconds,
        }
    }
}

/// One cleaned language bucket with its share of the retained total.
///
/// `percent` is computed against the sum of all retained durations, not the
/// raw total reported by the service. Consumers rely on descending-duration
/// order and on fractional percent precision (the chart layer suppresses
/// slice labels below 1%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedLanguageEntry {
    pub name: String,
    pub total_seconds: f64,
    pub percent: f64,
}
