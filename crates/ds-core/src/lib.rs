//! Core domain logic for devstats.
//!
//! This crate contains the fundamental types and logic for:
//! - Language classification: cleaning the time-tracking language report
//! - Gradle redistribution: splitting build-orchestrator time across the
//!   languages it was spent on
//! - Contribution records: normalized daily activity from code hosts

mod classify;
pub mod contribution;
mod gradle;
mod language;
mod rules;

pub use classify::{ClassifyObserver, Disposition, TracingObserver, classify, process_languages};
pub use contribution::{ContributionSource, DailyContribution, HostStats};
pub use gradle::{GradleShares, gradle_shares};
pub use language::{ProcessedLanguageEntry, RawLanguageEntry};
