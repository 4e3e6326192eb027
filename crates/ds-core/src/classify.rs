//! Language classification engine.
//!
//! Turns the raw per-language duration report from the time-tracking service
//! into a cleaned, re-normalized breakdown:
//!
//! 1. Junk labels (plain text, config formats, logs) are dropped.
//! 2. Tooling, notebook and auxiliary-file time is folded into the language
//!    it belongs to (CMake et al. into C++, Jupyter into Python, Java
//!    properties into Java).
//! 3. Build-orchestrator time is split across Java / Kotlin / Groovy using
//!    shares from [`crate::gradle_shares`].
//! 4. The frontend, shell and shader stacks each collapse into one synthetic
//!    group bucket.
//! 5. Spelling variants (Objective-C, joint C/C++ labels) merge into one
//!    canonical bucket; everything else is kept under its own label,
//!    deduplicated case-insensitively with first-seen casing on display.
//!
//! Percentages are recomputed against the retained total, so dropped time
//! never dilutes the chart.

use std::collections::HashMap;

use crate::gradle::{GradleShares, gradle_shares};
use crate::language::{ProcessedLanguageEntry, RawLanguageEntry};
use crate::rules;

/// How a single raw entry was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition<'a> {
    /// Dropped entirely; contributes to no bucket and no total.
    Discarded,
    /// Duration folded into the named bucket after the scan.
    Merged { into: &'a str },
    /// Duration split across the Gradle target languages after the scan.
    Redistributed,
    /// Collapsed into the named synthetic group bucket.
    Aggregated { into: &'a str },
    /// Spelling variant folded into the named canonical bucket.
    Canonicalized { into: &'a str },
    /// Accumulated under its own label.
    Kept,
}

/// Receives the classification trace.
///
/// The engine is a pure function of its inputs; everything observational
/// flows through this seam so tests can run it silently.
pub trait ClassifyObserver {
    /// One call per raw entry, describing its disposition.
    fn entry(&mut self, _name: &str, _seconds: f64, _disposition: Disposition<'_>) {}

    /// One call per non-empty accumulator folded into a bucket.
    fn folded(&mut self, _target: &str, _seconds: f64) {}

    /// One call per Gradle target that receives redistributed time.
    fn redistributed(&mut self, _target: &str, _seconds: f64, _fraction: f64) {}
}

/// The unit observer discards the trace.
impl ClassifyObserver for () {}

/// Observer that emits the trace at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ClassifyObserver for TracingObserver {
    fn entry(&mut self, name: &str, seconds: f64, disposition: Disposition<'_>) {
        let hours = seconds / 3600.0;
        match disposition {
            Disposition::Discarded => tracing::debug!(name, hours, "filtered"),
            Disposition::Merged { into } => tracing::debug!(name, hours, into, "merged"),
            Disposition::Redistributed => {
                tracing::debug!(name, hours, "splitting across Gradle targets");
            }
            Disposition::Aggregated { into } => tracing::debug!(name, hours, into, "aggregated"),
            Disposition::Canonicalized { into } => {
                tracing::debug!(name, hours, into, "canonicalized");
            }
            Disposition::Kept => tracing::debug!(name, hours, "kept"),
        }
    }

    fn folded(&mut self, target: &str, seconds: f64) {
        tracing::debug!(target, hours = seconds / 3600.0, "folded into bucket");
    }

    fn redistributed(&mut self, target: &str, seconds: f64, fraction: f64) {
        tracing::debug!(
            target,
            hours = seconds / 3600.0,
            percent = fraction * 100.0,
            "orchestrator time assigned"
        );
    }
}

/// Working accumulator keyed by canonical (lowercased) name.
struct Bucket {
    display: String,
    seconds: f64,
}

/// Adds to a bucket, creating it with the given display name when absent.
/// An existing bucket keeps its display name.
fn add(buckets: &mut HashMap<String, Bucket>, key: &str, display: &str, seconds: f64) {
    buckets
        .entry(key.to_string())
        .or_insert_with(|| Bucket {
            display: display.to_string(),
            seconds: 0.0,
        })
        .seconds += seconds;
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Classifies the raw report into cleaned buckets.
///
/// Rules are checked in a fixed order and the first match wins: discard,
/// build tooling, notebook, Java auxiliary, orchestrator, frontend, shell,
/// shader, Objective-C variants, joint C/C++ labels, then the keep-as-is
/// default. Each raw entry is processed exactly once.
///
/// Total on all inputs: malformed entries (negative durations, empty names)
/// pass through the arithmetic unvalidated, and empty input yields empty
/// output. Output is sorted by descending duration.
#[expect(
    clippy::too_many_lines,
    reason = "the rule chain and finalization are one sequential unit"
)]
pub fn classify<O: ClassifyObserver>(
    raw: &[RawLanguageEntry],
    shares: &GradleShares,
    observer: &mut O,
) -> Vec<ProcessedLanguageEntry> {
    let mut buckets: HashMap<String, Bucket> = HashMap::new();
    let mut build_tooling_seconds = 0.0;
    let mut notebook_seconds = 0.0;
    let mut java_aux_seconds = 0.0;
    let mut orchestrator_seconds = 0.0;
    let mut frontend_seconds = 0.0;
    let mut shell_seconds = 0.0;
    let mut shader_seconds = 0.0;

    for entry in raw {
        let lower = entry.name.to_lowercase();
        let seconds = entry.total_seconds;

        if rules::DISCARDED_LABELS.contains(lower.as_str()) {
            observer.entry(&entry.name, seconds, Disposition::Discarded);
        } else if rules::BUILD_TOOLING_LABELS.contains(lower.as_str()) {
            build_tooling_seconds += seconds;
            observer.entry(&entry.name, seconds, Disposition::Merged { into: "C++" });
        } else if rules::NOTEBOOK_LABELS.contains(lower.as_str()) {
            notebook_seconds += seconds;
            observer.entry(&entry.name, seconds, Disposition::Merged { into: "Python" });
        } else if rules::JAVA_AUX_LABELS.contains(lower.as_str()) {
            java_aux_seconds += seconds;
            observer.entry(&entry.name, seconds, Disposition::Merged { into: "Java" });
        } else if rules::GRADLE_LABELS.contains(lower.as_str()) {
            orchestrator_seconds += seconds;
            observer.entry(&entry.name, seconds, Disposition::Redistributed);
        } else if rules::FRONTEND_LABELS.contains(lower.as_str()) {
            frontend_seconds += seconds;
            observer.entry(
                &entry.name,
                seconds,
                Disposition::Aggregated {
                    into: rules::FRONTEND_GROUP,
                },
            );
        } else if rules::SHELL_LABELS.contains(lower.as_str()) {
            shell_seconds += seconds;
            observer.entry(
                &entry.name,
                seconds,
                Disposition::Aggregated {
                    into: rules::SHELL_GROUP,
                },
            );
        } else if rules::SHADER_LABELS.contains(lower.as_str()) {
            shader_seconds += seconds;
            observer.entry(
                &entry.name,
                seconds,
                Disposition::Aggregated {
                    into: rules::SHADER_GROUP,
                },
            );
        } else if rules::OBJC_LABELS.contains(lower.as_str()) {
            add(&mut buckets, "objective-c", "Objective-C", seconds);
            observer.entry(
                &entry.name,
                seconds,
                Disposition::Canonicalized { into: "Objective-C" },
            );
        } else if rules::C_JOINT_LABELS.contains(lower.as_str()) {
            add(&mut buckets, "c", "C", seconds);
            observer.entry(&entry.name, seconds, Disposition::Canonicalized { into: "C" });
        } else {
            // First-seen casing wins for the display name; case-insensitive
            // repeats sum their durations.
            add(&mut buckets, &lower, &entry.name, seconds);
            observer.entry(&entry.name, seconds, Disposition::Kept);
        }
    }

    if build_tooling_seconds > 0.0 {
        add(&mut buckets, "c++", "C++", build_tooling_seconds);
        observer.folded("C++", build_tooling_seconds);
    }
    if notebook_seconds > 0.0 {
        add(&mut buckets, "python", "Python", notebook_seconds);
        observer.folded("Python", notebook_seconds);
    }
    if java_aux_seconds > 0.0 {
        add(&mut buckets, "java", "Java", java_aux_seconds);
        observer.folded("Java", java_aux_seconds);
    }

    // Aggregate groups are always fresh buckets; no raw label maps to their
    // keys, so nothing can be overwritten.
    if frontend_seconds > 0.0 {
        buckets.insert(
            rules::FRONTEND_GROUP.to_lowercase(),
            Bucket {
                display: rules::FRONTEND_GROUP.to_string(),
                seconds: frontend_seconds,
            },
        );
        observer.folded(rules::FRONTEND_GROUP, frontend_seconds);
    }
    if shell_seconds > 0.0 {
        buckets.insert(
            rules::SHELL_GROUP.to_lowercase(),
            Bucket {
                display: rules::SHELL_GROUP.to_string(),
                seconds: shell_seconds,
            },
        );
        observer.folded(rules::SHELL_GROUP, shell_seconds);
    }
    if shader_seconds > 0.0 {
        buckets.insert(
            rules::SHADER_GROUP.to_lowercase(),
            Bucket {
                display: rules::SHADER_GROUP.to_string(),
                seconds: shader_seconds,
            },
        );
        observer.folded(rules::SHADER_GROUP, shader_seconds);
    }

    if orchestrator_seconds > 0.0 {
        for (key, fraction) in shares.iter() {
            let assigned = orchestrator_seconds * fraction;
            let display = capitalize(key);
            add(&mut buckets, key, &display, assigned);
            observer.redistributed(&buckets[key].display, assigned, fraction);
        }
    }

    let retained_total: f64 = buckets.values().map(|bucket| bucket.seconds).sum();

    let mut processed: Vec<ProcessedLanguageEntry> = buckets
        .into_values()
        .map(|bucket| ProcessedLanguageEntry {
            name: bucket.display,
            percent: if retained_total > 0.0 {
                bucket.seconds / retained_total * 100.0
            } else {
                0.0
            },
            total_seconds: bucket.seconds,
        })
        .collect();

    // total_cmp keeps the sort total even on garbage (NaN) durations.
    processed.sort_by(|a, b| b.total_seconds.total_cmp(&a.total_seconds));
    processed
}

/// Computes Gradle shares and classifies in one call, tracing the result.
pub fn process_languages(raw: &[RawLanguageEntry]) -> Vec<ProcessedLanguageEntry> {
    let shares = gradle_shares(raw);
    let processed = classify(raw, &shares, &mut TracingObserver);
    tracing::debug!(
        raw = raw.len(),
        processed = processed.len(),
        "language report cleaned"
    );
    processed
}
