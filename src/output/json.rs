//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document with the run metadata, the status
//! of every phase, an error summary, and the failing phase's errors.

use crate::finding::{Finding, PhaseStatus, ValidationPhase, ValidationReport};
use crate::readme::ResourceKind;

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    root: &'a str,
    kinds: &'a [ResourceKind],
    audit_timestamp: &'a str,
    passed: bool,
    phases: Vec<PhaseEntry>,
    failed_phase: Option<ValidationPhase>,
    summary: Summary,
    errors: &'a [Finding],
}

#[derive(serde::Serialize)]
struct PhaseEntry {
    phase: ValidationPhase,
    status: PhaseStatus,
}

#[derive(serde::Serialize)]
struct Summary {
    errors: usize,
    documents: usize,
    duration_ms: u64,
}

/// Formats a [`ValidationReport`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &ValidationReport) -> String {
    let output = JsonOutput {
        root: &report.root,
        kinds: &report.kinds,
        audit_timestamp: &report.audit_timestamp,
        passed: report.passed,
        phases: report
            .phase_statuses()
            .into_iter()
            .map(|(phase, status)| PhaseEntry { phase, status })
            .collect(),
        failed_phase: report.failure.as_ref().map(|f| f.phase),
        summary: Summary {
            errors: report.error_count(),
            documents: report.documents_checked,
            duration_ms: report.duration_ms,
        },
        errors: report.errors(),
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
