//! Human-readable colored text formatter.

use crate::finding::{PhaseStatus, ValidationReport};
use colored::Colorize;

/// Formats a [`ValidationReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header** with root and timestamp.
/// 2. **Phases** with per-phase pass/fail/skip status.
/// 3. **Errors** of the failing phase, in report order.
/// 4. **Summary** line.
pub fn format(report: &ValidationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n",
        format!("  Registry Validation: {}  ", report.root)
            .bold()
            .on_blue()
            .white()
    ));
    out.push_str(&format!("  Timestamp: {}\n\n", report.audit_timestamp));

    out.push_str(&format!("{}\n", "Phases".bold().underline()));
    for (phase, status) in report.phase_statuses() {
        let icon = match status {
            PhaseStatus::Passed => "PASS".green().bold().to_string(),
            PhaseStatus::Failed => "FAIL".red().bold().to_string(),
            PhaseStatus::NotRun => "SKIP".dimmed().to_string(),
        };
        let detail = match status {
            PhaseStatus::Failed => format!("{} errors", report.error_count()),
            PhaseStatus::NotRun => "not run".dimmed().to_string(),
            PhaseStatus::Passed => String::new(),
        };
        out.push_str(&format!(
            "  [{icon}] {name:<20} {detail}\n",
            name = phase.label()
        ));
    }
    out.push('\n');

    if let Some(failure) = &report.failure {
        out.push_str(&format!(
            "{}\n",
            format!("Errors ({})", failure.phase).bold().underline()
        ));
        for finding in &failure.errors {
            out.push_str(&format!(
                "  [{}] {rule_id:<32} {message}\n",
                "ERROR".red().bold(),
                rule_id = finding.rule_id.dimmed(),
                message = finding.message,
            ));
            if finding.file.is_some() {
                out.push_str(&format!("          {}\n", finding.display_path().dimmed()));
            }
        }
        out.push('\n');
    }

    let status_str = if report.passed {
        "PASSED".green().bold().to_string()
    } else {
        "FAILED".red().bold().to_string()
    };
    out.push_str(&format!(
        "Result: {status_str}  |  {} errors, {} documents checked\n",
        report.error_count(),
        report.documents_checked,
    ));

    out
}
