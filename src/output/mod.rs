//! Output formatting for validation reports.
//!
//! Three formats are supported:
//!
//! | Format | Module | Use case |
//! |--------|--------|----------|
//! | [`Pretty`](OutputFormat::Pretty) | [`pretty`] | Terminal / human review |
//! | [`Json`](OutputFormat::Json)     | [`json`]   | Automation / scripting  |
//! | [`Sarif`](OutputFormat::Sarif)   | [`sarif`]  | CI/CD code scanning     |
//!
//! The `lint-template` command has its own text and JSON output in [`lint`].

pub mod json;
pub mod lint;
pub mod pretty;
pub mod sarif;

use crate::finding::ValidationReport;

/// Supported output formats for validation reports.
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored text.
    Pretty,
    /// Machine-readable JSON.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/) for code scanning uploads.
    Sarif,
}

/// Formats a [`ValidationReport`] in the requested [`OutputFormat`].
///
/// # Examples
///
/// ```rust,no_run
/// use registry_validator::output::{format_report, OutputFormat};
/// # use registry_validator::finding::ValidationReport;
/// # fn example(report: &ValidationReport) {
/// let json = format_report(report, &OutputFormat::Json);
/// println!("{json}");
/// # }
/// ```
pub fn format_report(report: &ValidationReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report),
        OutputFormat::Json => json::format(report),
        OutputFormat::Sarif => sarif::format(report),
    }
}
