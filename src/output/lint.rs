//! Output for the `lint-template` command.

use crate::sections::TemplateLint;
use colored::Colorize;

/// Formats linter results as colored text, one block per file.
pub fn format_pretty(lints: &[TemplateLint]) -> String {
    let mut out = String::new();

    for lint in lints {
        out.push_str(&format!("\n{} {}\n", "Linting".bold(), lint.path));

        if let Some(error) = &lint.error {
            out.push_str(&format!("  [{}] {error}\n", "ERROR".red().bold()));
            continue;
        }

        for result in &lint.results {
            if !result.errors.is_empty() {
                out.push_str(&format!("\n[{}] {}:\n", "ERROR".red().bold(), result.section));
                for error in &result.errors {
                    out.push_str(&format!("  - {error}\n"));
                }
            }
            if !result.suggestions.is_empty() {
                out.push_str(&format!("\n[{}] {}:\n", "SUGGESTIONS".cyan(), result.section));
                for suggestion in &result.suggestions {
                    out.push_str(&format!("  - {suggestion}\n"));
                }
            }
        }

        if !lint.has_errors() {
            out.push_str(&format!("\n{}\n", "No errors found!".green().bold()));
        }
    }

    out
}

/// Formats linter results as a pretty-printed JSON array.
///
/// # Panics
///
/// Panics if the results cannot be serialized (should not happen with valid data).
pub fn format_json(lints: &[TemplateLint]) -> String {
    serde_json::to_string_pretty(lints).expect("JSON serialization failed")
}
