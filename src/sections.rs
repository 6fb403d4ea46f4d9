//! Template README sections.
//!
//! Below its h1 section a template README documents itself in a fixed set
//! of `## ` sections:
//!
//! | Section | Min items | Also requires |
//! |---------|-----------|---------------|
//! | Prerequisites | 2 | |
//! | Infrastructure | 4 | a ```` ```mermaid ```` block or an image |
//! | Usage | 4 | a code block and a `terraform {` example |
//! | Cost and Permissions | 4 | |
//! | Variables | 1 | a `\| Name \| Type \|` table |
//!
//! [`validate_template_sections`] enforces the table during content
//! validation. [`lint_template_sections`] is the stricter, pattern-based
//! review behind the `lint-template` command; its results never fail a
//! validation run.

use crate::finding::{ErrorKind, Finding};
use crate::readme::split_frontmatter;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

const SECTION_PREFIX: &str = "## ";

/// Content expectations for one required section.
pub struct TemplateSection {
    pub name: &'static str,
    /// Minimum number of content lines for validation.
    pub min_items: usize,
    /// Minimum number of lines for the linter.
    pub min_lines: usize,
    /// Linter patterns; each must match at least one line.
    pub patterns: &'static [&'static str],
    pub suggestions: &'static [&'static str],
}

pub static TEMPLATE_SECTIONS: &[TemplateSection] = &[
    TemplateSection {
        name: "Prerequisites",
        min_items: 2,
        min_lines: 3,
        patterns: &[r"^[-*]\s+\w+"],
        suggestions: &[
            "List all required tools and dependencies",
            "Specify minimum versions if applicable",
            "Include links to installation guides",
        ],
    },
    TemplateSection {
        name: "Infrastructure",
        min_items: 4,
        min_lines: 5,
        patterns: &[
            r"instance|machine|container|cluster|resource",
            r"\d+\s*(GB|MB|CPU|core)",
        ],
        suggestions: &[
            "Detail all infrastructure components",
            "Include resource specifications",
            "List any dependencies between resources",
        ],
    },
    TemplateSection {
        name: "Usage",
        min_items: 4,
        min_lines: 5,
        patterns: &["```", r"^\d+\.\s+\w+"],
        suggestions: &[
            "Provide step-by-step instructions",
            "Include code examples",
            "Show common customization options",
        ],
    },
    TemplateSection {
        name: "Cost and Permissions",
        min_items: 4,
        min_lines: 4,
        patterns: &[r"\$|\bUSD\b|cost", r"permission|role|policy|access"],
        suggestions: &[
            "Estimate hourly/monthly costs",
            "List required permissions/roles",
            "Include cost optimization tips",
        ],
    },
    TemplateSection {
        name: "Variables",
        min_items: 1,
        min_lines: 5,
        patterns: &[r"^\|\s*\w+\s*\|", r"type\s*=|description\s*=|\|\s*Type\s*\|"],
        suggestions: &[
            "Document all variables in a table",
            "Include type and description",
            "Provide default values",
        ],
    },
];

static COMPILED_PATTERNS: LazyLock<BTreeMap<&'static str, Vec<(&'static str, Regex)>>> =
    LazyLock::new(|| {
        TEMPLATE_SECTIONS
            .iter()
            .map(|section| {
                let compiled: Vec<_> = section
                    .patterns
                    .iter()
                    .map(|p| (*p, Regex::new(p).unwrap()))
                    .collect();
                (section.name, compiled)
            })
            .collect()
    });

/// Splits `body` into `## ` sections keyed by their trimmed title.
///
/// Lines before the first `## ` header are dropped. A repeated title keeps
/// the content of its last occurrence.
pub fn split_sections(body: &str) -> BTreeMap<String, String> {
    let mut sections = BTreeMap::new();
    let mut current: Option<String> = None;
    let mut content = String::new();

    for line in body.lines() {
        if let Some(title) = line.strip_prefix(SECTION_PREFIX) {
            if let Some(name) = current.take() {
                sections.insert(name, std::mem::take(&mut content));
            }
            current = Some(title.trim().to_string());
            continue;
        }
        if current.is_some() {
            content.push_str(line);
            content.push('\n');
        }
    }
    if let Some(name) = current {
        sections.insert(name, content);
    }

    sections
}

/// Non-blank lines that are neither headers nor thematic breaks.
fn content_items(content: &str) -> usize {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with("---"))
        .count()
}

fn section_finding(rule_id: &str, message: String) -> Finding {
    Finding::new(rule_id, ErrorKind::BodyStructure, message)
}

/// Structural markers a section must contain beyond its item count.
fn required_markers(name: &str, content: &str) -> Vec<String> {
    let mut missing = Vec::new();
    match name {
        "Usage" => {
            if !content.contains("```") {
                missing.push("Usage section must include code examples".to_string());
            }
            if !content.contains("terraform {") {
                missing.push(
                    "Usage section must include a Terraform configuration example (terraform {)"
                        .to_string(),
                );
            }
        }
        "Variables" => {
            if !content.contains("| Name | Type |") {
                missing.push(
                    "Variables section must include a table starting with | Name | Type |"
                        .to_string(),
                );
            }
        }
        "Infrastructure" => {
            if !content.contains("```mermaid") && !content.contains("![") {
                missing.push(
                    "Infrastructure section should include a diagram (```mermaid block or image)"
                        .to_string(),
                );
            }
        }
        _ => {}
    }
    missing
}

/// Checks that every required section is present and has enough content.
pub fn validate_template_sections(body: &str) -> Vec<Finding> {
    let sections = split_sections(body);
    let mut findings = Vec::new();

    for required in TEMPLATE_SECTIONS {
        let Some(content) = sections.get(required.name) else {
            findings.push(section_finding(
                "body/missing-template-section",
                format!("missing required section {:?}", required.name),
            ));
            continue;
        };

        if content_items(content) < required.min_items {
            findings.push(section_finding(
                "body/sparse-template-section",
                format!(
                    "section {:?} must have at least {} items",
                    required.name, required.min_items
                ),
            ));
        }
        findings.extend(
            required_markers(required.name, content)
                .into_iter()
                .map(|m| section_finding("body/incomplete-template-section", m)),
        );
    }

    findings
}

/// Linter verdict for one known section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionLint {
    pub section: String,
    pub errors: Vec<String>,
    pub suggestions: Vec<&'static str>,
}

/// Lints one section's content against its line count and patterns.
///
/// Returns `None` for sections the linter knows nothing about.
pub fn lint_section(name: &str, content: &str) -> Option<SectionLint> {
    let section = TEMPLATE_SECTIONS.iter().find(|s| s.name == name)?;
    let lines: Vec<&str> = content.trim().lines().collect();
    let mut errors = Vec::new();

    if lines.len() < section.min_lines {
        errors.push(format!(
            "section {name:?} must have at least {} lines of content",
            section.min_lines
        ));
    }
    for (pattern, re) in COMPILED_PATTERNS.get(name).into_iter().flatten() {
        if !lines.iter().any(|l| re.is_match(l)) {
            errors.push(format!(
                "section {name:?} missing required content matching {pattern:?}"
            ));
        }
    }

    Some(SectionLint {
        section: name.to_string(),
        errors,
        suggestions: section.suggestions.to_vec(),
    })
}

/// Lints every known section of `body`, in document order.
pub fn lint_template_sections(body: &str) -> Vec<SectionLint> {
    let sections = split_sections(body);
    let mut seen = BTreeSet::new();
    body.lines()
        .filter_map(|l| l.strip_prefix(SECTION_PREFIX))
        .map(str::trim)
        .filter(|name| seen.insert(*name))
        .filter_map(|name| lint_section(name, sections.get(name)?))
        .collect()
}

/// Linter results for one template README file.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateLint {
    pub path: String,
    /// Set when the file could not be read or split; `results` is then empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<SectionLint>,
}

impl TemplateLint {
    pub fn has_errors(&self) -> bool {
        self.error.is_some() || self.results.iter().any(|r| !r.errors.is_empty())
    }
}

/// Reads and lints one template README.
///
/// Unreadable files and broken frontmatter are recorded on the result
/// rather than returned, so one bad file does not stop a directory run.
pub fn lint_file(path: &Path) -> TemplateLint {
    let display = path.to_string_lossy().replace('\\', "/");
    let split = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read file: {e}"))
        .and_then(|raw| {
            split_frontmatter(&raw).map_err(|e| format!("failed to parse template README: {e}"))
        });

    match split {
        Ok(readme) => TemplateLint {
            path: display,
            error: None,
            results: lint_template_sections(&readme.body),
        },
        Err(error) => TemplateLint {
            path: display,
            error: Some(error),
            results: vec![],
        },
    }
}
