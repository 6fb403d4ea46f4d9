//! Markdown body linter for modules and templates.
//!
//! The body's h1 section (everything between the first `# ` header and the
//! next top-level header) must contain at least one paragraph line and
//! exactly one ```` ```tf ```` block that references a `version`.
//!
//! Scanning is an explicit state machine. [`transition`] is a pure function
//! of `(state, line)`; [`lint_body`] folds it over the lines and turns the
//! emitted [`LineEvent`]s into findings at the end.
//!
//! ```text
//! BeforeH1 ──h1──▶ InH1Section ──```──▶ InCodeBlock(Plain|Terraform)
//!     │                 ▲  │                     │
//!     │                 └──┼──────── ``` ────────┘
//!     └──no h1──▶ Done ◀───┘ second header
//! ```

use crate::finding::{ErrorKind, Finding};
use regex::Regex;
use std::sync::LazyLock;

static RE_H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[ \t]+\S").unwrap());

/// A `version = ...` attribute line inside a Terraform block.
static RE_TERRAFORM_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\bversion\s+=").unwrap());

const CODE_FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeBlock {
    Plain,
    Terraform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    BeforeH1,
    InH1Section,
    InCodeBlock(CodeBlock),
    Done,
}

/// Something a single line contributed to the section's tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    MissingH1,
    TerraformBlockOpened,
    HclFence,
    VersionReference,
    Paragraph,
    SectionEnded,
}

/// Advances the section scanner by one line.
pub fn transition(state: SectionState, line: &str) -> (SectionState, Option<LineEvent>) {
    match state {
        SectionState::BeforeH1 => {
            if RE_H1.is_match(line) {
                (SectionState::InH1Section, None)
            } else {
                (SectionState::Done, Some(LineEvent::MissingH1))
            }
        }
        SectionState::InH1Section => {
            if line.starts_with(CODE_FENCE) {
                let tag = &line[CODE_FENCE.len()..];
                if tag.starts_with("tf") {
                    (
                        SectionState::InCodeBlock(CodeBlock::Terraform),
                        Some(LineEvent::TerraformBlockOpened),
                    )
                } else if tag.starts_with("hcl") {
                    (
                        SectionState::InCodeBlock(CodeBlock::Plain),
                        Some(LineEvent::HclFence),
                    )
                } else {
                    (SectionState::InCodeBlock(CodeBlock::Plain), None)
                }
            } else if line.starts_with('#') {
                (SectionState::Done, Some(LineEvent::SectionEnded))
            } else {
                let trimmed = line.trim();
                let is_paragraph =
                    !trimmed.is_empty() && !trimmed.starts_with("![") && !trimmed.starts_with('<');
                (
                    SectionState::InH1Section,
                    is_paragraph.then_some(LineEvent::Paragraph),
                )
            }
        }
        SectionState::InCodeBlock(block) => {
            if line.starts_with(CODE_FENCE) {
                let event = line[CODE_FENCE.len()..]
                    .starts_with("hcl")
                    .then_some(LineEvent::HclFence);
                (SectionState::InH1Section, event)
            } else if block == CodeBlock::Terraform && RE_TERRAFORM_VERSION.is_match(line) {
                (state, Some(LineEvent::VersionReference))
            } else {
                (state, None)
            }
        }
        SectionState::Done => (SectionState::Done, None),
    }
}

fn body_finding(rule_id: &str, message: &str) -> Finding {
    Finding::new(rule_id, ErrorKind::BodyStructure, message)
}

/// Lints a README body, returning every structural problem in one pass.
///
/// Only a missing h1 short-circuits: it is then the sole finding.
pub fn lint_body(body: &str) -> Vec<Finding> {
    let mut state = SectionState::BeforeH1;
    let mut findings = Vec::new();
    let mut terraform_blocks = 0usize;
    let mut found_version = false;
    let mut found_paragraph = false;

    for line in body.trim().lines() {
        let (next, event) = transition(state, line);
        state = next;
        match event {
            Some(LineEvent::MissingH1) => {
                return vec![missing_h1()];
            }
            Some(LineEvent::TerraformBlockOpened) => terraform_blocks += 1,
            Some(LineEvent::HclFence) => findings.push(body_finding(
                "body/hcl-code-block",
                "all hcl code blocks must be converted to tf",
            )),
            Some(LineEvent::VersionReference) => found_version = true,
            Some(LineEvent::Paragraph) => found_paragraph = true,
            Some(LineEvent::SectionEnded) | None => {}
        }
        if state == SectionState::Done {
            break;
        }
    }

    if state == SectionState::BeforeH1 {
        return vec![missing_h1()];
    }

    if terraform_blocks == 0 {
        findings.push(body_finding(
            "body/missing-terraform-block",
            "did not find Terraform code block within h1 section",
        ));
    } else {
        if terraform_blocks > 1 {
            findings.push(body_finding(
                "body/multiple-terraform-blocks",
                "cannot have more than one Terraform code block in h1 section",
            ));
        }
        if !found_version {
            findings.push(body_finding(
                "body/missing-version",
                "did not find Terraform code block that specifies 'version' field",
            ));
        }
    }
    if !found_paragraph {
        findings.push(body_finding(
            "body/missing-paragraph",
            "did not find paragraph within h1 section",
        ));
    }
    if matches!(state, SectionState::InCodeBlock(_)) {
        findings.push(body_finding(
            "body/unterminated-code-block",
            "code blocks inside h1 section do not all terminate before end of file",
        ));
    }

    findings
}

fn missing_h1() -> Finding {
    body_finding(
        "body/missing-h1",
        "README body does not start with ATX-style h1 header (denoted by a single #)",
    )
}
