//! Contributor profile validation (`registry/<namespace>/README.md`).

use crate::config::Config;
use crate::finding::{ErrorKind, Finding};
use crate::frontmatter::{ContributorFrontmatter, Frontmatter, ResourceRecord};
use crate::readme::ResourceKind;
use crate::validators::{fields, KindValidator};
use std::collections::{BTreeMap, BTreeSet};

pub const VALID_CONTRIBUTOR_STATUSES: &[&str] = &["official", "partner", "community"];

/// Validates every field of a contributor profile independently.
pub fn validate_contributor(fm: &ContributorFrontmatter, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    findings.extend(fields::validate_required("display_name", &fm.display_name));
    findings.extend(validate_github_identifier(&fm.github));
    findings.extend(validate_employer(fm.employer_github.as_deref(), &fm.github));

    if let Some(status) = fm.status.as_deref() {
        findings.extend(fields::validate_enum(
            "contributor status",
            status,
            VALID_CONTRIBUTOR_STATUSES,
        ));
    }

    findings.extend(fields::validate_absolute_url("linkedin", fm.linkedin.as_deref()));
    findings.extend(fields::validate_absolute_url("website", fm.website.as_deref()));
    findings.extend(fields::validate_email(fm.support_email.as_deref()));

    if let Some(avatar) = fm.avatar.as_deref() {
        findings.extend(validate_avatar(avatar, config));
    }

    findings
}

fn validate_github_identifier(github: &str) -> Option<Finding> {
    if let Some(missing) = fields::validate_required("github", github) {
        return Some(missing);
    }
    (!fields::is_path_segment_safe(&github.to_lowercase())).then(|| {
        Finding::new(
            "field/invalid-github",
            ErrorKind::FieldValidation,
            format!("GitHub username {github:?} is not a valid URL path segment"),
        )
    })
}

fn validate_employer(employer: Option<&str>, own: &str) -> Vec<Finding> {
    let Some(employer) = employer else {
        return vec![];
    };
    if employer.trim().is_empty() {
        return vec![Finding::new(
            "field/invalid-employer",
            ErrorKind::FieldValidation,
            "employer_github is defined but has an empty value",
        )];
    }

    let mut findings = Vec::new();
    if !fields::is_path_segment_safe(&employer.to_lowercase()) {
        findings.push(Finding::new(
            "field/invalid-employer",
            ErrorKind::FieldValidation,
            format!("employer GitHub username {employer:?} is not a valid URL path segment"),
        ));
    }
    if employer.eq_ignore_ascii_case(own) {
        findings.push(Finding::new(
            "field/invalid-employer",
            ErrorKind::FieldValidation,
            format!("cannot list own GitHub username {own:?} as employer"),
        ));
    }
    findings
}

fn validate_avatar(avatar: &str, config: &Config) -> Vec<Finding> {
    let mut findings =
        fields::validate_asset_url("avatar", avatar, &config.urls.avatar_relative_prefixes);
    if avatar.trim().is_empty() {
        return findings;
    }

    let lower = avatar.to_lowercase();
    let extensions = &config.urls.avatar_extensions;
    if !extensions.iter().any(|ext| lower.ends_with(ext.as_str())) {
        findings.push(Finding::new(
            "field/invalid-asset-url",
            ErrorKind::FieldValidation,
            format!(
                "avatar URL {avatar:?} does not end in a supported file format: [{}]",
                extensions.join(", ")
            ),
        ));
    }
    findings
}

/// Resolves every `employer_github` against the contributors of the same
/// batch. Each unknown employer is reported once, on every referencing
/// profile, naming all of them.
pub fn validate_employer_references(records: &[&ResourceRecord]) -> Vec<Finding> {
    let known: BTreeSet<String> = records
        .iter()
        .filter_map(|r| match &r.frontmatter {
            Frontmatter::Contributor(fm) => Some(fm.github.to_lowercase()),
            _ => None,
        })
        .collect();

    let mut unresolved: BTreeMap<String, Vec<&ResourceRecord>> = BTreeMap::new();
    for record in records {
        let Frontmatter::Contributor(fm) = &record.frontmatter else {
            continue;
        };
        let Some(employer) = fm.employer_github.as_deref() else {
            continue;
        };
        if employer.trim().is_empty() || employer.eq_ignore_ascii_case(&fm.github) {
            continue;
        }
        if !known.contains(&employer.to_lowercase()) {
            unresolved.entry(employer.to_string()).or_default().push(*record);
        }
    }

    let mut findings = Vec::new();
    for (employer, referencing) in unresolved {
        let names: Vec<&str> = referencing.iter().map(|r| r.namespace.as_str()).collect();
        for record in &referencing {
            findings.push(
                Finding::new(
                    "field/unknown-employer",
                    ErrorKind::FieldValidation,
                    format!(
                        "employer {employer:?} is not a contributor in this registry but is referenced by [{}]",
                        names.join(", ")
                    ),
                )
                .at(&record.file_path),
            );
        }
    }
    findings
}

pub struct ContributorValidator;

impl KindValidator for ContributorValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Contributor
    }

    fn validate(&self, record: &ResourceRecord, config: &Config) -> Vec<Finding> {
        match &record.frontmatter {
            Frontmatter::Contributor(fm) => validate_contributor(fm, config),
            _ => vec![],
        }
    }

    fn validate_batch(&self, records: &[&ResourceRecord], _config: &Config) -> Vec<Finding> {
        validate_employer_references(records)
    }
}
