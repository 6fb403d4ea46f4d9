//! Terraform `source` URL validation.
//!
//! A module or template README must show how to import itself, i.e. some
//! ```` ```tf ```` block must contain
//! `source = "<domain>/<namespace>/<name>/coder"` where namespace and name
//! come from the README's own path.

use crate::config::Config;
use crate::finding::{ErrorKind, Finding};
use crate::readme::ResourcePath;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_TERRAFORM_SOURCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*source\s*=\s*"([^"]+)""#).unwrap());

pub fn expected_source(domain: &str, namespace: &str, name: &str) -> String {
    format!("{domain}/{namespace}/{name}/coder")
}

fn source_finding(rule_id: &str, message: String) -> Finding {
    Finding::new(rule_id, ErrorKind::SourceUrl, message)
}

/// Checks every Terraform block in `body` for the canonical source URL.
///
/// The first exact match wins and ends the scan. Otherwise the first source
/// that has the right domain and resource name but a different namespace is
/// reported as incorrect; failing that, the source is reported missing.
pub fn validate_source_url(body: &str, file_path: &Path, config: &Config) -> Vec<Finding> {
    let Some(resource) = ResourcePath::parse(file_path, &config.registry.registry_dir) else {
        return vec![source_finding(
            "source/invalid-path",
            format!(
                "invalid path format: expected {}/<namespace>/<modules|templates>/<name>/README.md",
                config.registry.registry_dir
            ),
        )];
    };

    let domain = &config.registry.domain;
    let expected = expected_source(domain, &resource.namespace, &resource.name);
    let domain_prefix = format!("{domain}/");
    let name_suffix = format!("/{}/coder", resource.name);

    let mut in_block = false;
    let mut in_terraform = false;
    let mut first_mismatch: Option<String> = None;

    for line in body.trim().lines() {
        if line.starts_with("```") {
            in_terraform = !in_block && line.starts_with("```tf");
            in_block = !in_block;
            continue;
        }
        if !in_terraform {
            continue;
        }
        let Some(caps) = RE_TERRAFORM_SOURCE.captures(line) else {
            continue;
        };
        let actual = &caps[1];
        if actual == expected {
            return vec![];
        }
        if first_mismatch.is_none()
            && actual.starts_with(&domain_prefix)
            && actual.contains(&name_suffix)
        {
            first_mismatch = Some(actual.to_string());
        }
    }

    match first_mismatch {
        Some(actual) => vec![source_finding(
            "source/incorrect-source-url",
            format!("incorrect source URL: found {actual:?}, expected {expected:?}"),
        )],
        None => vec![source_finding(
            "source/missing-source-url",
            format!("did not find source URL {expected:?} in any Terraform code block"),
        )],
    }
}
