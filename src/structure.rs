//! Directory structure validation.
//!
//! Runs before any README content is read and gates every later phase.
//! All violations are collected, not just the first one.
//!
//! # Rules
//!
//! | ID | What it checks |
//! |----|----------------|
//! | `structure/missing-registry-dir` | The registry root exists and is a directory |
//! | `structure/non-directory-entry` | Every entry under the registry root is a namespace directory |
//! | `structure/missing-namespace-readme` | Every namespace has a `README.md` |
//! | `structure/resource-dir-not-directory` | `modules`/`templates` are directories when present |
//! | `structure/non-directory-resource` | Every entry inside `modules`/`templates` is a directory |
//! | `structure/missing-resource-readme` | Every resource has a `README.md` |
//! | `structure/missing-definition-file` | Every resource has a `main.tf` |
//! | `structure/missing-assets-dir` | The shared assets directory exists |
//! | `structure/unreadable-directory` | Registry and resource directories can be listed |

use crate::config::Config;
use crate::finding::{ErrorKind, Finding};
use crate::readme::ResourceKind;
use std::path::Path;
use walkdir::WalkDir;

/// Primary Terraform definition file every module and template must ship.
pub const DEFINITION_FILE: &str = "main.tf";

fn structure_finding(rule_id: &str, message: impl Into<String>, rel: &Path) -> Finding {
    Finding::new(rule_id, ErrorKind::FileStructure, message).at(rel)
}

/// A directory walk error, attributed to the failing path when it is known.
fn unreadable_finding(root: &Path, err: &walkdir::Error, fallback: &Path) -> Finding {
    let rel = err
        .path()
        .and_then(|p| p.strip_prefix(root).ok())
        .unwrap_or(fallback);
    structure_finding(
        "structure/unreadable-directory",
        format!("could not read directory entry: {err}"),
        rel,
    )
}

/// Validates the repository shape under `root`.
pub fn validate_structure(root: &Path, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();
    let registry_rel = Path::new(&config.registry.registry_dir);
    let registry_abs = root.join(registry_rel);

    let assets_rel = Path::new(&config.registry.assets_dir);
    if !root.join(assets_rel).is_dir() {
        findings.push(structure_finding(
            "structure/missing-assets-dir",
            format!(
                "shared assets directory {:?} does not exist at the repository root",
                config.registry.assets_dir
            ),
            assets_rel,
        ));
    }

    if !registry_abs.is_dir() {
        findings.push(structure_finding(
            "structure/missing-registry-dir",
            "registry directory does not exist or is not a directory",
            registry_rel,
        ));
        return findings;
    }

    for entry in WalkDir::new(&registry_abs)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                findings.push(unreadable_finding(root, &e, registry_rel));
                continue;
            }
        };
        let ns_rel = registry_rel.join(entry.file_name());

        if !entry.file_type().is_dir() {
            findings.push(structure_finding(
                "structure/non-directory-entry",
                "detected non-directory file at base of the registry directory",
                &ns_rel,
            ));
            continue;
        }

        if !root.join(&ns_rel).join("README.md").is_file() {
            findings.push(structure_finding(
                "structure/missing-namespace-readme",
                "namespace directory is missing README.md",
                &ns_rel,
            ));
        }

        for kind in [ResourceKind::Module, ResourceKind::Template] {
            if let Some(sub) = kind.dir_name() {
                findings.extend(validate_resource_directory(root, &ns_rel.join(sub)));
            }
        }
    }

    findings
}

/// Checks a `modules`/`templates` directory. It is valid for the directory
/// not to exist; if it does, every resource inside must be complete.
fn validate_resource_directory(root: &Path, dir_rel: &Path) -> Vec<Finding> {
    let mut findings = Vec::new();
    let dir_abs = root.join(dir_rel);

    if !dir_abs.exists() {
        return findings;
    }
    if !dir_abs.is_dir() {
        findings.push(structure_finding(
            "structure/resource-dir-not-directory",
            "path is not a directory",
            dir_rel,
        ));
        return findings;
    }

    for entry in WalkDir::new(&dir_abs)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                findings.push(unreadable_finding(root, &e, dir_rel));
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let resource_rel = dir_rel.join(&name);

        if !entry.file_type().is_dir() {
            findings.push(structure_finding(
                "structure/non-directory-resource",
                "resource entry is not a directory",
                &resource_rel,
            ));
            continue;
        }

        let readme_rel = resource_rel.join("README.md");
        if !root.join(&readme_rel).is_file() {
            findings.push(structure_finding(
                "structure/missing-resource-readme",
                "README file does not exist",
                &readme_rel,
            ));
        }
        let definition_rel = resource_rel.join(DEFINITION_FILE);
        if !root.join(&definition_rel).is_file() {
            findings.push(structure_finding(
                "structure/missing-definition-file",
                format!("{DEFINITION_FILE} does not exist"),
                &definition_rel,
            ));
        }
    }

    findings
}
