//! Repository scanner.
//!
//! Discovers README documents per [`ResourceKind`] inside the fixed registry
//! layout and reads them from disk:
//!
//! ```text
//! registry/<namespace>/README.md                     contributor
//! registry/<namespace>/modules/<name>/README.md      module
//! registry/<namespace>/templates/<name>/README.md    template
//! ```
//!
//! Returned paths are relative to the repository root so that reports are
//! identical regardless of where the repository was checked out.

use crate::config::Config;
use crate::error::ValidatorError;
use crate::finding::{ErrorKind, Finding};
use crate::readme::{ReadmeDocument, ResourceKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Names of the immediate child directories of `dir`, sorted.
///
/// Missing or unreadable directories yield an empty list; the structure
/// phase is responsible for reporting those.
pub fn child_dirs(dir: &Path) -> Vec<String> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect()
}

/// Returns the repo-relative README paths for every resource of `kind`.
///
/// Resource directories whose names start with `.` (e.g. `.coder`) are
/// ignored.
pub fn discover(root: &Path, kind: ResourceKind, config: &Config) -> Vec<PathBuf> {
    let registry_dir = &config.registry.registry_dir;
    let mut paths = Vec::new();

    for namespace in child_dirs(&root.join(registry_dir)) {
        let ns_rel = Path::new(registry_dir).join(&namespace);
        match kind.dir_name() {
            None => paths.push(ns_rel.join("README.md")),
            Some(sub) => {
                let resources_rel = ns_rel.join(sub);
                for name in child_dirs(&root.join(&resources_rel)) {
                    if name.starts_with('.') {
                        continue;
                    }
                    paths.push(resources_rel.join(name).join("README.md"));
                }
            }
        }
    }

    paths
}

/// Reads every discovered README of `kind`.
///
/// Read failures are collected as `load/unreadable-readme` findings; the
/// remaining documents are still returned so that a single bad file does not
/// hide problems in the others.
pub fn load_documents(
    root: &Path,
    kind: ResourceKind,
    config: &Config,
) -> (Vec<ReadmeDocument>, Vec<Finding>) {
    let mut documents = Vec::new();
    let mut findings = Vec::new();

    for rel in discover(root, kind, config) {
        match std::fs::read_to_string(root.join(&rel)) {
            Ok(raw_text) => documents.push(ReadmeDocument {
                file_path: rel,
                raw_text,
            }),
            Err(e) => findings.push(
                Finding::new(
                    "load/unreadable-readme",
                    ErrorKind::FileLoad,
                    format!("failed to read README: {e}"),
                )
                .at(&rel),
            ),
        }
    }

    tracing::debug!(%kind, documents = documents.len(), errors = findings.len(), "loaded README files");
    (documents, findings)
}

fn is_readme_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("README.md")
}

/// README files for the template linter.
///
/// `path` may name a single `README.md`, or a directory that is searched for
/// `README.md` files inside a `templates` directory.
///
/// # Errors
///
/// Fails when `path` cannot be read, or names a file that is not a README.
pub fn template_readmes(path: &Path) -> Result<Vec<PathBuf>, ValidatorError> {
    let metadata = std::fs::metadata(path).map_err(|source| ValidatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        let is_readme = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_readme_name);
        return if is_readme {
            Ok(vec![path.to_path_buf()])
        } else {
            Err(ValidatorError::NotAReadme(path.to_path_buf()))
        };
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| ValidatorError::Io {
            path: e.path().unwrap_or(path).to_path_buf(),
            source: e.into(),
        })?;
        let is_readme = entry.file_type().is_file()
            && entry.file_name().to_str().is_some_and(is_readme_name);
        let in_templates = entry
            .path()
            .components()
            .any(|c| c.as_os_str() == "templates");
        if is_readme && in_templates {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(path = %path.display(), files = files.len(), "found template READMEs");
    Ok(files)
}
