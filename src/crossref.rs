//! Cross-reference validation: relative icon and avatar URLs must point at
//! files that exist in the repository.
//!
//! Paths are resolved lexically. A URL starting with `/` is relative to the
//! repository root, anything else is relative to the README's directory.
//! Absolute URLs are not fetched.

use crate::finding::{ErrorKind, Finding};
use crate::frontmatter::{Frontmatter, ResourceRecord};
use crate::validators::fields;
use std::path::{Component, Path, PathBuf};

/// Relative asset URL of a record, with the field it came from.
fn asset_reference(record: &ResourceRecord) -> Option<(&'static str, &str)> {
    let (field, value) = match &record.frontmatter {
        Frontmatter::Contributor(fm) => ("avatar", fm.avatar.as_deref()?),
        Frontmatter::Module(fm) => ("icon", fm.icon.as_str()),
        Frontmatter::Template(fm) => ("icon", fm.resource.icon.as_str()),
    };
    fields::is_relative_url(value).then_some((field, value))
}

/// Resolves `url` against `readme` without touching the filesystem.
///
/// Returns `None` when the result would leave the repository.
pub fn resolve_relative(readme: &Path, url: &str) -> Option<PathBuf> {
    let (base, rest) = match url.strip_prefix('/') {
        Some(rest) => (PathBuf::new(), rest),
        None => (readme.parent().map(Path::to_path_buf).unwrap_or_default(), url),
    };

    let mut resolved = PathBuf::new();
    for component in base.join(rest).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return None;
                }
            }
            Component::Normal(part) => resolved.push(part),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

fn crossref_finding(rule_id: &str, message: String, file: &Path) -> Finding {
    Finding::new(rule_id, ErrorKind::CrossReference, message).at(file)
}

/// Checks the relative asset URLs of `records` against files under `root`.
pub fn validate_cross_references(root: &Path, records: &[&ResourceRecord]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for record in records {
        let Some((field, url)) = asset_reference(record) else {
            continue;
        };
        match resolve_relative(&record.file_path, url) {
            None => findings.push(crossref_finding(
                "crossref/asset-outside-repo",
                format!("{field} URL {url:?} resolves outside the repository"),
                &record.file_path,
            )),
            Some(target) if !root.join(&target).is_file() => findings.push(crossref_finding(
                "crossref/missing-asset",
                format!(
                    "{field} URL {url:?} points to {}, which does not exist",
                    target.to_string_lossy().replace('\\', "/")
                ),
                &record.file_path,
            )),
            Some(_) => {}
        }
    }

    findings
}
