//! README documents and the frontmatter/body splitter.
//!
//! Every registry README starts with a YAML block delimited by two `---`
//! fence lines, followed by the markdown body:
//!
//! ```text
//! ---
//! display_name: Acme
//! github: acme
//! ---
//!
//! # Acme
//! ```
//!
//! [`split_frontmatter`] separates the two halves without interpreting the
//! YAML; schema checks happen later in [`crate::frontmatter`].

use std::fmt;
use std::path::{Component, Path, PathBuf};

const FENCE: &str = "---";

/// The three kinds of registry document.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Contributor,
    Module,
    Template,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Contributor,
        ResourceKind::Module,
        ResourceKind::Template,
    ];

    /// Name of the per-namespace subdirectory holding resources of this kind.
    /// Contributors live directly in the namespace directory.
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Contributor => None,
            ResourceKind::Module => Some("modules"),
            ResourceKind::Template => Some("templates"),
        }
    }

    pub fn from_dir_name(name: &str) -> Option<ResourceKind> {
        match name {
            "modules" => Some(ResourceKind::Module),
            "templates" => Some(ResourceKind::Template),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Contributor => f.write_str("contributor"),
            ResourceKind::Module => f.write_str("module"),
            ResourceKind::Template => f.write_str("template"),
        }
    }
}

/// A README file as read from disk. `file_path` is relative to the
/// repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeDocument {
    pub file_path: PathBuf,
    pub raw_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("README is empty")]
    Empty,
    #[error("README does not start with an opening frontmatter fence (---)")]
    MissingOpeningFence,
    #[error("README does not have a closing frontmatter fence (---)")]
    MissingClosingFence,
    #[error("README has frontmatter fences but no frontmatter content")]
    EmptyFrontmatter,
}

/// Frontmatter and body of a README, in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReadme {
    /// Frontmatter lines, each trimmed, joined with `\n`.
    pub frontmatter: String,
    /// Everything after the closing fence, trimmed only at its outer edges.
    pub body: String,
}

/// Separates a README's frontmatter from its body.
///
/// The input is trimmed first, so leading blank lines before the opening
/// fence are tolerated. Frontmatter lines are trimmed individually; body
/// lines are kept verbatim. `---` lines after the closing fence belong to
/// the body (they are markdown thematic breaks there).
///
/// # Errors
///
/// See [`SplitError`]. A first line other than `---` fails immediately
/// without scanning the rest of the text.
pub fn split_frontmatter(text: &str) -> Result<SplitReadme, SplitError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SplitError::Empty);
    }

    let mut frontmatter = String::new();
    let mut body = String::new();
    let mut fence_count = 0usize;

    for line in trimmed.lines() {
        if fence_count < 2 && line.trim_end() == FENCE {
            fence_count += 1;
            continue;
        }
        if fence_count == 0 {
            return Err(SplitError::MissingOpeningFence);
        }

        if fence_count >= 2 {
            body.push_str(line);
            body.push('\n');
        } else {
            frontmatter.push_str(line.trim());
            frontmatter.push('\n');
        }
    }

    if fence_count < 2 {
        return Err(SplitError::MissingClosingFence);
    }
    if frontmatter.trim().is_empty() {
        return Err(SplitError::EmptyFrontmatter);
    }

    Ok(SplitReadme {
        frontmatter,
        body: body.trim().to_string(),
    })
}

/// Namespace and name decoded from a resource README path of the form
/// `<registry_dir>/<namespace>/<modules|templates>/<name>/README.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    pub kind: ResourceKind,
    pub namespace: String,
    pub name: String,
}

impl ResourcePath {
    /// Returns `None` unless `path` has exactly the five expected segments
    /// with the fixed literals in place.
    pub fn parse(path: &Path, registry_dir: &str) -> Option<ResourcePath> {
        let parts = normal_segments(path)?;
        match parts.as_slice() {
            [root, namespace, kind_dir, name, file]
                if root == registry_dir && file == "README.md" =>
            {
                Some(ResourcePath {
                    kind: ResourceKind::from_dir_name(kind_dir)?,
                    namespace: namespace.clone(),
                    name: name.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Namespace of a contributor README path (`<registry_dir>/<namespace>/README.md`).
pub fn contributor_namespace(path: &Path, registry_dir: &str) -> Option<String> {
    let parts = normal_segments(path)?;
    match parts.as_slice() {
        [root, namespace, file] if root == registry_dir && file == "README.md" => {
            Some(namespace.clone())
        }
        _ => None,
    }
}

fn normal_segments(path: &Path) -> Option<Vec<String>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| match c {
            Component::Normal(s) => s.to_str().map(str::to_string),
            _ => None,
        })
        .collect()
}
