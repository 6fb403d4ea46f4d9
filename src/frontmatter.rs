//! Frontmatter parsing into typed, per-kind records.
//!
//! Parsing is two-step:
//!
//! 1. A line-level closed-schema check rejects unknown top-level keys. It
//!    runs on the raw text *before* YAML deserialization, so an unknown key
//!    is reported even when the rest of the block is not valid YAML.
//! 2. [`serde_yaml`] deserializes the block into the kind's struct.
//!
//! Optional fields are `Option<T>`: `None` means "key omitted", which is
//! kept distinct from "present but empty" (`Some("")`) and "present but
//! false" (`Some(false)`).

use crate::finding::{ErrorKind, Finding};
use crate::readme::{self, ReadmeDocument, ResourceKind, ResourcePath};
use regex::Regex;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::LazyLock;

/// `key:` at the start of a (pre-trimmed) frontmatter line.
static RE_TOP_LEVEL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9_-]*)\s*:(\s|$)").unwrap());

pub const CONTRIBUTOR_KEYS: &[&str] = &[
    "display_name",
    "bio",
    "github",
    "avatar",
    "linkedin",
    "website",
    "support_email",
    "employer_github",
    "status",
];

pub const MODULE_KEYS: &[&str] = &[
    "description",
    "icon",
    "display_name",
    "verified",
    "tags",
    "supported_os",
    // Deprecated, still accepted for older READMEs.
    "maintainer_github",
];

pub const TEMPLATE_KEYS: &[&str] = &[
    "description",
    "icon",
    "display_name",
    "verified",
    "tags",
    "supported_os",
    "maintainer_github",
    "platform",
    "workload",
    "requirements",
];

pub fn allowed_keys(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Contributor => CONTRIBUTOR_KEYS,
        ResourceKind::Module => MODULE_KEYS,
        ResourceKind::Template => TEMPLATE_KEYS,
    }
}

/// Required string fields treat `key:` with no value like an empty string
/// so the schema validators can report them as missing.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ContributorFrontmatter {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub github: String,
    /// `None` lets the site build backfill the GitHub avatar.
    pub avatar: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub support_email: Option<String>,
    pub employer_github: Option<String>,
    pub status: Option<String>,
}

/// Fields shared by modules and templates.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct ResourceFrontmatter {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icon: String,
    pub display_name: Option<String>,
    pub verified: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub supported_os: Option<Vec<String>>,
    pub maintainer_github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct TemplateFrontmatter {
    #[serde(flatten)]
    pub resource: ResourceFrontmatter,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub platform: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub workload: String,
    pub requirements: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Frontmatter {
    Contributor(ContributorFrontmatter),
    Module(ResourceFrontmatter),
    Template(TemplateFrontmatter),
}

impl Frontmatter {
    /// Shared module/template fields; `None` for contributors.
    pub fn resource(&self) -> Option<&ResourceFrontmatter> {
        match self {
            Frontmatter::Contributor(_) => None,
            Frontmatter::Module(fm) => Some(fm),
            Frontmatter::Template(fm) => Some(&fm.resource),
        }
    }
}

/// A README after frontmatter parsing, with identity derived from its path.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub namespace: String,
    /// Resource directory name; the namespace itself for contributors.
    pub name: String,
    pub file_path: PathBuf,
    pub raw_frontmatter: String,
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Returns every top-level key in `frontmatter` that is not in `allowed`,
/// in order of appearance.
pub fn unknown_keys(frontmatter: &str, allowed: &[&str]) -> Vec<String> {
    frontmatter
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(|line| RE_TOP_LEVEL_KEY.captures(line))
        .map(|caps| caps[1].to_string())
        .filter(|key| !allowed.contains(&key.as_str()))
        .collect()
}

fn parse_finding(rule_id: &str, message: impl Into<String>) -> Finding {
    Finding::new(rule_id, ErrorKind::FrontmatterParse, message)
}

/// Parses a document of the given kind into a [`ResourceRecord`].
///
/// # Errors
///
/// Returns every parse problem found for the document, already attributed
/// to its path: fence errors, each unknown key, or the YAML error.
pub fn parse_record(
    doc: &ReadmeDocument,
    kind: ResourceKind,
    registry_dir: &str,
) -> Result<ResourceRecord, Vec<Finding>> {
    let attribute = |findings: Vec<Finding>| -> Vec<Finding> {
        findings.into_iter().map(|f| f.at(&doc.file_path)).collect()
    };

    let (namespace, name) = match kind {
        ResourceKind::Contributor => match readme::contributor_namespace(&doc.file_path, registry_dir) {
            Some(ns) => (ns.clone(), ns),
            None => {
                return Err(attribute(vec![parse_finding(
                    "frontmatter/unexpected-path",
                    format!("contributor README is not at {registry_dir}/<namespace>/README.md"),
                )]))
            }
        },
        _ => match ResourcePath::parse(&doc.file_path, registry_dir) {
            Some(p) if p.kind == kind => (p.namespace, p.name),
            _ => {
                return Err(attribute(vec![parse_finding(
                    "frontmatter/unexpected-path",
                    format!("{kind} README is not at {registry_dir}/<namespace>/<kind>/<name>/README.md"),
                )]))
            }
        },
    };

    let split = readme::split_frontmatter(&doc.raw_text).map_err(|e| {
        let rule_id = match e {
            readme::SplitError::Empty => "frontmatter/empty-readme",
            readme::SplitError::MissingOpeningFence => "frontmatter/missing-opening-fence",
            readme::SplitError::MissingClosingFence => "frontmatter/missing-closing-fence",
            readme::SplitError::EmptyFrontmatter => "frontmatter/empty-frontmatter",
        };
        attribute(vec![parse_finding(rule_id, e.to_string())])
    })?;

    let unknown = unknown_keys(&split.frontmatter, allowed_keys(kind));
    if !unknown.is_empty() {
        return Err(attribute(
            unknown
                .into_iter()
                .map(|key| {
                    parse_finding(
                        "frontmatter/unknown-key",
                        format!("detected unknown key {key:?} in {kind} frontmatter"),
                    )
                })
                .collect(),
        ));
    }

    let frontmatter = deserialize(&split.frontmatter, kind).map_err(|e| {
        attribute(vec![parse_finding(
            "frontmatter/invalid-yaml",
            format!("failed to parse frontmatter as YAML: {e}"),
        )])
    })?;

    Ok(ResourceRecord {
        kind,
        namespace,
        name,
        file_path: doc.file_path.clone(),
        raw_frontmatter: split.frontmatter,
        frontmatter,
        body: split.body,
    })
}

fn deserialize(yaml: &str, kind: ResourceKind) -> Result<Frontmatter, serde_yaml::Error> {
    Ok(match kind {
        ResourceKind::Contributor => Frontmatter::Contributor(serde_yaml::from_str(yaml)?),
        ResourceKind::Module => Frontmatter::Module(serde_yaml::from_str(yaml)?),
        ResourceKind::Template => Frontmatter::Template(serde_yaml::from_str(yaml)?),
    })
}

#[derive(Deserialize)]
struct VerifiedOnly {
    verified: Option<bool>,
}

/// Extracts only the `verified` flag from a README, ignoring every other
/// field. Used for baseline snapshots, whose schema may predate the
/// current one.
pub fn verified_flag(raw_text: &str) -> Option<bool> {
    let split = readme::split_frontmatter(raw_text).ok()?;
    serde_yaml::from_str::<VerifiedOnly>(&split.frontmatter)
        .ok()?
        .verified
}
