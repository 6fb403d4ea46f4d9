//! Module validation, and the checks modules share with templates.

use crate::body;
use crate::config::Config;
use crate::finding::Finding;
use crate::frontmatter::{Frontmatter, ResourceFrontmatter, ResourceRecord};
use crate::readme::ResourceKind;
use crate::source_url;
use crate::validators::{fields, KindValidator};

/// Frontmatter checks common to modules and templates.
pub fn validate_resource_fields(fm: &ResourceFrontmatter, config: &Config) -> Vec<Finding> {
    let mut findings = Vec::new();

    findings.extend(fields::validate_required("description", &fm.description));
    findings.extend(fields::validate_optional_non_empty(
        "display_name",
        fm.display_name.as_deref(),
    ));
    findings.extend(fields::validate_optional_non_empty(
        "maintainer_github",
        fm.maintainer_github.as_deref(),
    ));
    findings.extend(fields::validate_asset_url(
        "icon",
        &fm.icon,
        &config.urls.icon_relative_prefixes,
    ));
    findings.extend(fields::validate_tags(fm.tags.as_deref()));
    findings.extend(fields::validate_operating_systems(fm.supported_os.as_deref()));

    findings
}

/// Frontmatter, body structure and source URL of one module or template.
pub fn validate_resource(
    fm: &ResourceFrontmatter,
    record: &ResourceRecord,
    config: &Config,
) -> Vec<Finding> {
    let mut findings = validate_resource_fields(fm, config);
    findings.extend(body::lint_body(&record.body));
    findings.extend(source_url::validate_source_url(
        &record.body,
        &record.file_path,
        config,
    ));
    findings
}

pub struct ModuleValidator;

impl KindValidator for ModuleValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Module
    }

    fn validate(&self, record: &ResourceRecord, config: &Config) -> Vec<Finding> {
        match &record.frontmatter {
            Frontmatter::Module(fm) => validate_resource(fm, record, config),
            _ => vec![],
        }
    }
}
