//! Template validation: everything a module gets, plus the template-only
//! `platform`, `workload` and `requirements` fields and the required `## `
//! sections of the body.

use crate::config::Config;
use crate::finding::{ErrorKind, Finding};
use crate::frontmatter::{Frontmatter, ResourceRecord, TemplateFrontmatter};
use crate::readme::ResourceKind;
use crate::sections;
use crate::validators::{fields, resource, KindValidator};

pub const VALID_PLATFORMS: &[&str] = &[
    "aws",
    "gcp",
    "azure",
    "kubernetes",
    "docker",
    "digitalocean",
    "openstack",
    "vsphere",
    "other",
];

pub const VALID_WORKLOADS: &[&str] = &[
    "development",
    "data-science",
    "devops",
    "security",
    "design",
    "ml",
    "other",
];

pub fn validate_template_fields(fm: &TemplateFrontmatter) -> Vec<Finding> {
    let mut findings = Vec::new();

    match fields::validate_required("platform", &fm.platform) {
        Some(missing) => findings.push(missing),
        None => findings.extend(fields::validate_enum("platform", &fm.platform, VALID_PLATFORMS)),
    }
    match fields::validate_required("workload", &fm.workload) {
        Some(missing) => findings.push(missing),
        None => findings.extend(fields::validate_enum("workload", &fm.workload, VALID_WORKLOADS)),
    }

    for (i, requirement) in fm.requirements.iter().flatten().enumerate() {
        if requirement.trim().is_empty() {
            findings.push(Finding::new(
                "field/empty-requirement",
                ErrorKind::FieldValidation,
                format!("requirements entry {} is empty", i + 1),
            ));
        }
    }

    findings
}

pub struct TemplateValidator;

impl KindValidator for TemplateValidator {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Template
    }

    fn validate(&self, record: &ResourceRecord, config: &Config) -> Vec<Finding> {
        let Frontmatter::Template(fm) = &record.frontmatter else {
            return vec![];
        };
        let mut findings = resource::validate_resource(&fm.resource, record, config);
        findings.extend(validate_template_fields(fm));
        findings.extend(sections::validate_template_sections(&record.body));
        findings
    }
}
