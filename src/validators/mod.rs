//! Per-kind content validators.
//!
//! Every resource kind has one [`KindValidator`]. The pipeline runs the
//! validators of different kinds in parallel via [rayon], so implementers
//! must be [`Send`] + [`Sync`].
//!
//! Shared field checks live in [`fields`].

pub mod contributor;
pub mod fields;
pub mod resource;
pub mod template;

use crate::config::Config;
use crate::finding::Finding;
use crate::frontmatter::ResourceRecord;
use crate::readme::ResourceKind;

pub trait KindValidator: Send + Sync {
    fn kind(&self) -> ResourceKind;

    /// Checks a single parsed record. Findings need not carry a file; the
    /// pipeline attributes them to `record.file_path`.
    fn validate(&self, record: &ResourceRecord, config: &Config) -> Vec<Finding>;

    /// Checks relations between records of this kind. Findings must be
    /// attributed by the implementation.
    fn validate_batch(&self, _records: &[&ResourceRecord], _config: &Config) -> Vec<Finding> {
        vec![]
    }
}

pub fn validator_for(kind: ResourceKind) -> Box<dyn KindValidator> {
    match kind {
        ResourceKind::Contributor => Box::new(contributor::ContributorValidator),
        ResourceKind::Module => Box::new(resource::ModuleValidator),
        ResourceKind::Template => Box::new(template::TemplateValidator),
    }
}
