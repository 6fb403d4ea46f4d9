//! Validation pipeline.
//!
//! The [`run_validation`] function drives the five [`ValidationPhase`]s in
//! order. Each phase is exhaustive: it collects every error from every
//! document before the next one is considered. The first phase that
//! produces errors ends the run, since every later phase relies on the
//! invariants the earlier ones establish.
//!
//! Within a phase the selected resource kinds are processed **in parallel**
//! via [rayon]. Every worker returns its own findings and records, and the
//! driver merges them once all workers have finished.

use crate::auth::{self, Actor};
use crate::config::Config;
use crate::crossref;
use crate::error::ValidatorError;
use crate::finding::{ErrorKind, Finding, PhaseError, ValidationPhase, ValidationReport};
use crate::frontmatter::{self, Frontmatter, ResourceRecord};
use crate::readme::{ReadmeDocument, ResourceKind};
use crate::scanner;
use crate::structure;
use crate::validators;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Everything a run depends on besides the repository itself.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub config: Config,
    /// Who made the change; consulted by the verified-flag gate.
    pub actor: Actor,
    /// Prior checkout of the repository. Without one, the verified-flag
    /// gate has nothing to compare against and does not run.
    pub baseline: Option<PathBuf>,
}

impl ValidationContext {
    pub fn new(config: Config) -> Self {
        ValidationContext {
            config,
            ..Default::default()
        }
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_baseline(mut self, baseline: impl Into<PathBuf>) -> Self {
        self.baseline = Some(baseline.into());
        self
    }
}

type RecordsByKind = BTreeMap<ResourceKind, BTreeMap<PathBuf, ResourceRecord>>;

/// Progress shared between the phase driver and the report.
#[derive(Default)]
struct RunState {
    completed: Vec<ValidationPhase>,
    documents: usize,
}

/// Runs the full validation pipeline over the repository at `root`.
///
/// Only the `kinds` given are loaded and validated; the structure phase
/// always checks the whole tree.
///
/// # Errors
///
/// Only fatal setup problems are errors. Validation problems are reported
/// through [`ValidationReport::failure`].
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use registry_validator::config::Config;
/// use registry_validator::pipeline::{run_validation, ValidationContext};
/// use registry_validator::readme::ResourceKind;
///
/// let ctx = ValidationContext::new(Config::default());
/// let report = run_validation(Path::new("."), &ResourceKind::ALL, &ctx).unwrap();
/// std::process::exit(if report.passed { 0 } else { 1 });
/// ```
pub fn run_validation(
    root: &Path,
    kinds: &[ResourceKind],
    ctx: &ValidationContext,
) -> Result<ValidationReport, ValidatorError> {
    if !root.is_dir() {
        return Err(ValidatorError::RootNotFound(root.to_path_buf()));
    }
    if let Some(baseline) = &ctx.baseline {
        if !baseline.is_dir() {
            return Err(ValidatorError::RootNotFound(baseline.clone()));
        }
    }

    let mut kinds = kinds.to_vec();
    kinds.sort();
    kinds.dedup();

    let start = Instant::now();
    let mut state = RunState::default();
    let failure = run_phases(root, &kinds, ctx, &mut state).err();

    match &failure {
        Some(f) => tracing::info!(phase = %f.phase, errors = f.errors.len(), "validation failed"),
        None => tracing::info!(documents = state.documents, "validation passed"),
    }

    Ok(ValidationReport::new(
        root,
        &kinds,
        state.completed,
        failure,
        state.documents,
        start.elapsed().as_millis() as u64,
    ))
}

fn run_phases(
    root: &Path,
    kinds: &[ResourceKind],
    ctx: &ValidationContext,
    state: &mut RunState,
) -> Result<(), PhaseError> {
    let config = &ctx.config;

    let phase = ValidationPhase::FileStructure;
    tracing::info!(%phase, "starting phase");
    gate(phase, structure::validate_structure(root, config))?;
    state.completed.push(phase);

    let phase = ValidationPhase::FileLoad;
    tracing::info!(%phase, "starting phase");
    let (documents, findings) = load_phase(root, kinds, config);
    state.documents = documents.values().map(Vec::len).sum();
    gate(phase, findings)?;
    state.completed.push(phase);

    let phase = ValidationPhase::FrontmatterParse;
    tracing::info!(%phase, documents = state.documents, "starting phase");
    let (records, findings) = parse_phase(&documents, config);
    gate(phase, findings)?;
    state.completed.push(phase);

    let phase = ValidationPhase::ContentValidation;
    tracing::info!(%phase, "starting phase");
    gate(phase, content_phase(&records, ctx))?;
    state.completed.push(phase);

    let phase = ValidationPhase::CrossReference;
    tracing::info!(%phase, "starting phase");
    gate(phase, cross_reference_phase(root, &records))?;
    state.completed.push(phase);

    Ok(())
}

fn gate(phase: ValidationPhase, findings: Vec<Finding>) -> Result<(), PhaseError> {
    if findings.is_empty() {
        tracing::info!(%phase, "phase passed");
        return Ok(());
    }
    Err(PhaseError::new(phase, findings))
}

fn load_phase(
    root: &Path,
    kinds: &[ResourceKind],
    config: &Config,
) -> (BTreeMap<ResourceKind, Vec<ReadmeDocument>>, Vec<Finding>) {
    let results: Vec<_> = kinds
        .par_iter()
        .map(|kind| (*kind, scanner::load_documents(root, *kind, config)))
        .collect();

    let mut documents = BTreeMap::new();
    let mut findings = Vec::new();
    for (kind, (docs, errs)) in results {
        documents.insert(kind, docs);
        findings.extend(errs);
    }
    (documents, findings)
}

fn parse_phase(
    documents: &BTreeMap<ResourceKind, Vec<ReadmeDocument>>,
    config: &Config,
) -> (RecordsByKind, Vec<Finding>) {
    let registry_dir = &config.registry.registry_dir;
    let results: Vec<_> = documents
        .par_iter()
        .map(|(kind, docs)| {
            let mut records = BTreeMap::new();
            let mut findings = Vec::new();
            for doc in docs {
                match frontmatter::parse_record(doc, *kind, registry_dir) {
                    Ok(record) => {
                        tracing::debug!(path = %doc.file_path.display(), "parsed frontmatter");
                        records.insert(record.file_path.clone(), record);
                    }
                    Err(errs) => findings.extend(errs),
                }
            }
            (*kind, records, findings)
        })
        .collect();

    let mut records = RecordsByKind::new();
    let mut findings = Vec::new();
    for (kind, kind_records, errs) in results {
        records.insert(kind, kind_records);
        findings.extend(errs);
    }
    if let Some(contributors) = records.get(&ResourceKind::Contributor) {
        findings.extend(check_contributor_uniqueness(contributors));
    }
    (records, findings)
}

/// Namespaces must be unique ignoring case, and so must GitHub usernames.
fn check_contributor_uniqueness(contributors: &BTreeMap<PathBuf, ResourceRecord>) -> Vec<Finding> {
    let mut by_github: BTreeMap<String, Vec<&Path>> = BTreeMap::new();
    let mut by_namespace: BTreeMap<String, Vec<&Path>> = BTreeMap::new();

    for record in contributors.values() {
        by_namespace
            .entry(record.namespace.to_lowercase())
            .or_default()
            .push(&record.file_path);
        if let Frontmatter::Contributor(fm) = &record.frontmatter {
            if !fm.github.trim().is_empty() {
                by_github
                    .entry(fm.github.to_lowercase())
                    .or_default()
                    .push(&record.file_path);
            }
        }
    }

    let mut findings = Vec::new();
    let mut report = |rule_id: &str, what: &str, key: &str, paths: &[&Path]| {
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();
        for path in paths {
            findings.push(
                Finding::new(
                    rule_id,
                    ErrorKind::FrontmatterParse,
                    format!("{what} {key:?} is used by multiple profiles: [{}]", names.join(", ")),
                )
                .at(path),
            );
        }
    };

    for (github, paths) in by_github.iter().filter(|(_, p)| p.len() > 1) {
        report("frontmatter/duplicate-identifier", "GitHub username", github.as_str(), paths.as_slice());
    }
    for (namespace, paths) in by_namespace.iter().filter(|(_, p)| p.len() > 1) {
        report("frontmatter/duplicate-namespace", "namespace", namespace.as_str(), paths.as_slice());
    }
    findings
}

fn content_phase(records: &RecordsByKind, ctx: &ValidationContext) -> Vec<Finding> {
    records
        .par_iter()
        .flat_map_iter(|(kind, kind_records)| {
            let validator = validators::validator_for(*kind);
            let mut findings = Vec::new();

            for record in kind_records.values() {
                let mut errs = validator.validate(record, &ctx.config);
                errs.extend(check_authorization(record, ctx));
                tracing::debug!(path = %record.file_path.display(), errors = errs.len(), "validated content");
                findings.extend(errs.into_iter().map(|f| f.at(&record.file_path)));
            }

            let all: Vec<&ResourceRecord> = kind_records.values().collect();
            findings.extend(validator.validate_batch(&all, &ctx.config));
            tracing::debug!(kind = %validator.kind(), records = all.len(), errors = findings.len(), "validated kind");
            findings
        })
        .collect()
}

/// Verified-flag gate for one module or template against the baseline.
fn check_authorization(record: &ResourceRecord, ctx: &ValidationContext) -> Option<Finding> {
    let baseline = ctx.baseline.as_deref()?;
    let new = record.frontmatter.resource()?.verified.unwrap_or(false);
    let old = auth::baseline_verified(baseline, &record.file_path);
    auth::check_verified_change(old, new, &ctx.actor)
}

fn cross_reference_phase(root: &Path, records: &RecordsByKind) -> Vec<Finding> {
    records
        .par_iter()
        .flat_map_iter(|(_, kind_records)| {
            let all: Vec<&ResourceRecord> = kind_records.values().collect();
            crossref::validate_cross_references(root, &all)
        })
        .collect()
}
