//! # registry-validator
//!
//! Pre-publication checks for a registry of contributor profiles, Terraform
//! modules and workspace templates.
//!
//! The registry is a fixed directory tree of README files, each with a YAML
//! frontmatter block and a markdown body. `registry-validator` enforces the
//! rules the registry website depends on and reports every problem it finds
//! in human-readable, JSON, or [SARIF] form.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use registry_validator::{config::Config, output, pipeline, readme::ResourceKind};
//!
//! let config = Config::load(None).expect("failed to load config");
//! let ctx = pipeline::ValidationContext::new(config);
//! let report = pipeline::run_validation(Path::new("."), &ResourceKind::ALL, &ctx)
//!     .expect("repository root is readable");
//!
//! if !report.passed {
//!     let text = output::format_report(&report, &output::OutputFormat::Pretty);
//!     print!("{text}");
//! }
//! ```
//!
//! ## Architecture
//!
//! [`pipeline::run_validation`] runs five phases in order and stops at the
//! first one that reports errors:
//!
//! | Phase | Module | Checks |
//! |-------|--------|--------|
//! | file structure | [`structure`] | Directory layout, required files |
//! | file load | [`scanner`] | README discovery and reading |
//! | frontmatter parse | [`readme`], [`frontmatter`] | Fences, closed schema, YAML, uniqueness |
//! | content validation | [`validators`], [`body`], [`sections`], [`source_url`], [`auth`] | Fields, body shape, template sections, source URL, verified flag |
//! | cross-reference | [`crossref`] | Relative icon/avatar targets exist |
//!
//! Supporting modules: [`config`] (TOML configuration), [`finding`] (report
//! types), [`rules`] (rule catalogue), [`github`] (actor and org-membership
//! boundary), [`output`] (formatters), and [`error`] (fatal errors).
//!
//! [SARIF]: https://sarifweb.azurewebsites.net/

pub mod auth;
pub mod body;
pub mod config;
pub mod crossref;
pub mod error;
pub mod finding;
pub mod frontmatter;
pub mod github;
pub mod output;
pub mod pipeline;
pub mod readme;
pub mod rules;
pub mod scanner;
pub mod sections;
pub mod source_url;
pub mod structure;
pub mod validators;
