//! Fatal setup errors.
//!
//! Everything in here aborts the whole run: the binary prints the error and
//! exits with code 2. Problems found *inside* registry content are never
//! represented here; they are [`Finding`](crate::finding::Finding)s collected
//! into a [`PhaseError`](crate::finding::PhaseError).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    #[error("path does not exist or is not a directory: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a README.md file", .0.display())]
    NotAReadme(PathBuf),

    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("failed to parse config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("value for {0:?} is not in env; if running from CI, add it to the workflow file")]
    MissingEnv(&'static str),

    #[error("org membership lookup for {username:?} in {org:?} failed: {reason}")]
    MembershipLookup {
        org: String,
        username: String,
        reason: String,
    },

    #[error("org membership lookup for {username:?} in {org:?} timed out after {timeout_ms}ms")]
    LookupTimeout {
        org: String,
        username: String,
        timeout_ms: u64,
    },
}
