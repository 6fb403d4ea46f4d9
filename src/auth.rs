//! Authorization gate for the `verified` flag.
//!
//! Only members of the configured organization may flip `verified` on a
//! module or template. Everyone else, including actors whose membership
//! could not be determined, may only leave the flag as it was.

use crate::finding::{ErrorKind, Finding};
use crate::frontmatter;
use std::fmt;
use std::path::Path;

/// Organization membership of the actor behind a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrgStatus {
    Member,
    NonMember,
    /// Membership could not be established. Never treated as `Member`.
    Indeterminate,
}

impl OrgStatus {
    pub fn is_member(&self) -> bool {
        matches!(self, OrgStatus::Member)
    }
}

impl fmt::Display for OrgStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgStatus::Member => f.write_str("member"),
            OrgStatus::NonMember => f.write_str("non-member"),
            OrgStatus::Indeterminate => f.write_str("indeterminate"),
        }
    }
}

/// Who is making the change being validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: Option<String>,
    pub status: OrgStatus,
}

impl Actor {
    pub fn new(username: impl Into<String>, status: OrgStatus) -> Self {
        Actor {
            username: Some(username.into()),
            status,
        }
    }

    /// No known actor; always least privilege.
    pub fn anonymous() -> Self {
        Actor {
            username: None,
            status: OrgStatus::Indeterminate,
        }
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("<unknown>")
    }
}

impl Default for Actor {
    fn default() -> Self {
        Actor::anonymous()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("actor with org status {status} may not change verified from {old} to {new}")]
pub struct AuthorizationError {
    pub status: OrgStatus,
    pub old: bool,
    pub new: bool,
}

/// Decides whether `old -> new` is a permitted change of the verified flag.
///
/// # Errors
///
/// Returns [`AuthorizationError`] when a non-member flips the flag.
pub fn authorize_verified_change(
    old: bool,
    new: bool,
    status: OrgStatus,
) -> Result<(), AuthorizationError> {
    if status.is_member() || old == new {
        return Ok(());
    }
    Err(AuthorizationError { status, old, new })
}

/// Reads the `verified` flag of `rel` inside a baseline checkout.
///
/// Files missing from the baseline are new resources, and unparseable or
/// absent flags count as unverified.
pub fn baseline_verified(baseline_root: &Path, rel: &Path) -> bool {
    match std::fs::read_to_string(baseline_root.join(rel)) {
        Ok(text) => frontmatter::verified_flag(&text).unwrap_or(false),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!(path = %rel.display(), error = %e, "could not read baseline README; treating as unverified");
            false
        }
    }
}

/// Gate check for one README, as a finding.
pub fn check_verified_change(old: bool, new: bool, actor: &Actor) -> Option<Finding> {
    authorize_verified_change(old, new, actor.status)
        .err()
        .map(|e| {
            Finding::new(
                "auth/unauthorized-verified-change",
                ErrorKind::Authorization,
                format!("{}: {e}", actor.display_name()),
            )
        })
}
