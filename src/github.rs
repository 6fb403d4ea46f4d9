//! Boundary to the GitHub collaborator.
//!
//! The validator only ever needs a username and an [`OrgStatus`]. How those
//! are obtained lives behind [`GithubCollaborator`]; the crate ships
//! [`OfflineCollaborator`], which answers from the CI environment and the
//! `[authorization]` config section without touching the network.

use crate::auth::{Actor, OrgStatus};
use crate::config::Config;
use crate::error::ValidatorError;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

pub const ACTOR_ENV: &str = "ACTOR";
pub const BASE_REF_ENV: &str = "BASE_REF";

pub trait GithubCollaborator: Send + Sync {
    /// Username that triggered the CI run.
    fn actions_actor(&self) -> Result<String, ValidatorError>;

    /// Branch the change is being merged into.
    fn base_ref(&self) -> Result<String, ValidatorError>;

    fn user_org_status(&self, org: &str, username: &str) -> Result<OrgStatus, ValidatorError>;
}

fn non_empty_env(key: &'static str) -> Result<String, ValidatorError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidatorError::MissingEnv(key)),
    }
}

/// Environment plus a static membership roster.
#[derive(Debug, Clone, Default)]
pub struct OfflineCollaborator {
    members: Vec<String>,
}

impl OfflineCollaborator {
    pub fn new(members: &[String]) -> Self {
        OfflineCollaborator {
            members: members.iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        OfflineCollaborator::new(&config.authorization.members)
    }
}

impl GithubCollaborator for OfflineCollaborator {
    fn actions_actor(&self) -> Result<String, ValidatorError> {
        non_empty_env(ACTOR_ENV)
    }

    fn base_ref(&self) -> Result<String, ValidatorError> {
        non_empty_env(BASE_REF_ENV)
    }

    fn user_org_status(&self, _org: &str, username: &str) -> Result<OrgStatus, ValidatorError> {
        if self.members.is_empty() {
            return Ok(OrgStatus::Indeterminate);
        }
        if self.members.contains(&username.to_lowercase()) {
            Ok(OrgStatus::Member)
        } else {
            Ok(OrgStatus::NonMember)
        }
    }
}

/// Runs a membership lookup with an upper time bound.
///
/// # Errors
///
/// Lookup failures are passed through; an expired timeout becomes
/// [`ValidatorError::LookupTimeout`]. Neither is retried.
pub fn org_status_with_timeout(
    collaborator: Arc<dyn GithubCollaborator>,
    org: &str,
    username: &str,
    timeout: Duration,
) -> Result<OrgStatus, ValidatorError> {
    let (tx, rx) = mpsc::channel();
    let (org_owned, user_owned) = (org.to_string(), username.to_string());
    std::thread::spawn(move || {
        let _ = tx.send(collaborator.user_org_status(&org_owned, &user_owned));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(ValidatorError::LookupTimeout {
            org: org.to_string(),
            username: username.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(ValidatorError::MembershipLookup {
            org: org.to_string(),
            username: username.to_string(),
            reason: "lookup worker exited without a result".to_string(),
        }),
    }
}

/// Determines the actor for this run.
///
/// `explicit` wins over the collaborator's CI actor. With no actor at all
/// the result is [`Actor::anonymous`].
pub fn resolve_actor(
    collaborator: Arc<dyn GithubCollaborator>,
    explicit: Option<String>,
    config: &Config,
) -> Result<Actor, ValidatorError> {
    let username = match explicit.filter(|u| !u.trim().is_empty()) {
        Some(u) => u,
        None => match collaborator.actions_actor() {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!(error = %e, "no actor available; using least privilege");
                return Ok(Actor::anonymous());
            }
        },
    };

    if let Ok(base_ref) = collaborator.base_ref() {
        tracing::debug!(%base_ref, "resolved base ref");
    }

    let org = &config.authorization.org;
    let timeout = Duration::from_millis(config.authorization.lookup_timeout_ms);
    let status = org_status_with_timeout(collaborator, org, &username, timeout)?;
    tracing::info!(actor = %username, %org, %status, "resolved actor org status");
    Ok(Actor::new(username, status))
}
