use std::fmt;
use std::path::{Path, PathBuf};

/// A discrete stage of the validation pipeline.
///
/// Phases are ordered: the declaration order is the execution order, and an
/// error in one phase prevents every later phase from starting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPhase {
    /// The repository shape itself (directories, required files).
    FileStructure,
    /// README files being read from disk.
    FileLoad,
    /// Frontmatter being split off and parsed as closed-schema YAML.
    FrontmatterParse,
    /// Field, body, source-URL, and authorization checks.
    ContentValidation,
    /// Relative asset URLs being resolved against the filesystem.
    CrossReference,
}

impl ValidationPhase {
    pub const ALL: [ValidationPhase; 5] = [
        ValidationPhase::FileStructure,
        ValidationPhase::FileLoad,
        ValidationPhase::FrontmatterParse,
        ValidationPhase::ContentValidation,
        ValidationPhase::CrossReference,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ValidationPhase::FileStructure => "file structure",
            ValidationPhase::FileLoad => "file load",
            ValidationPhase::FrontmatterParse => "frontmatter parse",
            ValidationPhase::ContentValidation => "content validation",
            ValidationPhase::CrossReference => "cross-reference",
        }
    }
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of a validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    FileStructure,
    FileLoad,
    FrontmatterParse,
    FieldValidation,
    BodyStructure,
    SourceUrl,
    CrossReference,
    Authorization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::FileStructure => "file-structure",
            ErrorKind::FileLoad => "file-load",
            ErrorKind::FrontmatterParse => "frontmatter-parse",
            ErrorKind::FieldValidation => "field-validation",
            ErrorKind::BodyStructure => "body-structure",
            ErrorKind::SourceUrl => "source-url",
            ErrorKind::CrossReference => "cross-reference",
            ErrorKind::Authorization => "authorization",
        };
        f.write_str(s)
    }
}

/// A single validation problem, attributed to a file wherever one exists.
///
/// Validators build findings without a file and the pipeline attaches the
/// README path afterwards with [`Finding::at`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub kind: ErrorKind,
    pub message: String,
    pub file: Option<PathBuf>,
}

impl Finding {
    pub fn new(rule_id: &str, kind: ErrorKind, message: impl Into<String>) -> Self {
        Finding {
            rule_id: rule_id.to_string(),
            kind,
            message: message.into(),
            file: None,
        }
    }

    /// Attributes the finding to `file`, keeping an existing attribution.
    pub fn at(mut self, file: &Path) -> Self {
        if self.file.is_none() {
            self.file = Some(file.to_path_buf());
        }
        self
    }

    /// Repo-relative path with `/` separators, or `""` for unattributed findings.
    pub fn display_path(&self) -> String {
        self.file
            .as_ref()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(_) => write!(f, "{}: {}", self.display_path(), self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Every error raised during one phase, sorted for reproducible output.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PhaseError {
    pub phase: ValidationPhase,
    pub errors: Vec<Finding>,
}

impl PhaseError {
    pub fn new(phase: ValidationPhase, mut errors: Vec<Finding>) -> Self {
        errors.sort_by(|a, b| {
            (a.display_path(), &a.message, &a.rule_id).cmp(&(
                b.display_path(),
                &b.message,
                &b.rule_id,
            ))
        });
        PhaseError { phase, errors }
    }
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error during {:?} phase of README validation:", self.phase.label())?;
        for e in &self.errors {
            write!(f, "\n- {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PhaseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    Passed,
    Failed,
    NotRun,
}

/// Result of one pipeline run.
#[derive(Debug, serde::Serialize)]
pub struct ValidationReport {
    pub root: String,
    pub kinds: Vec<crate::readme::ResourceKind>,
    pub audit_timestamp: String,
    /// Phases that ran to completion without errors, in execution order.
    pub phases_completed: Vec<ValidationPhase>,
    /// The first phase that produced errors, if any.
    pub failure: Option<PhaseError>,
    pub documents_checked: usize,
    pub duration_ms: u64,
    pub passed: bool,
}

impl ValidationReport {
    pub fn new(
        root: &Path,
        kinds: &[crate::readme::ResourceKind],
        phases_completed: Vec<ValidationPhase>,
        failure: Option<PhaseError>,
        documents_checked: usize,
        duration_ms: u64,
    ) -> Self {
        let passed = failure.is_none();
        ValidationReport {
            root: root.to_string_lossy().to_string(),
            kinds: kinds.to_vec(),
            audit_timestamp: chrono::Utc::now().to_rfc3339(),
            phases_completed,
            failure,
            documents_checked,
            duration_ms,
            passed,
        }
    }

    /// Errors of the failing phase; empty when the run passed.
    pub fn errors(&self) -> &[Finding] {
        self.failure
            .as_ref()
            .map(|f| f.errors.as_slice())
            .unwrap_or(&[])
    }

    pub fn error_count(&self) -> usize {
        self.errors().len()
    }

    pub fn phase_statuses(&self) -> Vec<(ValidationPhase, PhaseStatus)> {
        ValidationPhase::ALL
            .iter()
            .map(|phase| {
                let status = if self.phases_completed.contains(phase) {
                    PhaseStatus::Passed
                } else if self.failure.as_ref().is_some_and(|f| f.phase == *phase) {
                    PhaseStatus::Failed
                } else {
                    PhaseStatus::NotRun
                };
                (*phase, status)
            })
            .collect()
    }
}
