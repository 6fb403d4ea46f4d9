use registry_validator::finding::{
    ErrorKind, Finding, PhaseError, PhaseStatus, ValidationPhase, ValidationReport,
};
use registry_validator::readme::ResourceKind;
use std::path::Path;

fn finding(rule_id: &str, message: &str, file: Option<&str>) -> Finding {
    let f = Finding::new(rule_id, ErrorKind::FieldValidation, message);
    match file {
        Some(path) => f.at(Path::new(path)),
        None => f,
    }
}

#[test]
fn phases_are_ordered() {
    let mut phases = ValidationPhase::ALL.to_vec();
    phases.reverse();
    phases.sort();
    assert_eq!(phases, ValidationPhase::ALL.to_vec());
    assert!(ValidationPhase::FileStructure < ValidationPhase::CrossReference);
}

#[test]
fn at_keeps_existing_attribution() {
    let f = finding("r", "m", Some("a/README.md")).at(Path::new("b/README.md"));
    assert_eq!(f.display_path(), "a/README.md");
}

#[test]
fn phase_error_sorts_by_path_then_message() {
    let error = PhaseError::new(
        ValidationPhase::ContentValidation,
        vec![
            finding("r2", "zeta", Some("registry/b/README.md")),
            finding("r1", "beta", Some("registry/a/README.md")),
            finding("r1", "alpha", Some("registry/b/README.md")),
            finding("r0", "global", None),
        ],
    );
    let order: Vec<&str> = error.errors.iter().map(|f| f.message.as_str()).collect();
    assert_eq!(order, vec!["global", "beta", "alpha", "zeta"]);
}

#[test]
fn phase_error_display() {
    let error = PhaseError::new(
        ValidationPhase::FrontmatterParse,
        vec![finding("r", "bad key", Some("registry/a/README.md"))],
    );
    assert_eq!(
        error.to_string(),
        "Error during \"frontmatter parse\" phase of README validation:\n- registry/a/README.md: bad key"
    );
}

#[test]
fn finding_serializes_kind_in_kebab_case() {
    let json = serde_json::to_value(finding("body/missing-h1", "m", None)).unwrap();
    assert_eq!(json["kind"], "field-validation");
    assert_eq!(json["file"], serde_json::Value::Null);
}

#[test]
fn report_statuses_follow_failure() {
    let report = ValidationReport::new(
        Path::new("/repo"),
        &[ResourceKind::Module],
        vec![ValidationPhase::FileStructure, ValidationPhase::FileLoad],
        Some(PhaseError::new(
            ValidationPhase::FrontmatterParse,
            vec![finding("r", "m", None)],
        )),
        2,
        5,
    );
    assert!(!report.passed);
    assert_eq!(report.error_count(), 1);
    let statuses: Vec<PhaseStatus> = report.phase_statuses().into_iter().map(|(_, s)| s).collect();
    assert_eq!(
        statuses,
        vec![
            PhaseStatus::Passed,
            PhaseStatus::Passed,
            PhaseStatus::Failed,
            PhaseStatus::NotRun,
            PhaseStatus::NotRun,
        ]
    );
}

#[test]
fn passing_report_has_no_errors() {
    let report = ValidationReport::new(
        Path::new("/repo"),
        &ResourceKind::ALL,
        ValidationPhase::ALL.to_vec(),
        None,
        0,
        0,
    );
    assert!(report.passed);
    assert!(report.errors().is_empty());
}
