use registry_validator::config::Config;
use registry_validator::finding::ValidationReport;
use registry_validator::output::{format_report, OutputFormat};
use registry_validator::pipeline::{run_validation, ValidationContext};
use registry_validator::readme::ResourceKind;

mod common;
use common::Registry;

fn report_for(registry: &Registry) -> ValidationReport {
    run_validation(
        registry.root(),
        &ResourceKind::ALL,
        &ValidationContext::new(Config::default()),
    )
    .unwrap()
}

fn failing_report() -> ValidationReport {
    let registry = Registry::populated();
    registry.write(
        "registry/acme/README.md",
        &common::contributor_readme("acme").replace("status: community", "status: gold"),
    );
    report_for(&registry)
}

fn passing_report() -> ValidationReport {
    report_for(&Registry::populated())
}

#[test]
fn json_output_is_valid() {
    let output = format_report(&failing_report(), &OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["passed"], false);
    assert_eq!(parsed["failed_phase"], "content-validation");
    assert_eq!(parsed["summary"]["errors"], 1);
    assert_eq!(parsed["summary"]["documents"], 3);
    assert_eq!(parsed["errors"][0]["rule_id"], "field/invalid-enum");
    assert_eq!(parsed["errors"][0]["file"], "registry/acme/README.md");
    assert_eq!(parsed["phases"].as_array().unwrap().len(), 5);
    assert_eq!(parsed["phases"][3]["status"], "failed");
    assert_eq!(parsed["phases"][4]["status"], "not-run");
}

#[test]
fn json_passing_report() {
    let output = format_report(&passing_report(), &OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["passed"], true);
    assert_eq!(parsed["failed_phase"], serde_json::Value::Null);
    assert_eq!(parsed["errors"].as_array().unwrap().len(), 0);
    assert_eq!(
        parsed["kinds"],
        serde_json::json!(["contributor", "module", "template"])
    );
}

#[test]
fn sarif_output_is_valid() {
    let output = format_report(&failing_report(), &OutputFormat::Sarif);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["version"], "2.1.0");
    let run = &parsed["runs"][0];
    assert_eq!(run["tool"]["driver"]["name"], "registry-validator");
    assert_eq!(run["tool"]["driver"]["rules"][0]["id"], "field/invalid-enum");
    assert_eq!(run["results"][0]["ruleId"], "field/invalid-enum");
    assert_eq!(run["results"][0]["level"], "error");
    assert_eq!(
        run["results"][0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
        "registry/acme/README.md"
    );
}

#[test]
fn pretty_output_contains_errors() {
    colored::control::set_override(false);
    let output = format_report(&failing_report(), &OutputFormat::Pretty);
    assert!(output.contains("FAIL"));
    assert!(output.contains("field/invalid-enum"));
    assert!(output.contains("registry/acme/README.md"));
    assert!(output.contains("Result: FAILED"));
}

#[test]
fn pretty_output_passing() {
    colored::control::set_override(false);
    let output = format_report(&passing_report(), &OutputFormat::Pretty);
    assert!(output.contains("PASS"));
    assert!(!output.contains("FAIL"));
    assert!(output.contains("Result: PASSED"));
}
