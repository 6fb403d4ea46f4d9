use assert_cmd::Command;
use predicates::prelude::*;

mod common;
use common::Registry;

fn registry_validator() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("registry-validator");
    cmd.env_remove("ACTOR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn validate_in(registry: &Registry) -> Command {
    let mut cmd = registry_validator();
    cmd.current_dir(registry.root()).arg("validate").arg(".");
    cmd
}

fn broken_registry() -> Registry {
    let registry = Registry::populated();
    registry.write(
        "registry/acme/modules/widget/README.md",
        "---\ndescription: x\nicon: ./i.svg\ntags: []\n---\nNo header here.\n",
    );
    registry
}

#[test]
fn valid_registry_passes() {
    let registry = Registry::populated();
    validate_in(&registry)
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"))
        .stdout(predicate::str::contains("Result: PASSED"));
}

#[test]
fn invalid_registry_fails_with_exit_1() {
    validate_in(&broken_registry())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("body/missing-h1"));
}

#[test]
fn json_format() {
    let output = validate_in(&broken_registry())
        .args(["--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed["passed"], false);
    assert_eq!(parsed["failed_phase"], "content-validation");
}

#[test]
fn sarif_format() {
    validate_in(&broken_registry())
        .args(["--format", "sarif"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"version\": \"2.1.0\""));
}

#[test]
fn kind_selector_skips_other_kinds() {
    validate_in(&broken_registry())
        .args(["--kind", "templates"])
        .assert()
        .success();
}

#[test]
fn output_file_is_written() {
    let registry = Registry::populated();
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("report.json");
    validate_in(&registry)
        .args(["--format", "json", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Output written to"));
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"passed\": true"));
}

#[test]
fn nonexistent_root_exits_2() {
    registry_validator()
        .args(["validate", "/definitely/not/here"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn missing_config_exits_2() {
    let registry = Registry::populated();
    validate_in(&registry)
        .args(["--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn config_domain_is_used_for_source_urls() {
    let registry = Registry::populated();
    registry.write(
        "registry-validator.toml",
        "[registry]\ndomain = \"registry.example.com\"\n",
    );
    validate_in(&registry)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("source/missing-source-url"));
}

#[test]
fn unauthorized_verified_flip_fails() {
    let baseline = Registry::populated();
    let current = Registry::populated();
    current.module(
        "acme",
        "widget",
        &common::module_readme_verified("acme", "widget", true),
    );
    validate_in(&current)
        .args(["--actor", "mallory", "--baseline"])
        .arg(baseline.root())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("auth/unauthorized-verified-change"));
}

#[test]
fn member_verified_flip_passes() {
    let baseline = Registry::populated();
    let current = Registry::populated();
    current.module(
        "acme",
        "widget",
        &common::module_readme_verified("acme", "widget", true),
    );
    current.write(
        "registry-validator.toml",
        "[authorization]\nmembers = [\"alice\"]\n",
    );
    validate_in(&current)
        .env("ACTOR", "alice")
        .arg("--baseline")
        .arg(baseline.root())
        .assert()
        .success();
}

#[test]
fn list_rules_shows_rules() {
    registry_validator()
        .args(["list-rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("structure/missing-registry-dir"))
        .stdout(predicate::str::contains("body/multiple-terraform-blocks"))
        .stdout(predicate::str::contains("auth/unauthorized-verified-change"));
}

#[test]
fn explain_known_rule() {
    registry_validator()
        .args(["explain", "source/incorrect-source-url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"))
        .stdout(predicate::str::contains("content validation"));
}

#[test]
fn explain_unknown_rule_exits_2() {
    registry_validator()
        .args(["explain", "nope/never"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown rule"));
}

#[test]
fn lint_template_passes_complete_templates() {
    let registry = Registry::populated();
    registry_validator()
        .arg("lint-template")
        .arg(registry.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("docker-box"))
        .stdout(predicate::str::contains("No errors found!"));
}

#[test]
fn lint_template_reports_thin_sections() {
    let registry = Registry::populated();
    let readme = common::template_readme("acme", "docker-box").replace(
        "- Terraform 1.5 or later\n- A Coder deployment whose provisioner can reach the Docker socket\n",
        "",
    );
    registry.write("registry/acme/templates/docker-box/README.md", &readme);

    let output = registry_validator()
        .arg("lint-template")
        .arg(registry.root().join("registry/acme/templates"))
        .arg("--json")
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let results = json[0]["results"].as_array().unwrap();
    assert_eq!(results[0]["section"], "Prerequisites");
    assert_eq!(
        results[0]["errors"][0],
        "section \"Prerequisites\" must have at least 3 lines of content"
    );
    assert!(json[0].get("error").is_none());
}

#[test]
fn lint_template_rejects_non_readme_file() {
    let registry = Registry::populated();
    registry_validator()
        .arg("lint-template")
        .arg(registry.root().join("registry/acme/templates/docker-box/main.tf"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not a README.md file"));
}
