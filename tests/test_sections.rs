use registry_validator::finding::ErrorKind;
use registry_validator::sections::{
    lint_file, lint_section, lint_template_sections, split_sections, validate_template_sections,
};

mod common;
use common::{Registry, TEMPLATE_SECTIONS};

fn findings(body: &str) -> Vec<(String, String)> {
    validate_template_sections(body)
        .into_iter()
        .map(|f| (f.rule_id, f.message))
        .collect()
}

fn rule_ids(body: &str) -> Vec<String> {
    findings(body).into_iter().map(|(id, _)| id).collect()
}

// ---------------------------------------------------------------------------
// Section splitting
// ---------------------------------------------------------------------------

#[test]
fn splits_on_level_two_headers_only() {
    let sections = split_sections("# Title\nintro\n## One\na\n### Sub\nb\n## Two\nc\n");
    assert_eq!(sections.len(), 2);
    assert_eq!(sections["One"], "a\n### Sub\nb\n");
    assert_eq!(sections["Two"], "c\n");
}

#[test]
fn repeated_section_keeps_last_occurrence() {
    let sections = split_sections("## Usage\nfirst\n## Usage\nsecond\n");
    assert_eq!(sections["Usage"], "second\n");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn complete_sections_have_no_findings() {
    assert!(findings(TEMPLATE_SECTIONS).is_empty());
}

#[test]
fn every_missing_section_is_reported() {
    let body = "# Template\nDescription\n\n## Prerequisites\n- Docker\n- Terraform\n";
    let ids = rule_ids(body);
    assert_eq!(ids.len(), 4);
    assert!(ids.iter().all(|id| id == "body/missing-template-section"));

    let messages: Vec<String> = findings(body).into_iter().map(|(_, m)| m).collect();
    assert!(messages.iter().any(|m| m.contains("\"Cost and Permissions\"")));
    assert!(!messages.iter().any(|m| m.contains("Prerequisites")));
}

#[test]
fn sparse_section_is_reported() {
    let body = TEMPLATE_SECTIONS.replace(
        "- Terraform 1.5 or later\n- A Coder deployment whose provisioner can reach the Docker socket\n",
        "",
    );
    assert_eq!(
        findings(&body),
        vec![(
            "body/sparse-template-section".to_string(),
            "section \"Prerequisites\" must have at least 2 items".to_string()
        )]
    );
}

#[test]
fn blank_lines_and_rules_do_not_count_as_items() {
    let body = TEMPLATE_SECTIONS.replace(
        "## Variables\n",
        "## Variables\n\n---\n\n",
    );
    assert!(findings(&body).is_empty());

    let body = TEMPLATE_SECTIONS.replace(
        "- Terraform 1.5 or later\n- A Coder deployment whose provisioner can reach the Docker socket\n",
        "\n---\n#### Note\n",
    );
    assert_eq!(rule_ids(&body), vec!["body/sparse-template-section"]);
}

#[test]
fn usage_needs_a_terraform_example() {
    let body = TEMPLATE_SECTIONS.replace("terraform {", "provider {");
    let found = findings(&body);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].0, "body/incomplete-template-section");
    assert!(found[0].1.contains("Terraform configuration"));
}

#[test]
fn variables_need_a_table() {
    let body = TEMPLATE_SECTIONS.replace("| Name | Type |", "| Variable | Kind |");
    assert_eq!(rule_ids(&body), vec!["body/incomplete-template-section"]);
}

#[test]
fn infrastructure_accepts_an_image_instead_of_mermaid() {
    let without_diagram = TEMPLATE_SECTIONS.replace("```mermaid", "```text");
    let found = findings(&without_diagram);
    assert_eq!(found.len(), 1);
    assert!(found[0].1.contains("diagram"));

    let with_image = without_diagram.replace(
        "This template provisions",
        "![architecture](./architecture.png)\nThis template provisions",
    );
    assert!(findings(&with_image).is_empty());
}

#[test]
fn section_findings_carry_body_structure_kind() {
    let all = validate_template_sections("# Template\n");
    assert_eq!(all.len(), 5);
    assert!(all.iter().all(|f| f.kind == ErrorKind::BodyStructure));
}

// ---------------------------------------------------------------------------
// Linter
// ---------------------------------------------------------------------------

#[test]
fn complete_sections_pass_the_linter() {
    let results = lint_template_sections(TEMPLATE_SECTIONS);
    assert_eq!(results.len(), 5);
    for result in &results {
        assert!(result.errors.is_empty(), "{}: {:?}", result.section, result.errors);
        assert_eq!(result.suggestions.len(), 3);
    }
    assert_eq!(results[0].section, "Prerequisites");
    assert_eq!(results[4].section, "Variables");
}

#[test]
fn short_prerequisites_fail_only_the_length_check() {
    let result = lint_section("Prerequisites", "- AWS CLI\n").unwrap();
    assert_eq!(
        result.errors,
        vec!["section \"Prerequisites\" must have at least 3 lines of content".to_string()]
    );
}

#[test]
fn missing_patterns_are_named() {
    let content = "Line one\nLine two\nLine three\nLine four\n";
    let result = lint_section("Cost and Permissions", content).unwrap();
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].contains("cost"));
    assert!(result.errors[1].contains("permission"));
}

#[test]
fn unknown_sections_are_not_linted() {
    assert!(lint_section("Extra", "anything").is_none());
    let results = lint_template_sections("## Extra\nmore docs\n## Usage\nshort\n");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].section, "Usage");
}

#[test]
fn lint_file_records_broken_frontmatter() {
    let registry = Registry::populated();
    registry.write("registry/acme/templates/broken/README.md", "no frontmatter here\n");

    let lint = lint_file(&registry.root().join("registry/acme/templates/broken/README.md"));
    assert!(lint.has_errors());
    assert!(lint.results.is_empty());
    assert!(lint.error.unwrap().contains("opening frontmatter fence"));

    let good = lint_file(&registry.root().join("registry/acme/templates/docker-box/README.md"));
    assert!(good.error.is_none());
    assert!(!good.has_errors());
}
