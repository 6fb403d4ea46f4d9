use registry_validator::readme::{
    contributor_namespace, split_frontmatter, ResourceKind, ResourcePath, SplitError,
};
use std::path::Path;

#[test]
fn splits_frontmatter_and_body() {
    let text = "---\ndisplay_name: Acme\ngithub: acme\n---\n\n# Acme\n\nHello.\n";
    let split = split_frontmatter(text).unwrap();
    assert_eq!(split.frontmatter, "display_name: Acme\ngithub: acme\n");
    assert_eq!(split.body, "# Acme\n\nHello.");
}

#[test]
fn leading_and_trailing_whitespace_is_tolerated() {
    let split = split_frontmatter("\n\n  ---\nkey: value\n---\nbody\n\n").unwrap();
    assert_eq!(split.frontmatter, "key: value\n");
    assert_eq!(split.body, "body");
}

#[test]
fn frontmatter_lines_are_trimmed() {
    let split = split_frontmatter("---\n  tags:\n    - a\n---\nbody").unwrap();
    assert_eq!(split.frontmatter, "tags:\n- a\n");
}

#[test]
fn body_indentation_is_preserved() {
    let split = split_frontmatter("---\nk: v\n---\n# T\n\n```tf\n  source = \"x\"\n```").unwrap();
    assert!(split.body.contains("\n  source = \"x\"\n"));
}

#[test]
fn thematic_breaks_after_closing_fence_belong_to_body() {
    let split = split_frontmatter("---\nk: v\n---\n# T\n\n---\n\nmore").unwrap();
    assert_eq!(split.body, "# T\n\n---\n\nmore");
}

#[test]
fn empty_text_is_an_error() {
    assert_eq!(split_frontmatter("  \n\n "), Err(SplitError::Empty));
}

#[test]
fn missing_opening_fence() {
    assert_eq!(
        split_frontmatter("# Title\n---\nk: v\n---\n"),
        Err(SplitError::MissingOpeningFence)
    );
}

#[test]
fn fewer_than_two_fences_is_missing_closing_fence() {
    assert_eq!(
        split_frontmatter("---\nk: v\n# body"),
        Err(SplitError::MissingClosingFence)
    );
    assert_eq!(split_frontmatter("---"), Err(SplitError::MissingClosingFence));
}

#[test]
fn adjacent_fences_are_empty_frontmatter() {
    assert_eq!(
        split_frontmatter("---\n---\n# body"),
        Err(SplitError::EmptyFrontmatter)
    );
    assert_eq!(
        split_frontmatter("---\n   \n\n---\n# body"),
        Err(SplitError::EmptyFrontmatter)
    );
}

#[test]
fn round_trip_reconstructs_normalized_text() {
    let original = "---\ndisplay_name: Acme\ngithub: acme\n---\n# Acme\n\nText.";
    let split = split_frontmatter(original).unwrap();
    let rebuilt = format!("---\n{}---\n{}", split.frontmatter, split.body);
    assert_eq!(rebuilt, original);
    assert_eq!(split_frontmatter(&rebuilt).unwrap(), split);
}

#[test]
fn resource_path_parses_module_and_template() {
    let module =
        ResourcePath::parse(Path::new("registry/acme/modules/widget/README.md"), "registry")
            .unwrap();
    assert_eq!(module.kind, ResourceKind::Module);
    assert_eq!(module.namespace, "acme");
    assert_eq!(module.name, "widget");

    let template =
        ResourcePath::parse(Path::new("registry/acme/templates/box/README.md"), "registry")
            .unwrap();
    assert_eq!(template.kind, ResourceKind::Template);
}

#[test]
fn resource_path_rejects_malformed_paths() {
    for path in [
        "registry/acme/README.md",
        "registry/acme/modules/widget/main.tf",
        "registry/acme/plugins/widget/README.md",
        "other/acme/modules/widget/README.md",
        "registry/acme/modules/widget/extra/README.md",
    ] {
        assert!(
            ResourcePath::parse(Path::new(path), "registry").is_none(),
            "{path} should not parse"
        );
    }
}

#[test]
fn contributor_namespace_from_path() {
    assert_eq!(
        contributor_namespace(Path::new("registry/acme/README.md"), "registry"),
        Some("acme".to_string())
    );
    assert_eq!(
        contributor_namespace(Path::new("registry/acme/modules/README.md"), "registry"),
        None
    );
}
