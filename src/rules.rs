//! Catalogue of every rule the validator can report.
//!
//! Used by the `list-rules` and `explain` commands and by the SARIF
//! formatter's rule table.

use crate::finding::{ErrorKind, ValidationPhase};

/// Metadata for a single rule.
pub struct RuleInfo {
    /// Unique rule identifier (e.g., `"body/missing-h1"`).
    pub id: &'static str,
    /// Phase in which the rule is checked.
    pub phase: ValidationPhase,
    pub kind: ErrorKind,
    /// Short description of what the rule checks.
    pub message: &'static str,
    /// Guidance on how to fix a violation.
    pub remediation: &'static str,
}

const fn rule(
    id: &'static str,
    phase: ValidationPhase,
    kind: ErrorKind,
    message: &'static str,
    remediation: &'static str,
) -> RuleInfo {
    RuleInfo {
        id,
        phase,
        kind,
        message,
        remediation,
    }
}

use ErrorKind as K;
use ValidationPhase as P;

static RULES: &[RuleInfo] = &[
    // file structure
    rule(
        "structure/missing-assets-dir",
        P::FileStructure,
        K::FileStructure,
        "Shared top-level assets directory is missing",
        "Create the assets directory (default .icons) at the repository root",
    ),
    rule(
        "structure/missing-registry-dir",
        P::FileStructure,
        K::FileStructure,
        "Registry directory is missing or not a directory",
        "Run the validator from the repository root, or set registry.registry_dir",
    ),
    rule(
        "structure/non-directory-entry",
        P::FileStructure,
        K::FileStructure,
        "Non-directory entry directly under the registry directory",
        "Only namespace directories may live at the base of the registry; move or delete the file",
    ),
    rule(
        "structure/missing-namespace-readme",
        P::FileStructure,
        K::FileStructure,
        "Namespace directory has no README.md",
        "Add a contributor profile README.md to the namespace directory",
    ),
    rule(
        "structure/resource-dir-not-directory",
        P::FileStructure,
        K::FileStructure,
        "modules/templates path exists but is not a directory",
        "Replace the file with a directory containing one subdirectory per resource",
    ),
    rule(
        "structure/non-directory-resource",
        P::FileStructure,
        K::FileStructure,
        "Entry inside modules/templates is not a directory",
        "Each resource must be its own directory; move loose files into one",
    ),
    rule(
        "structure/missing-resource-readme",
        P::FileStructure,
        K::FileStructure,
        "Resource directory has no README.md",
        "Add a README.md with frontmatter and usage docs to the resource",
    ),
    rule(
        "structure/missing-definition-file",
        P::FileStructure,
        K::FileStructure,
        "Resource directory has no main.tf",
        "Add the resource's primary Terraform definition as main.tf",
    ),
    rule(
        "structure/unreadable-directory",
        P::FileStructure,
        K::FileStructure,
        "A registry or resource directory could not be listed",
        "Check the directory's permissions so its contents can be validated",
    ),
    // file load
    rule(
        "load/unreadable-readme",
        P::FileLoad,
        K::FileLoad,
        "README.md could not be read",
        "Check file permissions and that the file is valid UTF-8",
    ),
    // frontmatter parse
    rule(
        "frontmatter/unexpected-path",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "README is not at a path the registry layout allows",
        "Move the README to registry/<namespace>/[<modules|templates>/<name>/]README.md",
    ),
    rule(
        "frontmatter/empty-readme",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "README is empty",
        "Add frontmatter delimited by --- lines followed by the markdown body",
    ),
    rule(
        "frontmatter/missing-opening-fence",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "README does not start with a --- fence",
        "Make the first line of the README exactly ---",
    ),
    rule(
        "frontmatter/missing-closing-fence",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "Frontmatter is never closed by a second --- fence",
        "Add a --- line after the last frontmatter key",
    ),
    rule(
        "frontmatter/empty-frontmatter",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "Frontmatter fences enclose no content",
        "Add the required frontmatter keys between the fences",
    ),
    rule(
        "frontmatter/unknown-key",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "Frontmatter contains a key the schema does not allow",
        "Remove the key or fix its spelling; see the allowed keys for the resource kind",
    ),
    rule(
        "frontmatter/invalid-yaml",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "Frontmatter is not valid YAML for the resource kind",
        "Fix the YAML syntax or the value type reported in the message",
    ),
    rule(
        "frontmatter/duplicate-identifier",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "Two contributor profiles use the same GitHub username",
        "Each GitHub username may own exactly one namespace; remove one profile",
    ),
    rule(
        "frontmatter/duplicate-namespace",
        P::FrontmatterParse,
        K::FrontmatterParse,
        "Two namespaces differ only in letter case",
        "Merge the namespaces or rename one of them",
    ),
    // content validation: fields
    rule(
        "field/missing-required",
        P::ContentValidation,
        K::FieldValidation,
        "Required frontmatter field is missing or empty",
        "Set the field to a non-empty value",
    ),
    rule(
        "field/empty-optional",
        P::ContentValidation,
        K::FieldValidation,
        "Optional frontmatter field is present but empty",
        "Give the field a value or remove the key",
    ),
    rule(
        "field/invalid-enum",
        P::ContentValidation,
        K::FieldValidation,
        "Field value is not one of the allowed values",
        "Use one of the values listed in the message",
    ),
    rule(
        "field/missing-tags",
        P::ContentValidation,
        K::FieldValidation,
        "Module or template has no tags list",
        "Add tags, or tags: [] when there are none",
    ),
    rule(
        "field/invalid-tag",
        P::ContentValidation,
        K::FieldValidation,
        "Tag cannot be used as URL filter state",
        "Use only letters, digits, '-', '_', '.' and '~' in tags",
    ),
    rule(
        "field/invalid-os",
        P::ContentValidation,
        K::FieldValidation,
        "Unknown operating system in supported_os",
        "Use windows, macos or linux",
    ),
    rule(
        "field/invalid-asset-url",
        P::ContentValidation,
        K::FieldValidation,
        "Icon or avatar URL is malformed or uses a disallowed prefix",
        "Use an absolute URL without query string, or a relative path under an allowed prefix",
    ),
    rule(
        "field/invalid-url",
        P::ContentValidation,
        K::FieldValidation,
        "Link is not a valid absolute URL",
        "Use a full URL including the scheme, e.g. https://",
    ),
    rule(
        "field/invalid-email",
        P::ContentValidation,
        K::FieldValidation,
        "Support email is structurally invalid",
        "Use a plain address of the form user@domain.tld",
    ),
    rule(
        "field/invalid-github",
        P::ContentValidation,
        K::FieldValidation,
        "GitHub username is not a valid URL path segment",
        "Use the exact GitHub username",
    ),
    rule(
        "field/invalid-employer",
        P::ContentValidation,
        K::FieldValidation,
        "employer_github is empty, malformed or the contributor's own username",
        "Set employer_github to the GitHub username of another contributor, or remove it",
    ),
    rule(
        "field/unknown-employer",
        P::ContentValidation,
        K::FieldValidation,
        "employer_github does not match any contributor in the registry",
        "Add a profile for the employer, or fix the username",
    ),
    rule(
        "field/empty-requirement",
        P::ContentValidation,
        K::FieldValidation,
        "Template requirements list contains an empty entry",
        "Remove the empty entry",
    ),
    // content validation: body
    rule(
        "body/missing-h1",
        P::ContentValidation,
        K::BodyStructure,
        "Body does not start with an h1 header",
        "Start the body with '# <display name>'",
    ),
    rule(
        "body/hcl-code-block",
        P::ContentValidation,
        K::BodyStructure,
        "Code block is tagged hcl",
        "Tag Terraform code blocks as ```tf",
    ),
    rule(
        "body/missing-terraform-block",
        P::ContentValidation,
        K::BodyStructure,
        "h1 section has no ```tf code block",
        "Add a ```tf usage example directly below the description",
    ),
    rule(
        "body/multiple-terraform-blocks",
        P::ContentValidation,
        K::BodyStructure,
        "h1 section has more than one ```tf code block",
        "Keep one usage example in the h1 section; move others under a ## header",
    ),
    rule(
        "body/missing-version",
        P::ContentValidation,
        K::BodyStructure,
        "Terraform usage example does not pin a version",
        "Add a version = \"...\" attribute to the module block",
    ),
    rule(
        "body/missing-paragraph",
        P::ContentValidation,
        K::BodyStructure,
        "h1 section has no descriptive paragraph",
        "Add at least one line of prose below the h1 header",
    ),
    rule(
        "body/unterminated-code-block",
        P::ContentValidation,
        K::BodyStructure,
        "A code block in the h1 section is never closed",
        "Close every code block with a ``` line",
    ),
    rule(
        "body/missing-template-section",
        P::ContentValidation,
        K::BodyStructure,
        "Template README lacks a required ## section",
        "Add ## Prerequisites, ## Infrastructure, ## Usage, ## Cost and Permissions and ## Variables",
    ),
    rule(
        "body/sparse-template-section",
        P::ContentValidation,
        K::BodyStructure,
        "Template section has fewer content lines than required",
        "Expand the section; run 'registry-validator lint-template' for suggestions",
    ),
    rule(
        "body/incomplete-template-section",
        P::ContentValidation,
        K::BodyStructure,
        "Template section lacks a required code block, table or diagram",
        "Add the element named in the message to the section",
    ),
    // content validation: source URL
    rule(
        "source/invalid-path",
        P::ContentValidation,
        K::SourceUrl,
        "README path does not identify a namespace and resource name",
        "Keep the README at registry/<namespace>/<modules|templates>/<name>/README.md",
    ),
    rule(
        "source/incorrect-source-url",
        P::ContentValidation,
        K::SourceUrl,
        "Terraform source points at another namespace",
        "Use the source value named in the message",
    ),
    rule(
        "source/missing-source-url",
        P::ContentValidation,
        K::SourceUrl,
        "No Terraform block references the resource's own source",
        "Add source = \"<domain>/<namespace>/<name>/coder\" to the usage example",
    ),
    // content validation: authorization
    rule(
        "auth/unauthorized-verified-change",
        P::ContentValidation,
        K::Authorization,
        "verified flag was changed by someone outside the organization",
        "Revert the verified flag; only organization members may change it",
    ),
    // cross-reference
    rule(
        "crossref/asset-outside-repo",
        P::CrossReference,
        K::CrossReference,
        "Relative asset URL escapes the repository",
        "Point the URL at a file inside the repository",
    ),
    rule(
        "crossref/missing-asset",
        P::CrossReference,
        K::CrossReference,
        "Relative asset URL points at a file that does not exist",
        "Add the file or fix the path",
    ),
];

pub fn all_rules() -> &'static [RuleInfo] {
    RULES
}

pub fn find_rule(id: &str) -> Option<&'static RuleInfo> {
    RULES.iter().find(|r| r.id == id)
}
