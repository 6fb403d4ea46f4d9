//! Field-level checks shared by the per-kind validators.
//!
//! Every function returns its findings without a file attribution; the
//! caller attaches the README path.

use crate::finding::{ErrorKind, Finding};

pub const VALID_OPERATING_SYSTEMS: &[&str] = &["windows", "macos", "linux"];

fn field_finding(rule_id: &str, message: impl Into<String>) -> Finding {
    Finding::new(rule_id, ErrorKind::FieldValidation, message)
}

/// Required string that must be present and non-blank.
pub fn validate_required(field: &str, value: &str) -> Option<Finding> {
    value.trim().is_empty().then(|| {
        field_finding(
            "field/missing-required",
            format!("frontmatter {field} is missing or empty"),
        )
    })
}

/// Optional string that, when present, must be non-blank.
pub fn validate_optional_non_empty(field: &str, value: Option<&str>) -> Option<Finding> {
    match value {
        Some(v) if v.trim().is_empty() => Some(field_finding(
            "field/empty-optional",
            format!("if defined, {field} must not be an empty string"),
        )),
        _ => None,
    }
}

/// Value that must be one of a fixed allow-list.
pub fn validate_enum(field: &str, value: &str, allowed: &[&str]) -> Option<Finding> {
    if allowed.contains(&value) {
        return None;
    }
    Some(field_finding(
        "field/invalid-enum",
        format!(
            "{field} {value:?} is not valid; must be one of [{}]",
            allowed.join(", ")
        ),
    ))
}

/// `true` when `s` survives URL-query escaping unchanged, i.e. it can be
/// placed in browser filter state as-is.
///
/// Only ASCII letters, digits and `-_.~` pass. Form encoding differs from
/// query escaping on exactly two bytes: it leaves `*` bare and escapes `~`.
pub fn is_query_safe(s: &str) -> bool {
    !s.contains('*')
        && s
            .split('~')
            .all(|part| {
                url::form_urlencoded::byte_serialize(part.as_bytes()).collect::<String>() == part
            })
}

/// Tags drive the registry's filter controls. An explicit empty list is
/// fine; an absent (or null) list is not.
pub fn validate_tags(tags: Option<&[String]>) -> Vec<Finding> {
    let Some(tags) = tags else {
        return vec![field_finding(
            "field/missing-tags",
            "tags must be provided (use [] for no tags)",
        )];
    };

    tags.iter()
        .filter(|t| !is_query_safe(t))
        .map(|t| {
            field_finding(
                "field/invalid-tag",
                format!("tag {t:?} cannot be used for filter state in the registry website"),
            )
        })
        .collect()
}

pub fn validate_operating_systems(systems: Option<&[String]>) -> Vec<Finding> {
    systems
        .unwrap_or_default()
        .iter()
        .filter(|s| !VALID_OPERATING_SYSTEMS.contains(&s.as_str()))
        .map(|s| {
            field_finding(
                "field/invalid-os",
                format!(
                    "detected unknown operating system {s:?}; must be one of [{}]",
                    VALID_OPERATING_SYSTEMS.join(", ")
                ),
            )
        })
        .collect()
}

/// Relative URLs start with `.` or `/`; everything else is treated as an
/// absolute URL.
pub fn is_relative_url(value: &str) -> bool {
    value.starts_with('.') || value.starts_with('/')
}

/// Icon/avatar URL check.
///
/// Absolute URLs must parse and carry no query string. Relative URLs must
/// start with one of `relative_prefixes` and carry no query string either.
pub fn validate_asset_url(field: &str, value: &str, relative_prefixes: &[String]) -> Vec<Finding> {
    let rule_id = "field/invalid-asset-url";
    if value.trim().is_empty() {
        return vec![field_finding(
            rule_id,
            format!("{field} URL must be omitted or a non-empty string"),
        )];
    }

    let mut findings = Vec::new();
    if value.contains('?') {
        findings.push(field_finding(
            rule_id,
            format!("{field} URL {value:?} is not allowed to contain query parameters"),
        ));
    }

    if !is_relative_url(value) {
        if let Err(e) = url::Url::parse(value) {
            findings.push(field_finding(
                rule_id,
                format!("absolute {field} URL {value:?} is not correctly formatted: {e}"),
            ));
        }
        return findings;
    }

    if !relative_prefixes.iter().any(|p| value.starts_with(p.as_str())) {
        findings.push(field_finding(
            rule_id,
            format!(
                "relative {field} URL {value:?} must start with one of [{}]",
                relative_prefixes.join(", ")
            ),
        ));
    }
    findings
}

/// Optional link (LinkedIn, website) that must be an absolute URL.
pub fn validate_absolute_url(field: &str, value: Option<&str>) -> Option<Finding> {
    let value = value?;
    url::Url::parse(value).err().map(|e| {
        field_finding(
            "field/invalid-url",
            format!("{field} URL {value:?} is not valid: {e}"),
        )
    })
}

/// Best-effort structural check of a support email. This cannot prove the
/// address exists; it only catches obviously malformed values.
pub fn validate_email(email: Option<&str>) -> Vec<Finding> {
    let Some(email) = email else {
        return vec![];
    };
    let rule_id = "field/invalid-email";
    let mut findings = Vec::new();

    let Some((username, server)) = email.split_once('@') else {
        return vec![field_finding(
            rule_id,
            format!("email address {email:?} is missing @ symbol"),
        )];
    };
    if server.contains('@') {
        findings.push(field_finding(
            rule_id,
            format!("email address {email:?} contains more than one @ symbol"),
        ));
    }
    if username.is_empty() {
        findings.push(field_finding(
            rule_id,
            format!("email address {email:?} is missing username"),
        ));
    }

    let Some((domain, tld)) = server.split_once('.') else {
        findings.push(field_finding(
            rule_id,
            format!("email address {email:?} is missing period for server segment"),
        ));
        return findings;
    };
    if domain.is_empty() {
        findings.push(field_finding(
            rule_id,
            format!("email address {email:?} is missing domain"),
        ));
    }
    if tld.is_empty() {
        findings.push(field_finding(
            rule_id,
            format!("email address {email:?} is missing top-level domain"),
        ));
    }
    if email.contains('?') {
        findings.push(field_finding(
            rule_id,
            format!("email address {email:?} is not allowed to contain query parameters"),
        ));
    }

    findings
}

/// `true` when `s` needs no escaping as a URL path segment.
///
/// Besides the unreserved `-_.~`, the sub-delimiters `$&+:=@` are legal
/// inside a segment and stay bare.
pub fn is_path_segment_safe(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '-' | '_' | '.' | '~' | '$' | '&' | '+' | ':' | '=' | '@')
        })
}
