use crate::finding::ValidationReport;
use crate::rules;
use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};
use std::collections::{BTreeSet, HashMap};

pub fn format(report: &ValidationReport) -> String {
    let errors = report.errors();

    let rule_ids: Vec<&str> = errors
        .iter()
        .map(|f| f.rule_id.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rule_index: HashMap<&str, i64> = rule_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i as i64))
        .collect();

    let rules: Vec<ReportingDescriptor> = rule_ids
        .iter()
        .map(|id| {
            let mut rule = ReportingDescriptor::builder().id(id.to_string()).build();
            if let Some(info) = rules::find_rule(id) {
                rule.short_description = Some(
                    MultiformatMessageString::builder()
                        .text(info.message.to_string())
                        .build(),
                );
                rule.help = Some(
                    MultiformatMessageString::builder()
                        .text(info.remediation.to_string())
                        .build(),
                );
            }
            rule
        })
        .collect();

    let results: Vec<SarifResult> = errors
        .iter()
        .map(|f| {
            let mut result = SarifResult::builder()
                .message(Message::builder().text(f.message.clone()).build())
                .build();

            result.rule_id = Some(f.rule_id.clone());
            result.level = Some(ResultLevel::Error);
            result.rule_index = rule_index.get(f.rule_id.as_str()).copied();

            if f.file.is_some() {
                let mut location = Location::builder().build();
                let mut physical = PhysicalLocation::builder().build();
                physical.artifact_location =
                    Some(ArtifactLocation::builder().uri(f.display_path()).build());
                location.physical_location = Some(physical);
                result.locations = Some(vec![location]);
            }

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("registry-validator")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(rules)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    serde_json::to_string_pretty(&sarif).expect("SARIF serialization failed")
}
