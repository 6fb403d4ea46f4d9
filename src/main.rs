mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use registry_validator::config::Config;
use registry_validator::github::{self, OfflineCollaborator};
use registry_validator::pipeline::{run_validation, ValidationContext};
use registry_validator::sections::{self, TemplateLint};
use registry_validator::{output, rules, scanner};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            root,
            kind,
            format,
            output: output_path,
            config: config_path,
            baseline,
            actor,
        } => {
            let config = Config::load(config_path.as_deref()).unwrap_or_else(|e| fatal(&e));

            let collaborator = Arc::new(OfflineCollaborator::from_config(&config));
            let actor = github::resolve_actor(collaborator, actor, &config)
                .unwrap_or_else(|e| fatal(&e));

            let mut ctx = ValidationContext::new(config).with_actor(actor);
            if let Some(baseline) = baseline {
                ctx = ctx.with_baseline(baseline);
            }

            let report = run_validation(&root, &kind.kinds(), &ctx).unwrap_or_else(|e| fatal(&e));
            let formatted = output::format_report(&report, &format);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            std::process::exit(if report.passed { 0 } else { 1 });
        }

        Commands::LintTemplate { path, json } => {
            let files = scanner::template_readmes(&path).unwrap_or_else(|e| fatal(&e));
            let lints: Vec<TemplateLint> = files.iter().map(|f| sections::lint_file(f)).collect();

            if json {
                println!("{}", output::lint::format_json(&lints));
            } else {
                print!("{}", output::lint::format_pretty(&lints));
            }

            std::process::exit(if lints.iter().any(TemplateLint::has_errors) { 1 } else { 0 });
        }

        Commands::ListRules => {
            let rules = rules::all_rules();
            println!("{}", "Built-in Rules".bold().underline());
            println!();

            let mut current_phase = None;
            for rule in rules {
                if current_phase != Some(rule.phase) {
                    if current_phase.is_some() {
                        println!();
                    }
                    println!("  {}", rule.phase.label().bold());
                    current_phase = Some(rule.phase);
                }
                println!(
                    "    {id:<36} {message}",
                    id = rule.id,
                    message = rule.message,
                );
            }

            println!();
            println!("  Total: {} rules", rules.len());
        }

        Commands::Explain { rule_id } => match rules::find_rule(&rule_id) {
            Some(rule) => {
                println!("{}", rule.id.bold());
                println!();
                println!("  Phase:        {}", rule.phase);
                println!("  Kind:         {}", rule.kind);
                println!("  Description:  {}", rule.message);
                println!("  Remediation:  {}", rule.remediation);
            }
            None => {
                eprintln!("Unknown rule: {rule_id}");
                eprintln!("Use 'registry-validator list-rules' to see all available rules.");
                std::process::exit(2);
            }
        },
    }
}

fn fatal(e: &dyn std::error::Error) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(2);
}
