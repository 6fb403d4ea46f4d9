use clap::{Parser, Subcommand, ValueEnum};
use registry_validator::output::OutputFormat;
use registry_validator::readme::ResourceKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "registry-validator",
    version,
    about = "Validate registry READMEs before publication"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate the registry in a repository checkout
    Validate {
        /// Repository root containing the registry directory
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Which READMEs to validate
        #[arg(long, short, default_value = "all", value_enum)]
        kind: KindSelector,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Prior checkout to compare verified flags against
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Username responsible for the change (defaults to $ACTOR)
        #[arg(long)]
        actor: Option<String>,
    },

    /// Review template README sections against content patterns
    LintTemplate {
        /// A template README.md, or a directory searched for templates
        path: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all built-in rules with descriptions
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule ID (e.g., "body/missing-h1")
        rule_id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindSelector {
    All,
    Contributors,
    Modules,
    Templates,
}

impl KindSelector {
    pub fn kinds(self) -> Vec<ResourceKind> {
        match self {
            KindSelector::All => ResourceKind::ALL.to_vec(),
            KindSelector::Contributors => vec![ResourceKind::Contributor],
            KindSelector::Modules => vec![ResourceKind::Module],
            KindSelector::Templates => vec![ResourceKind::Template],
        }
    }
}
