//! CLI command definitions and argument parsing.

use basket_domain::RuleSortKey;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Basket CLI - Find products that are bought together.
#[derive(Debug, Parser)]
#[command(name = "basket")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BASKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Threshold profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Minimum support ratio (overrides the profile)
    #[arg(short = 's', long, global = true)]
    pub min_support: Option<f64>,

    /// Minimum confidence ratio (overrides the profile)
    #[arg(short = 'C', long, global = true)]
    pub min_confidence: Option<f64>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Comma-separated values
    Csv,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a full analysis and print a report
    Analyze(AnalyzeArgs),

    /// List frequent itemsets
    Itemsets(ItemsetsArgs),

    /// List association rules
    Rules(RulesArgs),

    /// Export association rules to a CSV file
    Export(ExportArgs),

    /// Write the built-in sample dataset
    Sample(SampleArgs),

    /// Show sales statistics for a dataset
    Sales(SalesArgs),

    /// Manage threshold profiles
    Profile(ProfileArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Dataset file (JSON)
    pub dataset: PathBuf,

    /// Number of top rules to show (defaults to the configured value)
    #[arg(short, long)]
    pub top: Option<usize>,
}

/// Arguments for the itemsets command.
#[derive(Debug, Parser)]
pub struct ItemsetsArgs {
    /// Dataset file (JSON)
    pub dataset: PathBuf,

    /// Only itemsets with this many items
    #[arg(short = 'k', long)]
    pub size: Option<usize>,
}

/// Arguments for the rules command.
#[derive(Debug, Parser)]
pub struct RulesArgs {
    /// Dataset file (JSON)
    pub dataset: PathBuf,

    /// Only rules mentioning this product (name or id)
    #[arg(short, long)]
    pub item: Option<String>,

    /// Only rules with this many items in total
    #[arg(short = 'k', long)]
    pub size: Option<usize>,

    /// Sort order
    #[arg(long, value_enum, default_value = "confidence")]
    pub sort: SortArg,

    /// Maximum number of rules
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Dataset file (JSON)
    pub dataset: PathBuf,

    /// Destination CSV file
    #[arg(short, long, default_value = "rules.csv")]
    pub output: PathBuf,
}

/// Arguments for the sample command.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Destination file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the sales command.
#[derive(Debug, Parser)]
pub struct SalesArgs {
    /// Dataset file (JSON)
    pub dataset: PathBuf,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Minimum support ratio
        #[arg(long)]
        support: f64,
        /// Minimum confidence ratio
        #[arg(long)]
        confidence: f64,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Rule sort argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SortArg {
    /// Highest confidence first
    Confidence,
    /// Highest support first
    Support,
    /// Highest lift first
    Lift,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Csv => crate::config::OutputFormat::Csv,
        }
    }
}

impl From<SortArg> for RuleSortKey {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Confidence => RuleSortKey::Confidence,
            SortArg::Support => RuleSortKey::Support,
            SortArg::Lift => RuleSortKey::Lift,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from(["basket", "analyze", "sales.json", "--top", "3"]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.dataset, PathBuf::from("sales.json"));
                assert_eq!(args.top, Some(3));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_threshold_flags() {
        let cli = Cli::parse_from([
            "basket",
            "rules",
            "sales.json",
            "--min-support",
            "0.2",
            "-C",
            "0.75",
            "--sort",
            "lift",
            "--format",
            "json",
        ]);
        assert_eq!(cli.min_support, Some(0.2));
        assert_eq!(cli.min_confidence, Some(0.75));
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Rules(args) => assert!(matches!(args.sort, SortArg::Lift)),
            _ => panic!("Expected Rules command"),
        }
    }

    #[test]
    fn test_profile_set_command() {
        let cli = Cli::parse_from([
            "basket",
            "profile",
            "set",
            "weekly",
            "--support",
            "0.05",
            "--confidence",
            "0.4",
        ]);
        match cli.command {
            Command::Profile(ProfileArgs {
                action: ProfileAction::Set { name, support, .. },
            }) => {
                assert_eq!(name, "weekly");
                assert_eq!(support, 0.05);
            }
            _ => panic!("Expected Profile Set command"),
        }
    }

    #[test]
    fn test_missing_command_rejected() {
        assert!(Cli::try_parse_from(["basket"]).is_err());
    }

    #[test]
    fn test_sort_conversion() {
        let key: RuleSortKey = SortArg::Support.into();
        assert_eq!(key, RuleSortKey::Support);
    }
}
