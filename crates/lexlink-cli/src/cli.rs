//! CLI command definitions and argument parsing.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LexLink CLI - Find connections between cases and precedents.
#[derive(Debug, Parser)]
#[command(name = "lexlink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LEXLINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log pipeline stages to stderr
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
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one case against every other record in a file
    Analyze(AnalyzeArgs),

    /// Show the dimension scores for one pair of records
    Score(ScoreArgs),

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// JSON file of records (an array or {"records": [...]})
    #[arg(short, long)]
    pub input: PathBuf,

    /// Identifier of the case under analysis
    #[arg(short, long)]
    pub target: String,

    /// Reference date for recency (YYYY-MM-DD, default today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Maximum number of insights to return
    #[arg(long)]
    pub max_insights: Option<usize>,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    /// JSON file of records
    #[arg(short, long)]
    pub input: PathBuf,

    /// First record (scored as the target)
    pub first: String,

    /// Second record (scored as the candidate)
    pub second: String,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration as TOML
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from([
            "lexlink",
            "analyze",
            "--input",
            "matter.json",
            "--target",
            "case-1",
            "--as-of",
            "2024-01-01",
        ]);
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.target, "case-1");
                assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert!(args.max_insights.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "lexlink", "score", "-i", "m.json", "a", "b", "--format", "json", "-v",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.first, "a");
                assert_eq!(args.second, "b");
            }
            _ => panic!("Expected Score command"),
        }
    }

    #[test]
    fn test_bad_date_rejected() {
        let result = Cli::try_parse_from([
            "lexlink", "analyze", "-i", "m.json", "-t", "c", "--as-of", "yesterday",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["lexlink", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }
}
