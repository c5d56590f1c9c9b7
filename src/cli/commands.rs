//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Datastore CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-datastore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Project to query (overrides config and environment)
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a kind query and print matching entities
    Run {
        /// Entity kind to query
        #[arg(short, long)]
        kind: String,

        /// Resume from a base64 cursor
        #[arg(long)]
        start_cursor: Option<String>,

        /// Overall result limit of the query
        #[arg(long)]
        limit: Option<u32>,

        /// Maximum page fetches (overrides config)
        #[arg(long)]
        request_limit: Option<u32>,

        /// Stop after this many entities
        #[arg(long)]
        take: Option<usize>,

        /// Print each entity together with its cursor
        #[arg(long)]
        with_cursor: bool,
    },

    /// Validate the configuration
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one entity per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "solidafy-datastore",
            "-C",
            "datastore.yaml",
            "run",
            "--kind",
            "Task",
            "--start-cursor",
            "c2Vjb25kLXBhZ2UtY3Vyc29y",
            "--request-limit",
            "2",
            "--take",
            "30",
            "--with-cursor",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("datastore.yaml")));
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Run {
                kind,
                start_cursor,
                limit,
                request_limit,
                take,
                with_cursor,
            } => {
                assert_eq!(kind, "Task");
                assert_eq!(start_cursor.as_deref(), Some("c2Vjb25kLXBhZ2UtY3Vyc29y"));
                assert_eq!(limit, None);
                assert_eq!(request_limit, Some(2));
                assert_eq!(take, Some(30));
                assert!(with_cursor);
            }
            Commands::Validate => panic!("Expected run"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["solidafy-datastore", "validate", "--project", "p", "-v"])
                .unwrap();
        assert_eq!(cli.project.as_deref(), Some("p"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Validate));
    }

    #[test]
    fn test_run_requires_kind() {
        assert!(Cli::try_parse_from(["solidafy-datastore", "run"]).is_err());
    }
}
