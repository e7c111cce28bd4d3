//! nest-lint CLI tool.
//!
//! Usage:
//! ```bash
//! nest-lint check [OPTIONS] [PATH]
//! nest-lint list-rules [RULE]
//! nest-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod project;

/// Style linter for nested Ruby class and module definitions
#[derive(Parser)]
#[command(name = "nest-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// File or directory to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Override the enforced style ("nested" or "compact")
        #[arg(long, value_parser = ["nested", "compact"])]
        style: Option<String>,

        /// Override which definitions the compact style checks
        #[arg(long, value_parser = ["class", "module", "both"])]
        enforced_on: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// List available rules, or show one rule's configured options
    ListRules {
        /// Rule name or code (e.g. NL001)
        rule: Option<String>,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Annotated source snippets.
    #[default]
    Text,
    /// One JSON report per line, one line per file.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            style,
            enforced_on,
            exclude,
        } => {
            let project = project::locate(&path, cli.config.as_deref());
            let args = commands::check::CheckArgs {
                path,
                format,
                style,
                enforced_on,
                exclude,
            };
            commands::check::run(args, &project)
        }
        Commands::ListRules { rule } => {
            let project = project::locate(Path::new("."), cli.config.as_deref());
            commands::list_rules::run(rule.as_deref(), &project)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
