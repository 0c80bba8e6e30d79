//! Sagres CLI binary.
//!
//! Provides command-line interface for the sagres signal pipeline.

mod cmd;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
#[command(name = "sagres")]
#[command(about = "Anomaly signals from financial statements and prices", long_about = None)]
#[command(version)]
struct Cli {
    /// Show detailed information and debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available strategies
    Strategies {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Run strategies and print their signals
    Run {
        /// Financial statement table (CSV or Parquet)
        #[arg(long, env = "SAGRES_STATEMENTS")]
        statements: Option<PathBuf>,

        /// Daily closing price table (CSV or Parquet)
        #[arg(long, env = "SAGRES_PRICES")]
        prices: Option<PathBuf>,

        /// Market index price table; defaults to the market column of the price table
        #[arg(long)]
        benchmark: Option<PathBuf>,

        /// Strategies to run (defaults to all)
        #[arg(short, long, value_delimiter = ',')]
        strategy: Vec<String>,

        /// Pipeline configuration (JSON)
        #[arg(long, env = "SAGRES_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write one `<strategy>.csv` per strategy into this directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Describe a strategy
    Describe {
        /// Strategy name or alias
        strategy: String,
    },
}

/// How `run` prints its signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Boxed tables per strategy
    Table,
    /// One JSON object keyed by strategy
    Json,
    /// `Strategy,Stock,Signal` rows
    Csv,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Strategies { category } => {
            cmd::strategies::list_strategies(category, cli.verbose)?;
        }
        Commands::Run {
            statements,
            prices,
            benchmark,
            strategy,
            config,
            format,
            output_dir,
        } => {
            let inputs = data::Inputs {
                statements,
                prices,
                benchmark,
            };
            cmd::run::run_strategies(&inputs, &strategy, config, format, output_dir)?;
        }
        Commands::Describe { strategy } => {
            cmd::describe::describe_strategy(&strategy)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber filtered by `RUST_LOG`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "sagres",
            "run",
            "--statements",
            "statements.csv",
            "--prices",
            "prices.parquet",
            "--strategy",
            "f_score,momentum",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                strategy, format, ..
            } => {
                assert_eq!(strategy, vec!["f_score", "momentum"]);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["sagres", "strategies", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
