//! Pipeline run command implementation.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use polars::prelude::*;
use sagres::data::export::{SIGNAL_COLUMN, STOCK_COLUMN, write_signals_csv};
use sagres::{Pipeline, PipelineConfig, PipelineReport, Position, SignalMap, StrategyKind};
use tracing::info;

use crate::OutputFormat;
use crate::data::{self, Inputs};

/// Run the requested strategies and print or export their signals.
pub(crate) fn run_strategies(
    inputs: &Inputs,
    names: &[String],
    config_path: Option<PathBuf>,
    format: OutputFormat,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let kinds = parse_kinds(names)?;
    let config = match config_path {
        Some(path) => PipelineConfig::from_json_file(&path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    let universe = data::load_universe(inputs, &config.beta.market_symbol)?;
    let report = Pipeline::new(config).run(&universe, &kinds);

    match format {
        OutputFormat::Table => print_tables(&report),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_csv(&report)?,
    }

    if let Some(dir) = output_dir {
        fs::create_dir_all(&dir)?;
        for (kind, signals) in report.succeeded() {
            write_signals_csv(signals, dir.join(format!("{}.csv", kind.name())))?;
        }
        info!(dir = %dir.display(), "exported signals");
    }

    if !report.is_empty() && report.failure_count() == report.len() {
        bail!("all {} strategies failed", report.len());
    }
    Ok(())
}

/// Parse strategy names, defaulting to every strategy.
fn parse_kinds(names: &[String]) -> Result<Vec<StrategyKind>> {
    if names.is_empty() {
        return Ok(StrategyKind::ALL.to_vec());
    }
    names
        .iter()
        .map(|name| name.parse::<StrategyKind>().map_err(Into::into))
        .collect()
}

fn count(signals: &SignalMap, position: Position) -> usize {
    signals.values().filter(|p| **p == position).count()
}

fn print_tables(report: &PipelineReport) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Strategy Signals                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for (kind, result) in report.iter() {
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("{}", kind.display_name().to_uppercase());
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

        match result {
            Ok(signals) if signals.is_empty() => println!("No signals.\n"),
            Ok(signals) => {
                println!("{:<10} {:>8}", "Stock", "Signal");
                println!("{}", "─".repeat(19));
                for (stock, position) in signals {
                    println!("{:<10} {:>8}", stock, position.as_str());
                }
                println!();
                println!(
                    "Long: {}  Short: {}\n",
                    count(signals, Position::Long),
                    count(signals, Position::Short)
                );
            }
            Err(e) => println!("Failed: {}\n", e),
        }
    }
}

fn print_json(report: &PipelineReport) -> Result<()> {
    let mut out = serde_json::Map::new();
    for (kind, result) in report.iter() {
        let value = match result {
            Ok(signals) => serde_json::to_value(signals)?,
            Err(e) => serde_json::json!({ "error": e.to_string() }),
        };
        out.insert(kind.name().to_string(), value);
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// One long frame of every successful strategy's signals.
fn signal_rows(report: &PipelineReport) -> PolarsResult<DataFrame> {
    let mut strategies = Vec::new();
    let mut stocks = Vec::new();
    let mut positions = Vec::new();
    for (kind, signals) in report.succeeded() {
        for (stock, position) in signals {
            strategies.push(kind.name());
            stocks.push(stock.as_str());
            positions.push(position.as_str());
        }
    }
    df! {
        "Strategy" => strategies,
        STOCK_COLUMN => stocks,
        SIGNAL_COLUMN => positions,
    }
}

fn print_csv(report: &PipelineReport) -> Result<()> {
    let mut df = signal_rows(report)?;
    CsvWriter::new(io::stdout().lock())
        .include_header(true)
        .finish(&mut df)?;
    for (kind, result) in report.iter() {
        if let Err(e) = result {
            eprintln!("{}: {}", kind.name(), e);
        }
    }
    Ok(())
}
