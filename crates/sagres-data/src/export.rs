//! Signal tables for downstream consumers.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use sagres_traits::{Result, SignalMap};
use tracing::info;

/// Name of the security column in a signal table.
pub const STOCK_COLUMN: &str = "Stock";
/// Name of the position column in a signal table.
pub const SIGNAL_COLUMN: &str = "Signal";

/// Convert a signal map into a two-column `Stock`/`Signal` frame.
pub fn signal_frame(signals: &SignalMap) -> Result<DataFrame> {
    let stocks: Vec<&str> = signals.keys().map(String::as_str).collect();
    let positions: Vec<&str> = signals.values().map(|p| p.as_str()).collect();
    let df = df! {
        STOCK_COLUMN => stocks,
        SIGNAL_COLUMN => positions,
    }?;
    Ok(df)
}

/// Write a signal map as CSV.
pub fn write_signals_csv(signals: &SignalMap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut df = signal_frame(signals)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    info!(path = %path.display(), rows = df.height(), "wrote signals");
    Ok(())
}
