//! Data loading utilities for the Sagres CLI.

use std::path::PathBuf;

use sagres::data::loader::read_table;
use sagres::{FinancialStatements, PriceSeries, PriceTable, Result, Universe};
use tracing::{info, warn};

/// Input tables named on the command line.
#[derive(Debug, Clone, Default)]
pub(crate) struct Inputs {
    pub(crate) statements: Option<PathBuf>,
    pub(crate) prices: Option<PathBuf>,
    pub(crate) benchmark: Option<PathBuf>,
}

/// Load every supplied table into a universe.
///
/// Tables that are not supplied stay absent; strategies that need them
/// report a missing input. Without a benchmark file the market index is
/// taken out of the price table's `market_symbol` column, if present.
pub(crate) fn load_universe(inputs: &Inputs, market_symbol: &str) -> Result<Universe> {
    let mut universe = Universe::new();

    if let Some(path) = &inputs.statements {
        let statements = FinancialStatements::from_dataframe(&read_table(path)?)?;
        info!(
            entities = statements.len(),
            periods = statements.period_count(),
            "loaded statements"
        );
        universe = universe.with_statements(statements);
    }

    let mut benchmark = match &inputs.benchmark {
        Some(path) => Some(PriceSeries::from_dataframe(&read_table(path)?, None)?),
        None => None,
    };

    if let Some(path) = &inputs.prices {
        let mut prices = PriceTable::from_dataframe(&read_table(path)?)?;
        if benchmark.is_none() {
            benchmark = prices.split_off(market_symbol);
        }
        info!(
            dates = prices.len(),
            securities = prices.symbol_count(),
            "loaded prices"
        );
        universe = universe.with_prices(prices);
    }

    match benchmark {
        Some(series) => universe = universe.with_benchmark(series),
        None => warn!(market_symbol, "no market index; betting against beta will not run"),
    }
    Ok(universe)
}
