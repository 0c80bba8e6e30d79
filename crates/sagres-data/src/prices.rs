//! The price store.
//!
//! A [`PriceTable`] is a date-indexed matrix of closing prices, one column
//! per security, with gaps where a security did not trade or was not yet
//! listed. A [`PriceSeries`] is a single column, used for the market index
//! the beta strategy measures against.

use indexmap::IndexMap;
use polars::prelude::*;
use sagres_traits::{Date, Result, SagresError, Symbol};
use tracing::{debug, info, warn};

use crate::fields::DATE_COLUMNS;
use crate::loader::{find_column, numeric_column, parse_date, string_column};

/// Rows from the end at which a security must still have a price to count
/// as tradeable.
pub const TRADEABLE_OFFSET: usize = 5;

/// Closing prices, one column per security, rows in ascending date order.
///
/// Columns keep their insertion order, which is the tie-break order used
/// when ranking securities.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    dates: Vec<Date>,
    series: IndexMap<Symbol, Vec<Option<f64>>>,
}

impl PriceTable {
    /// Create an empty table over the given trading days.
    ///
    /// Dates must be strictly increasing.
    pub fn new(dates: Vec<Date>) -> Result<Self> {
        ensure_ascending(&dates)?;
        Ok(Self {
            dates,
            series: IndexMap::new(),
        })
    }

    /// Add a security column (builder form of [`insert`](Self::insert)).
    pub fn with_series(mut self, symbol: impl Into<Symbol>, prices: Vec<Option<f64>>) -> Result<Self> {
        self.insert(symbol, prices)?;
        Ok(self)
    }

    /// Add or replace a security column.
    pub fn insert(&mut self, symbol: impl Into<Symbol>, prices: Vec<Option<f64>>) -> Result<()> {
        let symbol = symbol.into();
        if prices.len() != self.dates.len() {
            return Err(SagresError::InvalidData(format!(
                "Price column '{symbol}' has {} rows, table has {}",
                prices.len(),
                self.dates.len()
            )));
        }
        let prices = prices
            .into_iter()
            .map(|p| p.filter(|v| v.is_finite()))
            .collect();
        self.series.insert(symbol, prices);
        Ok(())
    }

    /// Build the table from a wide price frame: a `date` column plus one
    /// numeric column per security.
    ///
    /// Rows are sorted by date; when a date repeats, the last row wins.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let date_col = find_column(df, DATE_COLUMNS)
            .ok_or_else(|| SagresError::MissingColumn(DATE_COLUMNS[0].to_string()))?;
        let raw_dates = string_column(df, date_col)?;

        let mut rows: Vec<(Date, usize)> = Vec::with_capacity(raw_dates.len());
        for (row, value) in raw_dates.iter().enumerate() {
            match value {
                Some(value) => rows.push((parse_date(value)?, row)),
                None => warn!(row, "price row without a date skipped"),
            }
        }
        rows.sort();
        let before = rows.len();
        // Keep the last row for each date.
        rows.reverse();
        rows.dedup_by_key(|(date, _)| *date);
        rows.reverse();
        if rows.len() < before {
            warn!(dropped = before - rows.len(), "duplicate price dates");
        }

        let mut table = Self::new(rows.iter().map(|(date, _)| *date).collect())?;
        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == date_col {
                continue;
            }
            if column.dtype() == &DataType::String {
                debug!(column = name, "skipping non-numeric price column");
                continue;
            }
            let values = numeric_column(df, name)?;
            table.insert(name, rows.iter().map(|(_, row)| values[*row]).collect())?;
        }

        info!(
            days = table.len(),
            securities = table.symbol_count(),
            "loaded price table"
        );
        Ok(table)
    }

    /// Trading days, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of trading days.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no trading days.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of security columns.
    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }

    /// Security symbols in column order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.series.keys()
    }

    /// Whether a security column exists.
    pub fn contains(&self, symbol: &str) -> bool {
        self.series.contains_key(symbol)
    }

    /// Prices of one security.
    pub fn prices(&self, symbol: &str) -> Option<&[Option<f64>]> {
        self.series.get(symbol).map(Vec::as_slice)
    }

    /// All columns in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &[Option<f64>])> {
        self.series.iter().map(|(s, p)| (s, p.as_slice()))
    }

    /// Closing price on the last trading day of the table.
    ///
    /// This is the last row, not the last observed price: a security that
    /// did not trade on the final day has no latest price.
    pub fn latest_price(&self, symbol: &str) -> Option<f64> {
        self.series.get(symbol).and_then(|p| p.last().copied().flatten())
    }

    /// Whether a security has any price and is still quoted
    /// [`TRADEABLE_OFFSET`] rows before the end of the table.
    ///
    /// A table shorter than [`TRADEABLE_OFFSET`] rows has no such row, so
    /// nothing in it is tradeable.
    pub fn is_tradeable(&self, symbol: &str) -> bool {
        let Some(row) = self.len().checked_sub(TRADEABLE_OFFSET) else {
            debug!(symbol, rows = self.len(), "price table too short to judge tradeability");
            return false;
        };
        self.prices(symbol).is_some_and(|prices| {
            prices.iter().any(Option::is_some) && prices.get(row).copied().flatten().is_some()
        })
    }

    /// Tradeable columns in order.
    pub fn tradeable(&self) -> impl Iterator<Item = (&Symbol, &[Option<f64>])> {
        self.iter().filter(|(symbol, _)| self.is_tradeable(symbol))
    }

    /// Remove a column and return it as a standalone series.
    ///
    /// Used to separate a market index that arrives in the same table as the
    /// securities.
    pub fn split_off(&mut self, symbol: &str) -> Option<PriceSeries> {
        self.series.shift_remove(symbol).map(|prices| PriceSeries {
            symbol: symbol.to_string(),
            dates: self.dates.clone(),
            prices,
        })
    }
}

/// A single dated price series.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: Symbol,
    dates: Vec<Date>,
    prices: Vec<Option<f64>>,
}

impl PriceSeries {
    /// Create a series. Dates must be strictly increasing and match prices
    /// in length.
    pub fn new(symbol: impl Into<Symbol>, dates: Vec<Date>, prices: Vec<Option<f64>>) -> Result<Self> {
        ensure_ascending(&dates)?;
        if dates.len() != prices.len() {
            return Err(SagresError::InvalidData(format!(
                "Series has {} dates but {} prices",
                dates.len(),
                prices.len()
            )));
        }
        Ok(Self {
            symbol: symbol.into(),
            dates,
            prices: prices.into_iter().map(|p| p.filter(|v| v.is_finite())).collect(),
        })
    }

    /// Load a series from a price frame, taking the named column or, when
    /// `column` is `None`, the first non-date column.
    pub fn from_dataframe(df: &DataFrame, column: Option<&str>) -> Result<Self> {
        let mut table = PriceTable::from_dataframe(df)?;
        let symbol = match column {
            Some(name) => name.to_string(),
            None => table
                .symbols()
                .next()
                .cloned()
                .ok_or_else(|| SagresError::MissingColumn("benchmark price".to_string()))?,
        };
        table
            .split_off(&symbol)
            .ok_or(SagresError::MissingColumn(symbol))
    }

    /// Security symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Dates, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Prices aligned with [`dates`](Self::dates).
    pub fn prices(&self) -> &[Option<f64>] {
        &self.prices
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The part of the series on or after `start`.
    #[must_use]
    pub fn since(&self, start: Date) -> Self {
        let from = self.dates.partition_point(|d| *d < start);
        Self {
            symbol: self.symbol.clone(),
            dates: self.dates[from..].to_vec(),
            prices: self.prices[from..].to_vec(),
        }
    }
}

fn ensure_ascending(dates: &[Date]) -> Result<()> {
    match dates.windows(2).find(|w| w[0] >= w[1]) {
        Some(w) => Err(SagresError::InvalidData(format!(
            "Dates must be strictly increasing ({} followed by {})",
            w[0], w[1]
        ))),
        None => Ok(()),
    }
}
