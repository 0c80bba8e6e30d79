//! Input stores for the sagres signal pipeline.
//!
//! This crate owns the boundary between files and typed data:
//! - [`statements`]: the entity-period store of annual financial statements
//! - [`prices`]: the date-indexed closing price store and single price series
//! - [`universe`]: the read-only snapshot handed to every strategy
//! - [`loader`] and [`export`]: CSV/Parquet tables in, signal tables out
//!
//! # Example
//!
//! ```ignore
//! use sagres_data::{loader::read_table, FinancialStatements, PriceTable, Universe};
//!
//! let statements = FinancialStatements::from_dataframe(&read_table("statements.csv")?)?;
//! let prices = PriceTable::from_dataframe(&read_table("prices.parquet")?)?;
//! let universe = Universe::new().with_statements(statements).with_prices(prices);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod export;
pub mod fields;
pub mod loader;
pub mod prices;
pub mod statements;
pub mod universe;

pub use prices::{PriceSeries, PriceTable};
pub use statements::{EntityHistory, FinancialStatements, PeriodRecord};
pub use universe::Universe;
