#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sagres/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # sagres
//!
//! Anomaly signal pipeline over annual financial statements and daily prices.
//!
//! sagres is an umbrella crate that re-exports all sagres sub-crates for
//! convenience. It turns a statement table, a price table and a market index
//! into Long/Short signals for seven published return anomalies.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sagres::data::loader::read_table;
//! use sagres::{FinancialStatements, Pipeline, PipelineConfig, PriceTable, Universe};
//!
//! # fn main() -> sagres::Result<()> {
//! let statements = FinancialStatements::from_dataframe(&read_table("statements.csv")?)?;
//! let prices = PriceTable::from_dataframe(&read_table("prices.csv")?)?;
//! let universe = Universe::new().with_statements(statements).with_prices(prices);
//!
//! let report = Pipeline::new(PipelineConfig::default()).run_all(&universe);
//! for (kind, signals) in report.succeeded() {
//!     println!("{kind}: {} signals", signals.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Shared types ([`Position`], [`SignalMap`]), errors and statistics
//! - [`data`] - Statement and price stores, table loading and signal export
//! - [`metrics`] - Temporal alignment, accounting ratios, returns and ranking
//! - [`signals`] - The seven strategies and the [`Pipeline`]
//!
//! ## Architecture
//!
//! 1. **Loaders** normalize input tables into a [`Universe`]
//! 2. **Metrics** derive per-period ratios and cross-sectional ranks
//! 3. **Strategies** screen, score and rank the universe into signals
//! 4. **The pipeline** runs any subset of strategies and reports each outcome

/// Version information for the sagres crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Shared types, errors and statistics.
pub mod traits {
    pub use sagres_traits::*;
}

pub use sagres_traits::{Date, EntityId, FiscalYear, Position, SignalMap, Symbol};
pub use sagres_traits::{Result, SagresError};

// ============================================================================
// Input Data
// ============================================================================

/// Input stores and table I/O.
///
/// Statements are kept per entity in fiscal-year order with at most one
/// record per year; prices are a date-indexed table with one column per
/// symbol.
///
/// # Example
///
/// ```ignore
/// use sagres::data::{loader::read_table, PriceTable};
///
/// let prices = PriceTable::from_dataframe(&read_table("prices.parquet")?)?;
/// ```
pub mod data {
    pub use sagres_data::*;
}

pub use sagres_data::{FinancialStatements, PriceSeries, PriceTable, Universe};

// ============================================================================
// Metrics
// ============================================================================

/// Derived metrics.
///
/// ## Key Components
///
/// - **Alignment**: lag, two-period average, change and growth per entity
/// - **Fundamentals**: ratios that yield `None` on absent inputs or zero
///   denominators
/// - **Returns**: daily and monthly returns, beta, correlation
/// - **Ranking**: quantile buckets and two-digit industry peer groups
pub mod metrics {
    pub use sagres_metrics::*;
}

// ============================================================================
// Strategies
// ============================================================================

/// Strategies and the pipeline.
///
/// | Strategy | Universe | Long | Short |
/// |----------|----------|------|-------|
/// | F-Score | top book-to-market quintile | score >= 7 | score <= 2 |
/// | PEAD | all filers | top SUE decile | bottom SUE decile |
/// | Momentum | tradeable prices | top return decile | bottom return decile |
/// | G-Score | bottom book-to-market quintile | score >= 6 | score <= 2 |
/// | Accruals | all filers | bottom cash component decile | top cash component decile |
/// | Betting against beta | tradeable prices | below median beta | at or above median |
/// | Equity pairs | tradeable prices | bottom return gap decile | top return gap decile |
pub mod signals {
    pub use sagres_signals::*;
}

pub use sagres_signals::{Pipeline, PipelineConfig, PipelineReport, Strategy, StrategyKind};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use sagres::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        FinancialStatements, Pipeline, PipelineConfig, Position, PriceTable, Result, SagresError,
        SignalMap, Strategy, StrategyKind, Universe,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_strategy(_strategy: &dyn Strategy) {}

        let report = Pipeline::default().run(&Universe::new(), &[StrategyKind::Pead]);
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error = SagresError::StrategyNotFound("magic".to_string());
        assert!(error.to_string().contains("magic"));
    }
}
