//! The read-only inputs of one pipeline run.

use sagres_traits::{Result, SagresError};

use crate::prices::{PriceSeries, PriceTable};
use crate::statements::FinancialStatements;

/// Snapshot of every input a strategy may read.
///
/// Each table is optional so that price-only strategies can run without
/// statements and vice versa; a strategy asking for a table that was not
/// supplied fails with [`SagresError::MissingInput`].
#[derive(Debug, Clone, Default)]
pub struct Universe {
    statements: Option<FinancialStatements>,
    prices: Option<PriceTable>,
    benchmark: Option<PriceSeries>,
}

impl Universe {
    /// An empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the entity-period store.
    #[must_use]
    pub fn with_statements(mut self, statements: FinancialStatements) -> Self {
        self.statements = Some(statements);
        self
    }

    /// Attach the price store.
    #[must_use]
    pub fn with_prices(mut self, prices: PriceTable) -> Self {
        self.prices = Some(prices);
        self
    }

    /// Attach the market index series.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: PriceSeries) -> Self {
        self.benchmark = Some(benchmark);
        self
    }

    /// The entity-period store.
    pub fn statements(&self) -> Result<&FinancialStatements> {
        self.statements
            .as_ref()
            .ok_or_else(|| SagresError::MissingInput("financial statement table".to_string()))
    }

    /// The price store.
    pub fn prices(&self) -> Result<&PriceTable> {
        self.prices
            .as_ref()
            .ok_or_else(|| SagresError::MissingInput("price table".to_string()))
    }

    /// The market index series.
    pub fn benchmark(&self) -> Result<&PriceSeries> {
        self.benchmark
            .as_ref()
            .ok_or_else(|| SagresError::MissingInput("benchmark price series".to_string()))
    }
}
