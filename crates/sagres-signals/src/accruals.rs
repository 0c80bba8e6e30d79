//! Accrual anatomy: the cash and accrual components of earnings.

use sagres_data::fields::{
    ASSETS, ASSETS_CURRENT, CASH, DEPRECIATION, INCOME_TAXES_PAID, INCOME_TAXES_PAID_NET,
    LIABILITIES_CURRENT, OPERATING_INCOME,
};
use sagres_data::{EntityHistory, Universe};
use sagres_metrics::fundamentals::income_taxes_paid;
use sagres_metrics::{AccrualDecomposition, AccrualInputs, DECILES, avg2, delta};
use sagres_traits::{FiscalYear, Position, Result, SagresError, SignalMap, Symbol};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::registry::StrategyKind;
use crate::strategy::{Strategy, rank_extremes};

/// Configuration for the accrual anatomy strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccrualsConfig {
    /// How many fiscal years the latest statement may trail the newest one
    /// in the cross-section (default: 1)
    pub max_staleness_years: i32,

    /// Number of cash component buckets (default: 10)
    pub buckets: usize,
}

impl Default for AccrualsConfig {
    fn default() -> Self {
        Self {
            max_staleness_years: 1,
            buckets: DECILES,
        }
    }
}

/// Inputs of a company's latest period.
pub fn latest_inputs(history: &EntityHistory) -> AccrualInputs {
    let last = history.len().saturating_sub(1);
    let at = |series: Vec<Option<f64>>| series.get(last).copied().flatten();
    let now = |field: &str| history.latest().and_then(|p| p.get(field));

    AccrualInputs {
        delta_current_assets: at(delta(&history.series(ASSETS_CURRENT))),
        delta_cash: at(delta(&history.series(CASH))),
        delta_current_liabilities: at(delta(&history.series(LIABILITIES_CURRENT))),
        delta_taxes_paid: at(delta(&history.derive(income_taxes_paid))),
        depreciation: now(DEPRECIATION),
        average_assets: at(avg2(&history.series(ASSETS))),
        operating_income: now(OPERATING_INCOME),
    }
}

/// Accrual anatomy strategy.
///
/// Splits each company's latest operating income over average assets into
/// an accrual and a cash component and ranks the cash component into
/// deciles: Long the bottom decile, Short the top one.
#[derive(Debug, Clone, Default)]
pub struct Accruals {
    config: AccrualsConfig,
}

impl Accruals {
    /// Create a new accrual anatomy strategy with the given configuration.
    #[must_use]
    pub const fn new(config: AccrualsConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &AccrualsConfig {
        &self.config
    }
}

impl Strategy for Accruals {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Accruals
    }

    fn required_columns(&self) -> &[&str] {
        &[
            ASSETS,
            ASSETS_CURRENT,
            CASH,
            LIABILITIES_CURRENT,
            DEPRECIATION,
            OPERATING_INCOME,
        ]
    }

    fn generate(&self, universe: &Universe) -> Result<SignalMap> {
        let statements = universe.statements()?;
        statements.require_columns(self.required_columns())?;
        if !statements.has_column(INCOME_TAXES_PAID) && !statements.has_column(INCOME_TAXES_PAID_NET)
        {
            return Err(SagresError::MissingColumn(INCOME_TAXES_PAID.to_string()));
        }

        let complete: Vec<(Symbol, FiscalYear, AccrualDecomposition)> = statements
            .entities()
            .iter()
            .filter_map(|history| {
                let year = history.latest()?.fiscal_year();
                let parts = AccrualDecomposition::compute(&latest_inputs(history))?;
                Some((history.ticker().to_string(), year, parts))
            })
            .collect();

        let newest = complete.iter().map(|(_, year, _)| *year).max();
        let (symbols, cash): (Vec<Symbol>, Vec<Option<f64>>) = complete
            .into_iter()
            .filter(|(_, year, _)| {
                newest.is_some_and(|n| *year >= n - self.config.max_staleness_years)
            })
            .map(|(symbol, _, parts)| (symbol, Some(parts.cash_component)))
            .unzip();

        let signals = rank_extremes(&symbols, &cash, self.config.buckets, Position::Short)?;
        info!(
            strategy = self.name(),
            eligible = symbols.len(),
            signals = signals.len(),
            "generated signals"
        );
        Ok(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sagres_data::{FinancialStatements, PeriodRecord};

    fn record(year: FiscalYear, scale: f64) -> PeriodRecord {
        PeriodRecord::new(1, year, "ACC")
            .with_field(ASSETS, 200.0 * scale)
            .with_field(ASSETS_CURRENT, 100.0 * scale)
            .with_field(CASH, 20.0 * scale)
            .with_field(LIABILITIES_CURRENT, 50.0 * scale)
            .with_field(INCOME_TAXES_PAID_NET, 5.0 * scale)
            .with_field(DEPRECIATION, 4.0)
            .with_field(OPERATING_INCOME, 30.0)
    }

    #[test]
    fn test_latest_inputs() {
        let store = FinancialStatements::from_records(vec![record(2022, 1.0), record(2023, 1.5)]);
        let inputs = latest_inputs(&store.entities()[0]);
        assert!(inputs.is_complete());
        assert_relative_eq!(inputs.delta_current_assets.unwrap(), 50.0);
        assert_relative_eq!(inputs.delta_cash.unwrap(), 10.0);
        assert_relative_eq!(inputs.delta_current_liabilities.unwrap(), 25.0);
        assert_relative_eq!(inputs.delta_taxes_paid.unwrap(), 2.5);
        assert_relative_eq!(inputs.average_assets.unwrap(), 250.0);

        let parts = AccrualDecomposition::compute(&inputs).unwrap();
        // 50 - 10 - (25 - 2.5) - 4
        assert_relative_eq!(parts.accrual, 13.5);
        assert_relative_eq!(parts.income_rate, 0.12);
        assert_relative_eq!(parts.cash_component, 0.12 - 13.5 / 250.0, epsilon = 1e-12);
    }

    #[test]
    fn test_first_period_is_incomplete() {
        let store = FinancialStatements::from_records(vec![record(2023, 1.0)]);
        assert!(!latest_inputs(&store.entities()[0]).is_complete());
    }

    #[test]
    fn test_missing_tax_columns() {
        let store = FinancialStatements::from_records(vec![PeriodRecord::new(1, 2023, "ACC")
            .with_field(ASSETS, 1.0)
            .with_field(ASSETS_CURRENT, 1.0)
            .with_field(CASH, 1.0)
            .with_field(LIABILITIES_CURRENT, 1.0)
            .with_field(DEPRECIATION, 1.0)
            .with_field(OPERATING_INCOME, 1.0)]);
        let universe = Universe::new().with_statements(store);
        let err = Accruals::default().generate(&universe).unwrap_err();
        assert!(matches!(err, SagresError::MissingColumn(c) if c == INCOME_TAXES_PAID));
    }
}
