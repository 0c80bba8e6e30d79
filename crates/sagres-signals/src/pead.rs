//! Post-earnings announcement drift.

use sagres_data::fields::EPS_BASIC;
use sagres_data::{EntityHistory, Universe};
use sagres_metrics::DECILES;
use sagres_metrics::fundamentals::standardized_unexpected_earnings;
use sagres_traits::{Position, Result, SignalMap, Symbol, stats};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::registry::StrategyKind;
use crate::strategy::{Strategy, rank_extremes};

/// Configuration for the PEAD strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PeadConfig {
    /// Minimum number of statements reporting EPS (default: 3)
    pub min_statements: usize,

    /// Number of prior EPS values forming the expectation (default: 4)
    pub trailing_periods: usize,

    /// Number of SUE buckets (default: 10)
    pub buckets: usize,
}

impl Default for PeadConfig {
    fn default() -> Self {
        Self {
            min_statements: 3,
            trailing_periods: 4,
            buckets: DECILES,
        }
    }
}

/// Post-earnings announcement drift strategy.
///
/// Standardizes each company's latest annual EPS against the mean and
/// sample standard deviation of up to four prior reported values, ranks the
/// surprise into deciles and goes Long the best news, Short the worst.
#[derive(Debug, Clone, Default)]
pub struct Pead {
    config: PeadConfig,
}

impl Pead {
    /// Create a new PEAD strategy with the given configuration.
    #[must_use]
    pub const fn new(config: PeadConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PeadConfig {
        &self.config
    }

    /// Standardized unexpected earnings of a company's latest report.
    ///
    /// Periods without EPS are skipped. `None` when fewer than
    /// `min_statements` periods report EPS or the trailing values do not
    /// vary.
    pub fn surprise(&self, history: &EntityHistory) -> Option<f64> {
        let eps = stats::present(&history.series(EPS_BASIC));
        if eps.len() < self.config.min_statements.max(2) {
            return None;
        }
        let (current, prior) = eps.split_last()?;
        let start = prior.len().saturating_sub(self.config.trailing_periods);
        standardized_unexpected_earnings(*current, &prior[start..])
    }
}

impl Strategy for Pead {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pead
    }

    fn required_columns(&self) -> &[&str] {
        &[EPS_BASIC]
    }

    fn generate(&self, universe: &Universe) -> Result<SignalMap> {
        let statements = universe.statements()?;
        statements.require_columns(self.required_columns())?;

        let (symbols, surprises): (Vec<Symbol>, Vec<Option<f64>>) = statements
            .entities()
            .iter()
            .filter_map(|history| {
                self.surprise(history)
                    .map(|sue| (history.ticker().to_string(), Some(sue)))
            })
            .unzip();

        let signals = rank_extremes(&symbols, &surprises, self.config.buckets, Position::Long)?;
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

    fn history(eps: &[Option<f64>]) -> EntityHistory {
        let records = eps.iter().enumerate().map(|(i, value)| {
            let mut rec = PeriodRecord::new(1, 2015 + i as i32, "AAA");
            rec.set(EPS_BASIC, *value);
            rec
        });
        FinancialStatements::from_records(records).entities()[0].clone()
    }

    #[test]
    fn test_surprise() {
        let pead = Pead::default();
        let sue = pead
            .surprise(&history(&[Some(1.0), Some(1.2), Some(0.9), Some(1.1), Some(1.4)]))
            .unwrap();
        assert_relative_eq!(sue, 2.711_088_342_345_192, epsilon = 1e-9);
    }

    #[test]
    fn test_surprise_uses_last_four_reported() {
        let pead = Pead::default();
        let sue = pead
            .surprise(&history(&[
                Some(50.0),
                Some(1.0),
                None,
                Some(1.2),
                Some(0.9),
                Some(1.1),
                Some(1.4),
            ]))
            .unwrap();
        assert_relative_eq!(sue, 2.711_088_342_345_192, epsilon = 1e-9);
    }

    #[test]
    fn test_surprise_needs_history_and_dispersion() {
        let pead = Pead::default();
        assert!(pead.surprise(&history(&[Some(1.0), Some(1.4)])).is_none());
        assert!(pead.surprise(&history(&[Some(1.0), None, Some(1.4)])).is_none());
        assert!(pead.surprise(&history(&[Some(1.0), Some(1.0), Some(1.0), Some(1.4)])).is_none());
        // Three statements leave two trailing values, enough for a sample std.
        assert!(pead.surprise(&history(&[Some(1.0), Some(1.2), Some(1.4)])).is_some());
    }

    #[test]
    fn test_missing_eps_column() {
        let statements =
            FinancialStatements::from_records(vec![PeriodRecord::new(1, 2020, "AAA").with_field("Assets", 1.0)]);
        let universe = Universe::new().with_statements(statements);
        let err = Pead::default().generate(&universe).unwrap_err();
        assert!(matches!(err, sagres_traits::SagresError::MissingColumn(c) if c == EPS_BASIC));
    }
}
