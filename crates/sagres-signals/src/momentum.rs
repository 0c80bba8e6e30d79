//! Intermediate-horizon price momentum.

use sagres_data::{PriceTable, Universe};
use sagres_metrics::{DECILES, MonthlyCalendar, daily_returns, trailing_mean_return};
use sagres_traits::{Position, Result, SignalMap, Symbol};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::registry::StrategyKind;
use crate::strategy::{Strategy, rank_extremes};

/// Configuration for the momentum strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Number of calendar months in the window, including the skipped
    /// latest month (default: 12)
    pub lookback_months: usize,

    /// Number of return buckets (default: 10)
    pub buckets: usize,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            lookback_months: 12,
            buckets: DECILES,
        }
    }
}

/// Momentum strategy.
///
/// Compounds daily returns into calendar-month returns, averages the last
/// `lookback_months` months without the most recent one, and goes Long the
/// top decile of winners and Short the bottom decile of losers.
#[derive(Debug, Clone, Default)]
pub struct Momentum {
    config: MomentumConfig,
}

impl Momentum {
    /// Create a new momentum strategy with the given configuration.
    #[must_use]
    pub const fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    /// Get the lookback in months.
    #[must_use]
    pub const fn lookback_months(&self) -> usize {
        self.config.lookback_months
    }

    /// Trailing mean monthly return of every tradeable security, in column
    /// order.
    pub fn trailing_returns(&self, prices: &PriceTable) -> Vec<(Symbol, Option<f64>)> {
        let calendar = MonthlyCalendar::new(prices.dates());
        prices
            .tradeable()
            .map(|(symbol, series)| {
                let monthly = calendar.compound(&daily_returns(series));
                (
                    symbol.clone(),
                    trailing_mean_return(&monthly, self.config.lookback_months),
                )
            })
            .collect()
    }
}

impl Strategy for Momentum {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Momentum
    }

    fn required_columns(&self) -> &[&str] {
        &[]
    }

    fn generate(&self, universe: &Universe) -> Result<SignalMap> {
        let prices = universe.prices()?;
        let (symbols, averages): (Vec<Symbol>, Vec<Option<f64>>) =
            self.trailing_returns(prices).into_iter().unzip();

        let signals = rank_extremes(&symbols, &averages, self.config.buckets, Position::Long)?;
        info!(
            strategy = self.name(),
            eligible = averages.iter().flatten().count(),
            signals = signals.len(),
            "generated signals"
        );
        Ok(signals)
    }
}
