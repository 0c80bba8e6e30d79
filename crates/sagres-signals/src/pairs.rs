//! Equity pairs: last month's return against highly correlated peers.

use sagres_data::{PriceTable, Universe};
use sagres_metrics::{DECILES, MonthlyCalendar, correlation, daily_returns};
use sagres_traits::{Position, Result, SignalMap, Symbol, stats};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::registry::StrategyKind;
use crate::strategy::{Strategy, rank_extremes};

/// Configuration for the equity pairs strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PairsConfig {
    /// Number of most correlated peers forming the expectation (default: 50)
    pub peers: usize,

    /// Minimum number of monthly returns for a security to take part, and
    /// of overlapping months for a correlation (default: 12)
    pub min_months: usize,

    /// Number of return-gap buckets (default: 10)
    pub buckets: usize,
}

impl Default for PairsConfig {
    fn default() -> Self {
        Self {
            peers: 50,
            min_months: 12,
            buckets: DECILES,
        }
    }
}

/// Equity pairs strategy.
///
/// Finds each security's most correlated peers from monthly returns,
/// compares its return in the last full month with the peers' mean, and
/// trades the reversal: Long the decile that lagged its peers most, Short
/// the decile that led them most.
#[derive(Debug, Clone, Default)]
pub struct EquityPairs {
    config: PairsConfig,
}

impl EquityPairs {
    /// Create a new equity pairs strategy with the given configuration.
    #[must_use]
    pub const fn new(config: PairsConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PairsConfig {
        &self.config
    }

    /// Return gap against peers for every eligible security, in column order.
    ///
    /// The latest month is usually incomplete, so the gap is measured in
    /// the month before it; correlations use every month.
    pub fn return_gaps(&self, prices: &PriceTable) -> Vec<(Symbol, Option<f64>)> {
        let calendar = MonthlyCalendar::new(prices.dates());
        if calendar.len() < 2 {
            return Vec::new();
        }
        let last_full = calendar.len() - 2;

        let monthly: Vec<(&Symbol, Vec<Option<f64>>)> = prices
            .tradeable()
            .map(|(symbol, series)| (symbol, calendar.compound(&daily_returns(series))))
            .filter(|(_, returns)| returns.iter().flatten().count() >= self.config.min_months)
            .collect();
        debug!(securities = monthly.len(), "pairs cross-section");

        monthly
            .iter()
            .enumerate()
            .map(|(i, (symbol, own))| {
                let mut peers: Vec<(usize, f64)> = monthly
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .filter_map(|(j, (_, other))| {
                        correlation(own, other, self.config.min_months).map(|c| (j, c))
                    })
                    .collect();
                peers.sort_by(|a, b| b.1.total_cmp(&a.1));
                peers.truncate(self.config.peers);

                let peer_returns: Vec<f64> = peers
                    .iter()
                    .filter_map(|(j, _)| monthly[*j].1[last_full])
                    .collect();
                let gap = own[last_full]
                    .zip(stats::mean(&peer_returns))
                    .map(|(actual, expected)| actual - expected);
                ((*symbol).clone(), gap)
            })
            .collect()
    }
}

impl Strategy for EquityPairs {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pairs
    }

    fn required_columns(&self) -> &[&str] {
        &[]
    }

    fn generate(&self, universe: &Universe) -> Result<SignalMap> {
        let prices = universe.prices()?;
        let (symbols, gaps): (Vec<Symbol>, Vec<Option<f64>>) =
            self.return_gaps(prices).into_iter().unzip();

        let signals = rank_extremes(&symbols, &gaps, self.config.buckets, Position::Short)?;
        info!(
            strategy = self.name(),
            eligible = gaps.iter().flatten().count(),
            signals = signals.len(),
            "generated signals"
        );
        Ok(signals)
    }
}
