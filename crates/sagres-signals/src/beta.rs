//! Betting against beta.

use sagres_data::Universe;
use sagres_metrics::returns::{beta, daily_returns, reindex};
use sagres_traits::{Date, Position, Result, SignalMap, Symbol, stats};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::registry::StrategyKind;
use crate::strategy::Strategy;

/// Symbol of the Wilshire 5000 total market index.
pub const DEFAULT_MARKET_SYMBOL: &str = "^W5000";

/// Configuration for the betting-against-beta strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BetaConfig {
    /// First day of market returns used for the estimate (default: 2015-01-01)
    pub start_date: Date,

    /// Column holding the market index when it arrives inside the price
    /// table (default: `^W5000`)
    pub market_symbol: String,

    /// Minimum number of days with both a stock and a market return
    /// (default: 60)
    pub min_observations: usize,
}

impl Default for BetaConfig {
    fn default() -> Self {
        Self {
            start_date: Date::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            market_symbol: DEFAULT_MARKET_SYMBOL.to_string(),
            min_observations: 60,
        }
    }
}

/// Betting-against-beta strategy.
///
/// Estimates every tradeable stock's beta against the market index from
/// daily returns since the start date and splits the cross-section at the
/// median: Long below it, Short at or above it.
#[derive(Debug, Clone, Default)]
pub struct BettingAgainstBeta {
    config: BetaConfig,
}

impl BettingAgainstBeta {
    /// Create a new betting-against-beta strategy with the given configuration.
    #[must_use]
    pub const fn new(config: BetaConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &BetaConfig {
        &self.config
    }

    /// Beta of every tradeable security, in column order.
    pub fn betas(&self, universe: &Universe) -> Result<Vec<(Symbol, Option<f64>)>> {
        let prices = universe.prices()?;
        let market = universe.benchmark()?.since(self.config.start_date);
        if market.is_empty() {
            warn!(start = %self.config.start_date, "no market prices after the start date");
        }

        let market_returns = reindex(market.dates(), &daily_returns(market.prices()), prices.dates());
        Ok(prices
            .tradeable()
            .map(|(symbol, series)| {
                let estimate = beta(
                    &daily_returns(series),
                    &market_returns,
                    self.config.min_observations,
                );
                (symbol.clone(), estimate)
            })
            .collect())
    }
}

impl Strategy for BettingAgainstBeta {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Beta
    }

    fn required_columns(&self) -> &[&str] {
        &[]
    }

    fn generate(&self, universe: &Universe) -> Result<SignalMap> {
        let betas = self.betas(universe)?;
        let estimated: Vec<f64> = betas.iter().filter_map(|(_, b)| *b).collect();

        let mut signals = SignalMap::new();
        if let Some(median) = stats::median(&estimated) {
            for (symbol, value) in betas {
                let Some(value) = value else { continue };
                let position = if value < median {
                    Position::Long
                } else {
                    Position::Short
                };
                signals.insert(symbol, position);
            }
        }

        info!(
            strategy = self.name(),
            eligible = estimated.len(),
            signals = signals.len(),
            "generated signals"
        );
        Ok(signals)
    }
}
