//! Piotroski F-Score on high book-to-market companies.

use sagres_data::fields::{
    ASSETS, ASSETS_CURRENT, LIABILITIES_CURRENT, OPERATING_CASH_FLOW, OPERATING_INCOME,
    SHARES_OUTSTANDING, STOCKHOLDERS_EQUITY,
};
use sagres_data::{EntityHistory, Universe};
use sagres_metrics::fundamentals::{
    accrual, cash_flow_to_assets, current_ratio, gross_margin, leverage, noncurrent_liabilities,
    return_on_assets, revenue, turnover,
};
use sagres_metrics::{avg2, delta, lag};
use sagres_traits::{Result, SignalMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::registry::StrategyKind;
use crate::strategy::{ScoreCard, Strategy, greater, less};
use crate::value::{BookToMarketConfig, book_to_market_universe, select_bucket};

/// Configuration for the F-Score strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FScoreConfig {
    /// Book-to-market screen
    pub value: BookToMarketConfig,

    /// Maximum number of the nine metrics that may be absent (default: 4)
    pub max_missing: usize,

    /// Minimum score for a Long signal (default: 7)
    pub long_threshold: u32,

    /// Maximum score for a Short signal (default: 2)
    pub short_threshold: u32,
}

impl Default for FScoreConfig {
    fn default() -> Self {
        Self {
            value: BookToMarketConfig::default(),
            max_missing: 4,
            long_threshold: 7,
            short_threshold: 2,
        }
    }
}

/// The nine F-Score metrics of a company's latest period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FScoreMetrics {
    /// Operating income over beginning assets
    pub return_on_assets: Option<f64>,
    /// Operating cash flow over beginning assets
    pub cash_flow: Option<f64>,
    /// Change in return on assets
    pub delta_return_on_assets: Option<f64>,
    /// Return on assets minus cash flow ratio
    pub accrual: Option<f64>,
    /// Change in non-current liabilities over average assets
    pub delta_leverage: Option<f64>,
    /// Change in current ratio
    pub delta_liquidity: Option<f64>,
    /// Change in weighted average shares outstanding
    pub delta_shares: Option<f64>,
    /// Change in gross margin
    pub delta_gross_margin: Option<f64>,
    /// Change in asset turnover
    pub delta_turnover: Option<f64>,
}

impl FScoreMetrics {
    /// Compute the metrics for the latest period of a history.
    pub fn from_history(history: &EntityHistory) -> Self {
        let assets = history.series(ASSETS);
        let beginning = lag(&assets);
        let average = avg2(&assets);
        let periods = history.periods();

        let roa: Vec<Option<f64>> = periods
            .iter()
            .zip(&beginning)
            .map(|(p, b)| return_on_assets(p.get(OPERATING_INCOME), *b))
            .collect();
        let cfo: Vec<Option<f64>> = periods
            .iter()
            .zip(&beginning)
            .map(|(p, b)| cash_flow_to_assets(p.get(OPERATING_CASH_FLOW), *b))
            .collect();
        let lev: Vec<Option<f64>> = periods
            .iter()
            .zip(&average)
            .map(|(p, a)| leverage(noncurrent_liabilities(p), *a))
            .collect();
        let turn: Vec<Option<f64>> = periods
            .iter()
            .zip(&beginning)
            .map(|(p, b)| turnover(revenue(p), *b))
            .collect();

        let last = periods.len().saturating_sub(1);
        let at = |series: Vec<Option<f64>>| series.get(last).copied().flatten();

        Self {
            return_on_assets: roa.get(last).copied().flatten(),
            cash_flow: cfo.get(last).copied().flatten(),
            delta_return_on_assets: at(delta(&roa)),
            accrual: accrual(
                roa.get(last).copied().flatten(),
                cfo.get(last).copied().flatten(),
            ),
            delta_leverage: at(delta(&lev)),
            delta_liquidity: at(delta(&history.derive(current_ratio))),
            delta_shares: at(delta(&history.series(SHARES_OUTSTANDING))),
            delta_gross_margin: at(delta(&history.derive(gross_margin))),
            delta_turnover: at(delta(&turn)),
        }
    }

    /// The metrics in scoring order.
    pub const fn values(&self) -> [Option<f64>; 9] {
        [
            self.return_on_assets,
            self.cash_flow,
            self.delta_return_on_assets,
            self.accrual,
            self.delta_leverage,
            self.delta_liquidity,
            self.delta_shares,
            self.delta_gross_margin,
            self.delta_turnover,
        ]
    }

    /// Score the nine binary tests.
    pub fn score(&self) -> ScoreCard {
        let outcomes = [
            greater(self.return_on_assets, Some(0.0)),
            greater(self.cash_flow, Some(0.0)),
            greater(self.delta_return_on_assets, Some(0.0)),
            less(self.accrual, Some(0.0)),
            less(self.delta_leverage, Some(0.0)),
            greater(self.delta_liquidity, Some(0.0)),
            self.delta_shares.map(|d| d <= 0.0),
            greater(self.delta_gross_margin, Some(0.0)),
            greater(self.delta_turnover, Some(0.0)),
        ];
        ScoreCard::tally(&outcomes, &self.values())
    }
}

/// Piotroski F-Score strategy.
///
/// Restricts the universe to the top book-to-market quintile, scores nine
/// binary tests of profitability, capital structure and efficiency on each
/// company's latest statement, and goes Long high scores and Short low
/// scores.
#[derive(Debug, Clone, Default)]
pub struct FScore {
    config: FScoreConfig,
}

impl FScore {
    /// Create a new F-Score strategy with the given configuration.
    #[must_use]
    pub const fn new(config: FScoreConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &FScoreConfig {
        &self.config
    }
}

impl Strategy for FScore {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FScore
    }

    fn required_columns(&self) -> &[&str] {
        &[
            ASSETS,
            OPERATING_INCOME,
            OPERATING_CASH_FLOW,
            STOCKHOLDERS_EQUITY,
            SHARES_OUTSTANDING,
            ASSETS_CURRENT,
            LIABILITIES_CURRENT,
        ]
    }

    fn generate(&self, universe: &Universe) -> Result<SignalMap> {
        let statements = universe.statements()?;
        let prices = universe.prices()?;
        statements.require_columns(self.required_columns())?;

        let candidates = book_to_market_universe(statements, prices, &self.config.value);
        let top = self.config.value.buckets.saturating_sub(1);
        let selected = select_bucket(&candidates, self.config.value.buckets, top)?;

        let mut signals = SignalMap::new();
        for id in &selected {
            let Some(history) = statements.entity(*id) else {
                continue;
            };
            let card = FScoreMetrics::from_history(history).score();
            if card.missing > self.config.max_missing {
                debug!(ticker = history.ticker(), missing = card.missing, "too many missing metrics");
                continue;
            }
            if let Some(position) =
                card.classify(self.config.long_threshold, self.config.short_threshold)
            {
                signals.insert(history.ticker().to_string(), position);
            }
        }

        info!(
            strategy = self.name(),
            eligible = selected.len(),
            signals = signals.len(),
            "generated signals"
        );
        Ok(signals)
    }
}
