//! Mohanram G-Score on low book-to-market companies.

use sagres_data::fields::{
    ASSETS, CAPEX, OPERATING_CASH_FLOW, OPERATING_INCOME, RESEARCH_AND_DEVELOPMENT,
    SELLING_GENERAL_ADMIN, SHARES_OUTSTANDING, STOCKHOLDERS_EQUITY,
};
use sagres_data::{EntityHistory, Universe};
use sagres_metrics::fundamentals::{
    accrual, cash_flow_to_assets, intensity, return_on_assets, revenue,
};
use sagres_metrics::{IndustryGroups, MIN_INDUSTRY_PEERS, avg2, history_std, lag, pct_change};
use sagres_traits::{Result, SignalMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::registry::StrategyKind;
use crate::strategy::{ScoreCard, Strategy, greater, less};
use crate::value::{BookToMarketConfig, book_to_market_universe, select_bucket};

/// Configuration for the G-Score strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GScoreConfig {
    /// Book-to-market screen
    pub value: BookToMarketConfig,

    /// An industry group must have more members than this (default: 4)
    pub min_industry_peers: usize,

    /// Maximum number of the eight metrics that may be absent (default: 3)
    pub max_missing: usize,

    /// Minimum score for a Long signal (default: 6)
    pub long_threshold: u32,

    /// Maximum score for a Short signal (default: 2)
    pub short_threshold: u32,
}

impl Default for GScoreConfig {
    fn default() -> Self {
        Self {
            value: BookToMarketConfig::default(),
            min_industry_peers: MIN_INDUSTRY_PEERS,
            max_missing: 3,
            long_threshold: 6,
            short_threshold: 2,
        }
    }
}

/// The eight G-Score metrics of a company's latest period.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GScoreMetrics {
    /// Operating income over average assets
    pub return_on_assets: Option<f64>,
    /// Operating cash flow over average assets
    pub cash_flow: Option<f64>,
    /// Return on assets minus cash flow ratio
    pub accrual: Option<f64>,
    /// Standard deviation of return on assets over the history
    pub return_on_assets_std: Option<f64>,
    /// Standard deviation of sales growth over the history
    pub sales_growth_std: Option<f64>,
    /// R&D over beginning assets
    pub research_intensity: Option<f64>,
    /// Capital expenditure over beginning assets
    pub capex_intensity: Option<f64>,
    /// SG&A over beginning assets
    pub sga_intensity: Option<f64>,
}

impl GScoreMetrics {
    /// Compute the metrics for the latest period of a history.
    pub fn from_history(history: &EntityHistory) -> Self {
        let assets = history.series(ASSETS);
        let beginning = lag(&assets);
        let average = avg2(&assets);
        let periods = history.periods();

        let roa: Vec<Option<f64>> = periods
            .iter()
            .zip(&average)
            .map(|(p, a)| return_on_assets(p.get(OPERATING_INCOME), *a))
            .collect();
        let growth = pct_change(&history.derive(revenue));

        let last = periods.len().saturating_sub(1);
        let now = |field: &str| history.latest().and_then(|p| p.get(field));
        let roa_now = roa.get(last).copied().flatten();
        let cfo_now = cash_flow_to_assets(
            now(OPERATING_CASH_FLOW),
            average.get(last).copied().flatten(),
        );
        let begin_now = beginning.get(last).copied().flatten();

        Self {
            return_on_assets: roa_now,
            cash_flow: cfo_now,
            accrual: accrual(roa_now, cfo_now),
            return_on_assets_std: history_std(&roa),
            sales_growth_std: history_std(&growth),
            research_intensity: intensity(now(RESEARCH_AND_DEVELOPMENT), begin_now),
            capex_intensity: intensity(now(CAPEX), begin_now),
            sga_intensity: intensity(now(SELLING_GENERAL_ADMIN), begin_now),
        }
    }

    /// The metrics in scoring order.
    pub const fn values(&self) -> [Option<f64>; 8] {
        [
            self.return_on_assets,
            self.cash_flow,
            self.accrual,
            self.return_on_assets_std,
            self.sales_growth_std,
            self.research_intensity,
            self.capex_intensity,
            self.sga_intensity,
        ]
    }
}

/// Industry medians of the metrics compared against peers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndustryMedians {
    /// Median return on assets
    pub return_on_assets: Option<f64>,
    /// Median cash flow ratio
    pub cash_flow: Option<f64>,
    /// Median return on assets variability
    pub return_on_assets_std: Option<f64>,
    /// Median sales growth variability
    pub sales_growth_std: Option<f64>,
    /// Median R&D intensity
    pub research_intensity: Option<f64>,
    /// Median capex intensity
    pub capex_intensity: Option<f64>,
    /// Median SG&A intensity
    pub sga_intensity: Option<f64>,
}

/// Score the eight industry-relative tests.
pub fn score(metrics: &GScoreMetrics, medians: &IndustryMedians) -> ScoreCard {
    let outcomes = [
        greater(metrics.return_on_assets, medians.return_on_assets),
        greater(metrics.cash_flow, medians.cash_flow),
        greater(metrics.cash_flow, metrics.return_on_assets),
        less(metrics.return_on_assets_std, medians.return_on_assets_std),
        less(metrics.sales_growth_std, medians.sales_growth_std),
        greater(metrics.research_intensity, medians.research_intensity),
        greater(metrics.capex_intensity, medians.capex_intensity),
        greater(metrics.sga_intensity, medians.sga_intensity),
    ];
    ScoreCard::tally(&outcomes, &metrics.values())
}

/// Mohanram G-Score strategy.
///
/// Restricts the universe to the bottom book-to-market quintile, groups it
/// by two-digit industry code, and scores each company's profitability,
/// earnings variability and spending intensity against its industry median.
#[derive(Debug, Clone, Default)]
pub struct GScore {
    config: GScoreConfig,
}

impl GScore {
    /// Create a new G-Score strategy with the given configuration.
    #[must_use]
    pub const fn new(config: GScoreConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &GScoreConfig {
        &self.config
    }
}

impl Strategy for GScore {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GScore
    }

    fn required_columns(&self) -> &[&str] {
        &[
            ASSETS,
            OPERATING_INCOME,
            OPERATING_CASH_FLOW,
            STOCKHOLDERS_EQUITY,
            SHARES_OUTSTANDING,
        ]
    }

    fn generate(&self, universe: &Universe) -> Result<SignalMap> {
        let statements = universe.statements()?;
        let prices = universe.prices()?;
        statements.require_columns(self.required_columns())?;

        let candidates = book_to_market_universe(statements, prices, &self.config.value);
        let selected = select_bucket(&candidates, self.config.value.buckets, 0)?;
        let histories: Vec<&EntityHistory> =
            selected.iter().filter_map(|id| statements.entity(*id)).collect();

        let codes: Vec<Option<u32>> = histories.iter().map(|h| h.industry_code()).collect();
        let groups = IndustryGroups::new(&codes, self.config.min_industry_peers);
        let metrics: Vec<GScoreMetrics> =
            histories.iter().map(|h| GScoreMetrics::from_history(h)).collect();

        let column = |f: fn(&GScoreMetrics) -> Option<f64>| {
            groups.medians(&metrics.iter().map(f).collect::<Vec<_>>())
        };
        let roa = column(|m| m.return_on_assets);
        let cfo = column(|m| m.cash_flow);
        let roa_std = column(|m| m.return_on_assets_std);
        let growth_std = column(|m| m.sales_growth_std);
        let research = column(|m| m.research_intensity);
        let capex = column(|m| m.capex_intensity);
        let sga = column(|m| m.sga_intensity);

        let mut signals = SignalMap::new();
        for (i, history) in histories.iter().enumerate() {
            if !groups.is_member(i) {
                continue;
            }
            let medians = IndustryMedians {
                return_on_assets: roa[i],
                cash_flow: cfo[i],
                return_on_assets_std: roa_std[i],
                sales_growth_std: growth_std[i],
                research_intensity: research[i],
                capex_intensity: capex[i],
                sga_intensity: sga[i],
            };
            let card = score(&metrics[i], &medians);
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
            eligible = groups.member_count(),
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
    use sagres_data::fields::REVENUES;
    use sagres_data::{FinancialStatements, PeriodRecord};
    use sagres_traits::Position;

    fn history() -> EntityHistory {
        let store = FinancialStatements::from_records(vec![
            PeriodRecord::new(1, 2021, "GRW")
                .with_field(ASSETS, 100.0)
                .with_field(OPERATING_INCOME, 10.0)
                .with_field(REVENUES, 100.0),
            PeriodRecord::new(1, 2022, "GRW")
                .with_field(ASSETS, 140.0)
                .with_field(OPERATING_INCOME, 12.0)
                .with_field(REVENUES, 120.0),
            PeriodRecord::new(1, 2023, "GRW")
                .with_field(ASSETS, 160.0)
                .with_field(OPERATING_INCOME, 15.0)
                .with_field(OPERATING_CASH_FLOW, 30.0)
                .with_field(REVENUES, 180.0)
                .with_field(RESEARCH_AND_DEVELOPMENT, 14.0)
                .with_field(CAPEX, 7.0),
        ]);
        store.entities()[0].clone()
    }

    #[test]
    fn test_metrics_from_history() {
        let m = GScoreMetrics::from_history(&history());
        // RoA: 10/100, 12/120, 15/150
        assert_relative_eq!(m.return_on_assets.unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(m.return_on_assets_std.unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(m.cash_flow.unwrap(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(m.accrual.unwrap(), -0.1, epsilon = 1e-12);
        // Sales growth 0.2 and 0.5
        assert_relative_eq!(m.sales_growth_std.unwrap(), 0.3 / 2f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m.research_intensity.unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(m.capex_intensity.unwrap(), 0.05, epsilon = 1e-12);
        assert_eq!(m.sga_intensity, None);
    }

    #[test]
    fn test_score_against_medians() {
        let metrics = GScoreMetrics {
            return_on_assets: Some(0.1),
            cash_flow: Some(0.2),
            accrual: Some(-0.1),
            return_on_assets_std: Some(0.01),
            sales_growth_std: Some(0.1),
            research_intensity: Some(0.1),
            capex_intensity: Some(0.05),
            sga_intensity: None,
        };
        let medians = IndustryMedians {
            return_on_assets: Some(0.05),
            cash_flow: Some(0.1),
            return_on_assets_std: Some(0.02),
            sales_growth_std: Some(0.2),
            research_intensity: Some(0.05),
            capex_intensity: Some(0.01),
            sga_intensity: Some(0.2),
        };
        let card = score(&metrics, &medians);
        assert_eq!(card.score, 7);
        assert_eq!(card.missing, 1);
        assert_eq!(card.classify(6, 2), Some(Position::Long));
    }

    #[test]
    fn test_default_config() {
        let config = GScoreConfig::default();
        assert_eq!(config.min_industry_peers, 4);
        assert_eq!(config.max_missing, 3);
        assert_eq!(config.long_threshold, 6);
        assert_eq!(config.short_threshold, 2);
    }
}
