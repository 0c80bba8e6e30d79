//! Orchestration of the requested strategies over one universe.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use sagres_data::Universe;
use sagres_traits::{Result, SignalMap};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::accruals::{Accruals, AccrualsConfig};
use crate::beta::{BetaConfig, BettingAgainstBeta};
use crate::f_score::{FScore, FScoreConfig};
use crate::g_score::{GScore, GScoreConfig};
use crate::momentum::{Momentum, MomentumConfig};
use crate::pairs::{EquityPairs, PairsConfig};
use crate::pead::{Pead, PeadConfig};
use crate::registry::StrategyKind;
use crate::strategy::Strategy;

/// Configuration of every strategy.
///
/// Sections missing from a configuration file fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// F-Score settings
    pub f_score: FScoreConfig,
    /// PEAD settings
    pub pead: PeadConfig,
    /// Momentum settings
    pub momentum: MomentumConfig,
    /// G-Score settings
    pub g_score: GScoreConfig,
    /// Accrual anatomy settings
    pub accruals: AccrualsConfig,
    /// Betting-against-beta settings
    pub beta: BetaConfig,
    /// Equity pairs settings
    pub pairs: PairsConfig,
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        info!(path = %path.display(), "loaded pipeline configuration");
        Ok(config)
    }
}

/// Per-strategy outcome of a pipeline run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    results: BTreeMap<StrategyKind, Result<SignalMap>>,
}

impl PipelineReport {
    /// Outcome of one strategy, `None` if it was not requested.
    pub fn get(&self, kind: StrategyKind) -> Option<&Result<SignalMap>> {
        self.results.get(&kind)
    }

    /// All outcomes in strategy order.
    pub fn iter(&self) -> impl Iterator<Item = (StrategyKind, &Result<SignalMap>)> {
        self.results.iter().map(|(kind, result)| (*kind, result))
    }

    /// Strategies that produced a signal map.
    pub fn succeeded(&self) -> impl Iterator<Item = (StrategyKind, &SignalMap)> {
        self.iter()
            .filter_map(|(kind, result)| result.as_ref().ok().map(|signals| (kind, signals)))
    }

    /// Number of strategies that failed.
    pub fn failure_count(&self) -> usize {
        self.results.values().filter(|r| r.is_err()).count()
    }

    /// Number of strategies run.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no strategy was run.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Take the outcomes.
    pub fn into_results(self) -> BTreeMap<StrategyKind, Result<SignalMap>> {
        self.results
    }
}

/// Runs the requested strategies over a universe.
///
/// Strategies are independent: a failing strategy is reported in the
/// [`PipelineReport`] and does not stop the others.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with the given configuration.
    #[must_use]
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Build a configured strategy.
    pub fn strategy(&self, kind: StrategyKind) -> Box<dyn Strategy> {
        match kind {
            StrategyKind::FScore => Box::new(FScore::new(self.config.f_score.clone())),
            StrategyKind::Pead => Box::new(Pead::new(self.config.pead.clone())),
            StrategyKind::Momentum => Box::new(Momentum::new(self.config.momentum.clone())),
            StrategyKind::GScore => Box::new(GScore::new(self.config.g_score.clone())),
            StrategyKind::Accruals => Box::new(Accruals::new(self.config.accruals.clone())),
            StrategyKind::Beta => Box::new(BettingAgainstBeta::new(self.config.beta.clone())),
            StrategyKind::Pairs => Box::new(EquityPairs::new(self.config.pairs.clone())),
        }
    }

    /// Run the requested strategies. Repeated kinds run once.
    pub fn run(&self, universe: &Universe, kinds: &[StrategyKind]) -> PipelineReport {
        let mut results = BTreeMap::new();
        for kind in kinds {
            if results.contains_key(kind) {
                continue;
            }
            let result = self.strategy(*kind).generate(universe);
            match &result {
                Ok(signals) => info!(strategy = kind.name(), signals = signals.len(), "strategy finished"),
                Err(e) => warn!(strategy = kind.name(), error = %e, "strategy failed"),
            }
            results.insert(*kind, result);
        }
        PipelineReport { results }
    }

    /// Run every strategy.
    pub fn run_all(&self, universe: &Universe) -> PipelineReport {
        self.run(universe, &StrategyKind::ALL)
    }
}
