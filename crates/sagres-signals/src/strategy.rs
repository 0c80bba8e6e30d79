//! The strategy abstraction and the classification rules strategies share.

use sagres_data::Universe;
use sagres_metrics::quantile_buckets;
use sagres_traits::{Position, Result, SignalMap, Symbol};
use tracing::debug;

use crate::registry::StrategyKind;

/// A trading strategy that maps the universe to Long/Short signals.
///
/// Strategies are stateless and only read the universe, so they are
/// `Send + Sync` and can be evaluated in any order.
pub trait Strategy: Send + Sync {
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Canonical name, used for logging and output file names.
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Statement columns that must exist for the strategy to run.
    fn required_columns(&self) -> &[&str];

    /// Compute the signal map.
    ///
    /// # Errors
    ///
    /// Fails when a required input table or column is missing or the
    /// ranked cross-section is degenerate. Companies with missing data are
    /// left out of the map instead.
    fn generate(&self, universe: &Universe) -> Result<SignalMap>;
}

/// Outcome of a composite binary score for one company.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    /// Number of sub-scores that hold.
    pub score: u32,
    /// Number of underlying metrics that were absent.
    pub missing: usize,
}

impl ScoreCard {
    /// Build a card from sub-score outcomes and the metrics behind them.
    ///
    /// A sub-score counts only if its outcome is `Some(true)`; an absent
    /// outcome scores zero.
    pub fn tally(outcomes: &[Option<bool>], metrics: &[Option<f64>]) -> Self {
        Self {
            score: outcomes.iter().map(|o| u32::from(o.unwrap_or(false))).sum(),
            missing: metrics.iter().filter(|m| m.is_none()).count(),
        }
    }

    /// Long at or above `long_min`, Short at or below `short_max`.
    #[must_use]
    pub const fn classify(&self, long_min: u32, short_max: u32) -> Option<Position> {
        if self.score >= long_min {
            Some(Position::Long)
        } else if self.score <= short_max {
            Some(Position::Short)
        } else {
            None
        }
    }
}

/// `a > b`, absent if either side is.
pub(crate) fn greater(a: Option<f64>, b: Option<f64>) -> Option<bool> {
    Some(a? > b?)
}

/// `a < b`, absent if either side is.
pub(crate) fn less(a: Option<f64>, b: Option<f64>) -> Option<bool> {
    Some(a? < b?)
}

/// Position for the extreme buckets of a split: `top` for the highest
/// bucket and its opposite for the lowest.
pub const fn extreme_position(bucket: usize, buckets: usize, top: Position) -> Option<Position> {
    if bucket + 1 == buckets {
        Some(top)
    } else if bucket == 0 {
        Some(top.opposite())
    } else {
        None
    }
}

/// Rank a cross-section into `buckets` and keep the two extremes.
///
/// `top` is the position taken in the highest bucket. When two entries
/// share a symbol, the first one wins.
pub(crate) fn rank_extremes(
    symbols: &[Symbol],
    values: &[Option<f64>],
    buckets: usize,
    top: Position,
) -> Result<SignalMap> {
    let assignment = quantile_buckets(values, buckets)?;
    let mut signals = SignalMap::new();
    for (symbol, bucket) in symbols.iter().zip(assignment) {
        let Some(position) = bucket.and_then(|b| extreme_position(b, buckets, top)) else {
            continue;
        };
        if signals.contains_key(symbol) {
            debug!(symbol = %symbol, "symbol ranked twice; keeping the first");
            continue;
        }
        signals.insert(symbol.clone(), position);
    }
    Ok(signals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(9, Some(Position::Long))]
    #[case(7, Some(Position::Long))]
    #[case(4, None)]
    #[case(2, Some(Position::Short))]
    #[case(0, Some(Position::Short))]
    fn test_score_classification(#[case] score: u32, #[case] expected: Option<Position>) {
        let card = ScoreCard { score, missing: 0 };
        assert_eq!(card.classify(7, 2), expected);
    }

    #[test]
    fn test_tally_counts_absent_as_zero() {
        let outcomes = [Some(true), None, Some(false), Some(true)];
        let metrics = [Some(1.0), None, Some(0.0), None];
        let card = ScoreCard::tally(&outcomes, &metrics);
        assert_eq!(card.score, 2);
        assert_eq!(card.missing, 2);
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(greater(Some(2.0), Some(1.0)), Some(true));
        assert_eq!(less(Some(2.0), Some(1.0)), Some(false));
        assert_eq!(greater(None, Some(1.0)), None);
    }

    #[test]
    fn test_extreme_position() {
        assert_eq!(extreme_position(9, 10, Position::Long), Some(Position::Long));
        assert_eq!(extreme_position(0, 10, Position::Long), Some(Position::Short));
        assert_eq!(extreme_position(5, 10, Position::Long), None);
        assert_eq!(extreme_position(0, 10, Position::Short), Some(Position::Long));
    }

    #[test]
    fn test_rank_extremes() {
        let symbols: Vec<Symbol> = (0..10).map(|i| format!("S{i}")).collect();
        let mut values: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        values[4] = None;
        let symbols = [symbols, vec!["EXTRA".to_string()]].concat();
        values.push(Some(100.0));

        let signals = rank_extremes(&symbols, &values, 10, Position::Long).unwrap();
        assert_eq!(signals.get("EXTRA"), Some(&Position::Long));
        assert_eq!(signals.get("S0"), Some(&Position::Short));
        assert_eq!(signals.len(), 2);
    }
}
