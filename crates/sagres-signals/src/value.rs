//! Book-to-market universe shared by the F-Score and G-Score strategies.

use std::collections::BTreeSet;

use sagres_data::fields::{SHARES_OUTSTANDING, STOCKHOLDERS_EQUITY};
use sagres_data::{EntityHistory, FinancialStatements, PriceTable};
use sagres_metrics::fundamentals::book_to_market;
use sagres_metrics::quantile_buckets;
use sagres_traits::{EntityId, Result, Symbol};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the book-to-market screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookToMarketConfig {
    /// Minimum number of annual statements per company (default: 3)
    pub min_statements: usize,

    /// How many fiscal years the latest statement may trail the newest one
    /// in the cross-section (default: 1)
    pub max_staleness_years: i32,

    /// Number of book-to-market buckets (default: 5)
    pub buckets: usize,
}

impl Default for BookToMarketConfig {
    fn default() -> Self {
        Self {
            min_statements: 3,
            max_staleness_years: 1,
            buckets: 5,
        }
    }
}

/// A company with a book-to-market ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCandidate {
    /// Entity identifier
    pub entity_id: EntityId,
    /// Ticker of the latest statement
    pub ticker: Symbol,
    /// Stockholders' equity over market capitalization
    pub book_to_market: f64,
}

/// Book-to-market for every company that passes the screen.
///
/// A company qualifies with at least `min_statements` statements, equity
/// and share count on its latest one, a latest fiscal year no more than
/// `max_staleness_years` behind the newest qualifying company, and a price
/// for its ticker on the last row of the price table.
pub fn book_to_market_universe(
    statements: &FinancialStatements,
    prices: &PriceTable,
    config: &BookToMarketConfig,
) -> Vec<ValueCandidate> {
    let filed: Vec<_> = statements
        .entities()
        .iter()
        .filter(|history| history.len() >= config.min_statements)
        .filter_map(EntityHistory::latest)
        .filter(|latest| {
            latest.get(STOCKHOLDERS_EQUITY).is_some() && latest.get(SHARES_OUTSTANDING).is_some()
        })
        .collect();

    let Some(newest) = filed.iter().map(|latest| latest.fiscal_year()).max() else {
        return Vec::new();
    };

    let candidates: Vec<ValueCandidate> = filed
        .into_iter()
        .filter(|latest| latest.fiscal_year() >= newest - config.max_staleness_years)
        .filter_map(|latest| {
            let ratio = book_to_market(
                latest.get(STOCKHOLDERS_EQUITY),
                latest.get(SHARES_OUTSTANDING),
                prices.latest_price(latest.ticker()),
            )?;
            Some(ValueCandidate {
                entity_id: latest.entity_id(),
                ticker: latest.ticker().to_string(),
                book_to_market: ratio,
            })
        })
        .collect();

    debug!(candidates = candidates.len(), "book-to-market universe");
    candidates
}

/// Entities whose book-to-market falls in one bucket of the split.
pub fn select_bucket(
    candidates: &[ValueCandidate],
    buckets: usize,
    bucket: usize,
) -> Result<BTreeSet<EntityId>> {
    let values: Vec<Option<f64>> = candidates.iter().map(|c| Some(c.book_to_market)).collect();
    let assignment = quantile_buckets(&values, buckets)?;
    Ok(candidates
        .iter()
        .zip(assignment)
        .filter(|(_, b)| *b == Some(bucket))
        .map(|(c, _)| c.entity_id)
        .collect())
}
