//! Temporal alignment of per-entity series.
//!
//! All operations work on one entity's periods in fiscal-year order, so a
//! lag never reaches into another company's history. The slice functions
//! operate on any per-period series (a raw field or a derived metric); the
//! [`TemporalAligner`] applies them to every entity of a store and keys the
//! result by `(entity_id, fiscal_year)`.
//!
//! The lag of a period is the entity's previous retained period, whatever
//! its fiscal year: a company that skipped a year is compared with its last
//! filing.

use std::collections::BTreeMap;
use std::iter;

use sagres_data::FinancialStatements;
use sagres_traits::{EntityId, FiscalYear, stats};

/// Key of a derived value: entity and fiscal year.
pub type PeriodKey = (EntityId, FiscalYear);

/// A derived series over the whole store.
pub type PeriodSeries = BTreeMap<PeriodKey, Option<f64>>;

/// Value of the previous period; `None` for the first.
pub fn lag(series: &[Option<f64>]) -> Vec<Option<f64>> {
    iter::once(None)
        .chain(series.iter().copied())
        .take(series.len())
        .collect()
}

/// Mean of the current and previous value, falling back to the current
/// value when there is no previous one.
pub fn avg2(series: &[Option<f64>]) -> Vec<Option<f64>> {
    series
        .iter()
        .zip(lag(series))
        .map(|(current, previous)| match (*current, previous) {
            (Some(c), Some(p)) => Some((c + p) / 2.0),
            (Some(c), None) => Some(c),
            (None, _) => None,
        })
        .collect()
}

/// Current minus previous value.
pub fn delta(series: &[Option<f64>]) -> Vec<Option<f64>> {
    series
        .iter()
        .zip(lag(series))
        .map(|(current, previous)| Some((*current)? - previous?))
        .collect()
}

/// Relative change against the previous value; `None` when the previous
/// value is zero.
pub fn pct_change(series: &[Option<f64>]) -> Vec<Option<f64>> {
    series
        .iter()
        .zip(lag(series))
        .map(|(current, previous)| {
            let previous = previous.filter(|p| *p != 0.0)?;
            Some((*current)? / previous - 1.0)
        })
        .collect()
}

/// Sample standard deviation over every present value of a history.
pub fn history_std(series: &[Option<f64>]) -> Option<f64> {
    stats::sample_std(&stats::present(series))
}

/// Applies the alignment operations to every entity of a store.
#[derive(Debug, Clone, Copy)]
pub struct TemporalAligner<'a> {
    statements: &'a FinancialStatements,
}

impl<'a> TemporalAligner<'a> {
    /// Create an aligner over a store.
    pub const fn new(statements: &'a FinancialStatements) -> Self {
        Self { statements }
    }

    /// The raw field values.
    pub fn field(&self, field: &str) -> PeriodSeries {
        self.apply(field, <[Option<f64>]>::to_vec)
    }

    /// [`lag`] of a field for every entity.
    pub fn lag(&self, field: &str) -> PeriodSeries {
        self.apply(field, lag)
    }

    /// [`avg2`] of a field for every entity.
    pub fn avg2(&self, field: &str) -> PeriodSeries {
        self.apply(field, avg2)
    }

    /// [`delta`] of a field for every entity.
    pub fn delta(&self, field: &str) -> PeriodSeries {
        self.apply(field, delta)
    }

    fn apply<F>(&self, field: &str, op: F) -> PeriodSeries
    where
        F: Fn(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        let mut out = PeriodSeries::new();
        for history in self.statements.entities() {
            let values = op(&history.series(field));
            for (year, value) in history.fiscal_years().into_iter().zip(values) {
                out.insert((history.entity_id(), year), value);
            }
        }
        out
    }
}
