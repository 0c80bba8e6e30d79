//! Price-based return series and the statistics built on them.

use chrono::Datelike;
use sagres_traits::Date;
use sagres_traits::stats::{self, MIN_STD_THRESHOLD};

/// Simple daily returns over forward-filled prices.
///
/// A gap inherits the last observed price, so the day after a gap carries
/// the whole move. Rows before the first price have no return.
pub fn daily_returns(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut filled: Vec<Option<f64>> = Vec::with_capacity(prices.len());
    let mut last = None;
    for price in prices {
        if let Some(p) = price.filter(|p| p.is_finite()) {
            last = Some(p);
        }
        filled.push(last);
    }

    let mut out = Vec::with_capacity(prices.len());
    for (i, current) in filled.iter().enumerate() {
        let previous = i.checked_sub(1).and_then(|j| filled[j]);
        let value = match (*current, previous) {
            (Some(c), Some(p)) if p != 0.0 => Some(c / p - 1.0).filter(|r| r.is_finite()),
            _ => None,
        };
        out.push(value);
    }
    out
}

/// Values of a dated series re-indexed onto other dates.
///
/// Both date slices must be ascending. Target dates absent from the source
/// read back as `None`.
pub fn reindex(source_dates: &[Date], values: &[Option<f64>], target_dates: &[Date]) -> Vec<Option<f64>> {
    target_dates
        .iter()
        .map(|date| {
            source_dates
                .binary_search(date)
                .ok()
                .and_then(|idx| values.get(idx).copied().flatten())
        })
        .collect()
}

/// Mapping of trading days onto calendar months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyCalendar {
    months: Vec<(i32, u32)>,
    month_of_row: Vec<usize>,
}

impl MonthlyCalendar {
    /// Group ascending trading days by `(year, month)`.
    pub fn new(dates: &[Date]) -> Self {
        let mut months: Vec<(i32, u32)> = Vec::new();
        let mut month_of_row = Vec::with_capacity(dates.len());
        for date in dates {
            let key = (date.year(), date.month());
            if months.last() != Some(&key) {
                months.push(key);
            }
            month_of_row.push(months.len() - 1);
        }
        Self {
            months,
            month_of_row,
        }
    }

    /// The calendar months covered, oldest first.
    pub fn months(&self) -> &[(i32, u32)] {
        &self.months
    }

    /// Number of months.
    pub fn len(&self) -> usize {
        self.months.len()
    }

    /// Whether there are no months.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Compound daily returns into one return per month.
    ///
    /// A month without any daily return has no monthly return.
    pub fn compound(&self, daily: &[Option<f64>]) -> Vec<Option<f64>> {
        let mut growth: Vec<Option<f64>> = vec![None; self.months.len()];
        for (row, ret) in daily.iter().enumerate() {
            let (Some(ret), Some(&month)) = (ret, self.month_of_row.get(row)) else {
                continue;
            };
            let slot = &mut growth[month];
            *slot = Some(slot.unwrap_or(1.0) * (1.0 + ret));
        }
        growth.into_iter().map(|g| g.map(|g| g - 1.0)).collect()
    }
}

/// Mean monthly return over a lookback window that skips the latest month.
///
/// The window is the last `lookback` months with the most recent one
/// dropped. Every month of the window must have a return.
pub fn trailing_mean_return(monthly: &[Option<f64>], lookback: usize) -> Option<f64> {
    if lookback < 2 || monthly.len() < lookback {
        return None;
    }
    let window = &monthly[monthly.len() - lookback..monthly.len() - 1];
    let values: Option<Vec<f64>> = window.iter().copied().collect();
    stats::mean(&values?)
}

/// Beta of an asset against the market.
///
/// Covariance over dates where both returns are present, divided by the
/// variance of the market over those same dates. Needs `min_observations`
/// such dates and a market that moves.
pub fn beta(asset: &[Option<f64>], market: &[Option<f64>], min_observations: usize) -> Option<f64> {
    let (a, m) = stats::complete_pairs(asset, market);
    if a.len() < min_observations.max(2) {
        return None;
    }
    let covariance = stats::sample_covariance(&a, &m)?;
    let variance = stats::sample_variance(m.as_slice()?)?;
    if variance < MIN_STD_THRESHOLD * MIN_STD_THRESHOLD {
        return None;
    }
    Some(covariance / variance)
}

/// Pearson correlation over pairwise-complete observations.
pub fn correlation(a: &[Option<f64>], b: &[Option<f64>], min_observations: usize) -> Option<f64> {
    let (x, y) = stats::complete_pairs(a, b);
    if x.len() < min_observations.max(2) {
        return None;
    }
    stats::pearson_correlation(&x, &y)
}
