//! Derived metrics for sagres.
//!
//! This crate turns the raw stores of `sagres-data` into the numbers the
//! strategies rank and score:
//! - [`align`]: per-entity lag, two-period average and delta
//! - [`fundamentals`]: financial statement ratios and the accrual decomposition
//! - [`returns`]: daily and monthly returns, beta and return correlation
//! - [`rank`]: quantile buckets and industry peer medians
//!
//! Every metric is an `Option<f64>`: absent inputs, zero denominators and
//! non-finite results all propagate as `None`.
//!
//! # Example
//!
//! ```rust,ignore
//! use sagres_metrics::{TemporalAligner, quantile_buckets, DECILES};
//!
//! let aligner = TemporalAligner::new(&statements);
//! let beginning_assets = aligner.lag("Assets");
//! let buckets = quantile_buckets(&values, DECILES)?;
//! ```

pub mod align;
pub mod fundamentals;
pub mod rank;
pub mod returns;

pub use align::{
    PeriodKey, PeriodSeries, TemporalAligner, avg2, delta, history_std, lag, pct_change,
};
pub use fundamentals::{AccrualDecomposition, AccrualInputs};
pub use rank::{DECILES, IndustryGroups, MIN_INDUSTRY_PEERS, QUINTILES, quantile_buckets};
pub use returns::{MonthlyCalendar, beta, correlation, daily_returns, trailing_mean_return};
