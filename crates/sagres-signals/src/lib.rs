//! Anomaly strategies for the sagres signal pipeline.
//!
//! This crate provides seven independent strategies, each turning the
//! universe of financial statements and prices into Long/Short signals:
//! - Fundamental scores: Piotroski F-Score on value stocks, Mohanram
//!   G-Score on growth stocks
//! - Earnings: post-earnings announcement drift, accrual anatomy
//! - Prices: momentum, betting against beta, equity pairs
//!
//! The [`Pipeline`] runs any subset of them and reports each outcome
//! separately.
//!
//! # Example
//!
//! ```ignore
//! use sagres_signals::{Pipeline, PipelineConfig, StrategyKind};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let report = pipeline.run(&universe, &[StrategyKind::FScore, StrategyKind::Momentum]);
//! for (kind, signals) in report.succeeded() {
//!     println!("{kind}: {} signals", signals.len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod accruals;
pub mod beta;
pub mod f_score;
pub mod g_score;
pub mod momentum;
pub mod pairs;
pub mod pead;
pub mod pipeline;
pub mod registry;
pub mod strategy;
pub mod value;

// Re-export key types
pub use accruals::{Accruals, AccrualsConfig};
pub use beta::{BetaConfig, BettingAgainstBeta};
pub use f_score::{FScore, FScoreConfig};
pub use g_score::{GScore, GScoreConfig};
pub use momentum::{Momentum, MomentumConfig};
pub use pairs::{EquityPairs, PairsConfig};
pub use pead::{Pead, PeadConfig};
pub use pipeline::{Pipeline, PipelineConfig, PipelineReport};
pub use registry::{StrategyCategory, StrategyInfo, StrategyKind};
pub use strategy::{ScoreCard, Strategy};
pub use value::BookToMarketConfig;
