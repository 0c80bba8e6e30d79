//! Common types used throughout sagres.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::SagresError;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A security identifier, the trading symbol (e.g. "AAPL").
pub type Symbol = String;

/// Stable numeric identifier of a reporting company (the SEC `cik`).
pub type EntityId = u64;

/// Fiscal year of a period record.
pub type FiscalYear = i32;

/// The side a strategy assigns to a security.
///
/// Securities that are neither long nor short are simply absent from a
/// [`SignalMap`].
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Position {
    /// Buy the security.
    #[display("Long")]
    Long,
    /// Sell the security short.
    #[display("Short")]
    Short,
}

impl Position {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Long => Self::Short,
            Self::Short => Self::Long,
        }
    }

    /// Returns the label used in signal tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "Long",
            Self::Short => "Short",
        }
    }
}

impl FromStr for Position {
    type Err = SagresError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            other => Err(SagresError::InvalidData(format!(
                "Unknown position '{other}'"
            ))),
        }
    }
}

/// Output of a strategy: security identifier to position.
///
/// An ordered map so that repeated runs over the same inputs render
/// identically.
pub type SignalMap = BTreeMap<Symbol, Position>;
