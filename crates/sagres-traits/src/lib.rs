#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sagres/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the sagres signal pipeline.
//!
//! This crate provides the vocabulary shared by every other sagres crate:
//! the error type, entity and security identifiers, the `Long`/`Short`
//! position a strategy assigns, and the small set of sample statistics the
//! metric and ranking layers are built on.

/// The version of the sagres-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod stats;
pub mod types;

pub use error::{Result, SagresError};
pub use types::{Date, EntityId, FiscalYear, Position, SignalMap, Symbol};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
