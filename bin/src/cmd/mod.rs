//! CLI subcommand modules.
//!
//! This module contains the implementations for all sagres CLI subcommands.

pub(crate) mod describe;
pub(crate) mod run;
pub(crate) mod strategies;
