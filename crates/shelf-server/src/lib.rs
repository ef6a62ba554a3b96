//! # Shelf Server Library
//!
//! Dependency wiring, logging setup and startup output for the Shelf API
//! binary.

pub mod di;
pub mod logging;
pub mod startup;
