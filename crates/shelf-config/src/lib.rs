//! # Shelf Config
//!
//! Layered configuration for the Shelf API: TOML files under `config/`,
//! overridden by `SHELF_`-prefixed environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
