//! # Shelf Repository
//!
//! Data access for the Shelf API. Store traits live in [`traits`]; the
//! MySQL implementations in [`mysql`]. With the `memory` feature an
//! in-memory implementation is available for tests of the upper layers.

pub mod mysql;
mod pool;
pub mod traits;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

pub use mysql::{MySqlStore, MySqlUserRepository};
pub use pool::*;
pub use traits::*;
