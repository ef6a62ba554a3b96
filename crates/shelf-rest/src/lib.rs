//! # Shelf REST
//!
//! HTTP surface of the Shelf API: the axum router, the response envelope,
//! extractors, middleware and one controller per resource.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
