//! # Shelf Core
//!
//! Core types shared by every layer of the Shelf API: the error taxonomy,
//! business codes, pagination, validation helpers and the domain entities
//! (albums, books, photos, songs, teams, pets, comments, users, files).

pub mod biz_code;
pub mod domain;
pub mod error;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod validation;

pub use biz_code::*;
pub use error::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
