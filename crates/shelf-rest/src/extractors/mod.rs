//! Custom Axum extractors.

mod current_user;
mod pagination;
mod path_id;
mod validated;

pub use current_user::*;
pub use pagination::*;
pub use path_id::*;
pub use validated::*;
