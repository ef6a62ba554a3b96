//! REST API controllers.

pub mod album_controller;
pub mod auth_controller;
pub mod book_controller;
pub mod comment_controller;
pub mod file_controller;
pub mod health_controller;
pub mod pet_controller;
pub mod photo_controller;
pub mod song_controller;
pub mod team_controller;

pub use health_controller::HealthResponse;
