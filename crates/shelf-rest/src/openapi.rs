//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use shelf_core::{
    domain::{
        Album, AlbumForm, Book, BookForm, Comment, CommentForm, Credentials, FileRecord, Pet,
        Photo, PhotoForm, Song, SongForm, Team, TeamForm,
    },
    FieldError,
};
use shelf_service::{AccessTokenResponse, LoginResponse, RefreshTokenRequest, UserResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the Shelf API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelf API",
        version = "1.0.0",
        description = "CRUD API for albums, books, photos, songs, teams, pets, comments and files",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::album_controller::list_albums,
        crate::controllers::album_controller::search_albums,
        crate::controllers::album_controller::get_album,
        crate::controllers::album_controller::create_album,
        crate::controllers::album_controller::update_album,
        crate::controllers::album_controller::delete_album,
        crate::controllers::album_controller::list_album_photos,
        crate::controllers::album_controller::list_album_songs,
        crate::controllers::book_controller::list_books,
        crate::controllers::book_controller::search_books,
        crate::controllers::book_controller::get_book,
        crate::controllers::book_controller::create_book,
        crate::controllers::book_controller::update_book,
        crate::controllers::book_controller::delete_book,
        crate::controllers::photo_controller::list_photos,
        crate::controllers::photo_controller::get_photo,
        crate::controllers::photo_controller::create_photo,
        crate::controllers::photo_controller::update_photo,
        crate::controllers::photo_controller::delete_photo,
        crate::controllers::photo_controller::list_photo_comments,
        crate::controllers::song_controller::list_songs,
        crate::controllers::song_controller::get_song,
        crate::controllers::song_controller::create_song,
        crate::controllers::song_controller::update_song,
        crate::controllers::song_controller::delete_song,
        crate::controllers::team_controller::list_teams,
        crate::controllers::team_controller::get_team,
        crate::controllers::team_controller::create_team,
        crate::controllers::team_controller::update_team,
        crate::controllers::team_controller::delete_team,
        crate::controllers::pet_controller::list_pets,
        crate::controllers::pet_controller::get_pet,
        crate::controllers::comment_controller::list_comments,
        crate::controllers::comment_controller::get_comment,
        crate::controllers::comment_controller::create_comment,
        crate::controllers::comment_controller::update_comment,
        crate::controllers::comment_controller::delete_comment,
        crate::controllers::file_controller::list_files,
        crate::controllers::file_controller::get_file,
        crate::controllers::file_controller::upload_file,
        crate::controllers::file_controller::delete_file,
        crate::controllers::auth_controller::register,
        crate::controllers::auth_controller::login,
        crate::controllers::auth_controller::refresh_token,
        crate::controllers::auth_controller::get_current_user,
        crate::controllers::health_controller::health_check,
    ),
    components(
        schemas(
            FieldError,
            Album, AlbumForm,
            Book, BookForm,
            Photo, PhotoForm,
            Song, SongForm,
            Team, TeamForm,
            Comment, CommentForm,
            Pet,
            FileRecord,
            Credentials,
            RefreshTokenRequest,
            LoginResponse,
            AccessTokenResponse,
            UserResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "albums", description = "Albums with their photos and songs"),
        (name = "books", description = "Book catalogue"),
        (name = "photos", description = "Photos and their comments"),
        (name = "songs", description = "Album tracks"),
        (name = "teams", description = "Teams"),
        (name = "pets", description = "Read-only pet listing"),
        (name = "comments", description = "Photo comments"),
        (name = "files", description = "Image uploads"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Security addon for JWT Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token authentication"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes_and_security() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/albums/{id}/songs"));
        assert!(doc.paths.paths.contains_key("/api/v1/files"));
        assert!(doc.paths.paths.contains_key("/health"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
