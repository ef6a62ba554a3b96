//! Album controller.

use crate::{
    extractors::{parse_id, AuthenticatedUser, Pagination, PaginationQuery, ValidatedJson},
    responses::{created, deleted, ok, updated, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Router,
};
use serde_json::Value;
use shelf_core::{
    domain::{Album, AlbumForm, AlbumSearch, Photo, Song},
    ListResponse,
};
use tracing::debug;

/// Creates the album router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_albums).post(create_album))
        .route("/search", get(search_albums))
        .route("/:id", get(get_album).put(update_album).delete(delete_album))
        .route("/:id/photos", get(list_album_photos))
        .route("/:id/songs", get(list_album_songs))
}

/// List albums.
#[utoipa::path(
    get,
    path = "/api/v1/albums",
    tag = "albums",
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of albums", body = ListResponse<Album>),
        (status = 400, description = "Invalid pagination")
    )
)]
pub async fn list_albums(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Album>> {
    ok(state.albums.list(page).await?)
}

/// Search albums by author.
#[utoipa::path(
    get,
    path = "/api/v1/albums/search",
    tag = "albums",
    params(AlbumSearch),
    responses(
        (status = 200, description = "Matching albums", body = Vec<Album>),
        (status = 400, description = "Missing author")
    )
)]
pub async fn search_albums(
    State(state): State<AppState>,
    Query(query): Query<AlbumSearch>,
) -> ApiResult<Vec<Album>> {
    ok(state.albums.search(&query).await?)
}

/// Get an album by id.
#[utoipa::path(
    get,
    path = "/api/v1/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id")),
    responses(
        (status = 200, description = "Album found", body = Album),
        (status = 404, description = "Album not found")
    )
)]
pub async fn get_album(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Album> {
    let id = parse_id(&id)?;
    ok(state.albums.get(id).await?)
}

/// Create an album.
#[utoipa::path(
    post,
    path = "/api/v1/albums",
    tag = "albums",
    request_body = AlbumForm,
    responses(
        (status = 201, description = "Album created", body = Album),
        (status = 400, description = "Invalid album"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_album(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(form): ValidatedJson<AlbumForm>,
) -> CreatedResult<Album> {
    debug!("Album created by {}", user.username);
    created(state.albums.create(&form).await?)
}

/// Update an album.
#[utoipa::path(
    put,
    path = "/api/v1/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id")),
    request_body = AlbumForm,
    responses(
        (status = 200, description = "Album updated", body = Album),
        (status = 404, description = "Album not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_album(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(form): ValidatedJson<AlbumForm>,
) -> ApiResult<Album> {
    let id = parse_id(&id)?;
    updated(state.albums.update(id, &form).await?)
}

/// Delete an album.
#[utoipa::path(
    delete,
    path = "/api/v1/albums/{id}",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id")),
    responses(
        (status = 200, description = "Album deleted"),
        (status = 404, description = "Album not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_album(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.albums.delete(id).await?;
    deleted(id)
}

/// List the photos of an album.
#[utoipa::path(
    get,
    path = "/api/v1/albums/{id}/photos",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id"), PaginationQuery),
    responses(
        (status = 200, description = "Photos of the album", body = ListResponse<Photo>),
        (status = 404, description = "Album not found")
    )
)]
pub async fn list_album_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Photo>> {
    let id = parse_id(&id)?;
    ok(state.photos.list_by_album(id, page).await?)
}

/// List the songs of an album in track order.
#[utoipa::path(
    get,
    path = "/api/v1/albums/{id}/songs",
    tag = "albums",
    params(("id" = i64, Path, description = "Album id"), PaginationQuery),
    responses(
        (status = 200, description = "Songs of the album", body = ListResponse<Song>),
        (status = 404, description = "Album not found")
    )
)]
pub async fn list_album_songs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Song>> {
    let id = parse_id(&id)?;
    ok(state.songs.list_by_album(id, page).await?)
}
