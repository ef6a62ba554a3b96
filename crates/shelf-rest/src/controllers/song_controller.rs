//! Song controller.

use crate::{
    extractors::{parse_id, AuthenticatedUser, Pagination, PaginationQuery, ValidatedJson},
    responses::{created, deleted, ok, updated, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde_json::Value;
use shelf_core::{
    domain::{Song, SongForm},
    ListResponse,
};

/// Creates the song router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_songs).post(create_song))
        .route("/:id", get(get_song).put(update_song).delete(delete_song))
}

#[utoipa::path(
    get,
    path = "/api/v1/songs",
    tag = "songs",
    params(PaginationQuery),
    responses((status = 200, description = "One page of songs", body = ListResponse<Song>))
)]
pub async fn list_songs(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Song>> {
    ok(state.songs.list(page).await?)
}

#[utoipa::path(
    get,
    path = "/api/v1/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song id")),
    responses(
        (status = 200, description = "Song found", body = Song),
        (status = 404, description = "Song not found")
    )
)]
pub async fn get_song(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Song> {
    let id = parse_id(&id)?;
    ok(state.songs.get(id).await?)
}

#[utoipa::path(
    post,
    path = "/api/v1/songs",
    tag = "songs",
    request_body = SongForm,
    responses(
        (status = 201, description = "Song created", body = Song),
        (status = 404, description = "Album not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_song(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(form): ValidatedJson<SongForm>,
) -> CreatedResult<Song> {
    created(state.songs.create(&form).await?)
}

#[utoipa::path(
    put,
    path = "/api/v1/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song id")),
    request_body = SongForm,
    responses(
        (status = 200, description = "Song updated", body = Song),
        (status = 404, description = "Song or album not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_song(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(form): ValidatedJson<SongForm>,
) -> ApiResult<Song> {
    let id = parse_id(&id)?;
    updated(state.songs.update(id, &form).await?)
}

#[utoipa::path(
    delete,
    path = "/api/v1/songs/{id}",
    tag = "songs",
    params(("id" = i64, Path, description = "Song id")),
    responses(
        (status = 200, description = "Song deleted"),
        (status = 404, description = "Song not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_song(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.songs.delete(id).await?;
    deleted(id)
}
