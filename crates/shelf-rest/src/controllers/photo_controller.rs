//! Photo controller.

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
    domain::{Comment, Photo, PhotoForm},
    ListResponse,
};

/// Creates the photo router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_photos).post(create_photo))
        .route("/:id", get(get_photo).put(update_photo).delete(delete_photo))
        .route("/:id/comments", get(list_photo_comments))
}

/// List photos.
#[utoipa::path(
    get,
    path = "/api/v1/photos",
    tag = "photos",
    params(PaginationQuery),
    responses((status = 200, description = "One page of photos", body = ListResponse<Photo>))
)]
pub async fn list_photos(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Photo>> {
    ok(state.photos.list(page).await?)
}

/// Get a photo by id.
#[utoipa::path(
    get,
    path = "/api/v1/photos/{id}",
    tag = "photos",
    params(("id" = i64, Path, description = "Photo id")),
    responses(
        (status = 200, description = "Photo found", body = Photo),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn get_photo(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Photo> {
    let id = parse_id(&id)?;
    ok(state.photos.get(id).await?)
}

/// Create a photo in an existing album.
#[utoipa::path(
    post,
    path = "/api/v1/photos",
    tag = "photos",
    request_body = PhotoForm,
    responses(
        (status = 201, description = "Photo created", body = Photo),
        (status = 404, description = "Album not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_photo(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(form): ValidatedJson<PhotoForm>,
) -> CreatedResult<Photo> {
    created(state.photos.create(&form).await?)
}

/// Update a photo.
#[utoipa::path(
    put,
    path = "/api/v1/photos/{id}",
    tag = "photos",
    params(("id" = i64, Path, description = "Photo id")),
    request_body = PhotoForm,
    responses(
        (status = 200, description = "Photo updated", body = Photo),
        (status = 404, description = "Photo or album not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_photo(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(form): ValidatedJson<PhotoForm>,
) -> ApiResult<Photo> {
    let id = parse_id(&id)?;
    updated(state.photos.update(id, &form).await?)
}

/// Delete a photo.
#[utoipa::path(
    delete,
    path = "/api/v1/photos/{id}",
    tag = "photos",
    params(("id" = i64, Path, description = "Photo id")),
    responses(
        (status = 200, description = "Photo deleted"),
        (status = 404, description = "Photo not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_photo(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.photos.delete(id).await?;
    deleted(id)
}

/// List the comments on a photo, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/photos/{id}/comments",
    tag = "photos",
    params(("id" = i64, Path, description = "Photo id"), PaginationQuery),
    responses(
        (status = 200, description = "Comments on the photo", body = ListResponse<Comment>),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn list_photo_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Comment>> {
    let id = parse_id(&id)?;
    ok(state.comments.list_by_photo(id, page).await?)
}
