//! Comment controller.
//!
//! The flat comment list is cached; per-photo listings live on the photo routes.

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
    domain::{Comment, CommentForm},
    ListResponse,
};

/// Creates the comment router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route("/:id", get(get_comment).put(update_comment).delete(delete_comment))
}

#[utoipa::path(
    get,
    path = "/api/v1/comments",
    tag = "comments",
    params(PaginationQuery),
    responses((status = 200, description = "One page of comments", body = ListResponse<Comment>))
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Comment>> {
    ok(state.comments.list(page).await?)
}

#[utoipa::path(
    get,
    path = "/api/v1/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment found", body = Comment),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn get_comment(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Comment> {
    let id = parse_id(&id)?;
    ok(state.comments.get(id).await?)
}

#[utoipa::path(
    post,
    path = "/api/v1/comments",
    tag = "comments",
    request_body = CommentForm,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 404, description = "Photo not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(form): ValidatedJson<CommentForm>,
) -> CreatedResult<Comment> {
    created(state.comments.create(&form).await?)
}

#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment id")),
    request_body = CommentForm,
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 404, description = "Comment or photo not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_comment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(form): ValidatedJson<CommentForm>,
) -> ApiResult<Comment> {
    let id = parse_id(&id)?;
    updated(state.comments.update(id, &form).await?)
}

#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    tag = "comments",
    params(("id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.comments.delete(id).await?;
    deleted(id)
}
