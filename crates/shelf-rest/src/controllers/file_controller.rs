//! File upload controller.

use crate::{
    extractors::{parse_id, AuthenticatedUser, Pagination, PaginationQuery},
    responses::{created, deleted, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde_json::Value;
use shelf_core::{domain::FileRecord, ListResponse, ShelfError};
use tracing::debug;

/// Multipart field carrying the upload.
const FILE_FIELD: &str = "file";

/// Creates the file router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_files).post(upload_file))
        .route("/:id", get(get_file).delete(delete_file))
}

fn multipart_error(err: MultipartError) -> ShelfError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ShelfError::PayloadTooLarge(err.body_text())
    } else {
        ShelfError::validation(err.body_text())
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/files",
    tag = "files",
    params(PaginationQuery),
    responses((status = 200, description = "One page of uploaded files", body = ListResponse<FileRecord>))
)]
pub async fn list_files(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<FileRecord>> {
    ok(state.files.list(page).await?)
}

#[utoipa::path(
    get,
    path = "/api/v1/files/{id}",
    tag = "files",
    params(("id" = i64, Path, description = "File id")),
    responses(
        (status = 200, description = "File found", body = FileRecord),
        (status = 404, description = "File not found")
    )
)]
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FileRecord> {
    let id = parse_id(&id)?;
    ok(state.files.get(id).await?)
}

/// Upload an image in the multipart field `file`.
#[utoipa::path(
    post,
    path = "/api/v1/files",
    tag = "files",
    request_body(content_type = "multipart/form-data", description = "Image in the `file` field"),
    responses(
        (status = 201, description = "File stored", body = FileRecord),
        (status = 413, description = "File too large"),
        (status = 415, description = "Not a supported image")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> CreatedResult<FileRecord> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(ToString::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        debug!(user = %user.username, size = bytes.len(), "Upload received");

        return created(state.files.upload(file_name.as_deref(), &bytes).await?);
    }

    Err(AppError(ShelfError::validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    ))))
}

/// Delete a file and its stored object.
#[utoipa::path(
    delete,
    path = "/api/v1/files/{id}",
    tag = "files",
    params(("id" = i64, Path, description = "File id")),
    responses(
        (status = 200, description = "File deleted"),
        (status = 404, description = "File not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_file(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.files.delete(id).await?;
    deleted(id)
}
