//! Book controller.

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
    domain::{Book, BookForm, BookSearch},
    ListResponse,
};

/// Creates the book router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/search", get(search_books))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = "books",
    params(PaginationQuery),
    responses((status = 200, description = "One page of books", body = ListResponse<Book>))
)]
pub async fn list_books(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Book>> {
    ok(state.books.list(page).await?)
}

/// Books matching any of the author, title or isbn filters.
#[utoipa::path(
    get,
    path = "/api/v1/books/search",
    tag = "books",
    params(BookSearch),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>),
        (status = 400, description = "No filter given")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<BookSearch>,
) -> ApiResult<Vec<Book>> {
    ok(state.books.search(&query).await?)
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Book> {
    let id = parse_id(&id)?;
    ok(state.books.get(id).await?)
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = "books",
    request_body = BookForm,
    responses((status = 201, description = "Book created", body = Book)),
    security(("bearer_auth" = []))
)]
pub async fn create_book(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(form): ValidatedJson<BookForm>,
) -> CreatedResult<Book> {
    created(state.books.create(&form).await?)
}

#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = BookForm,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_book(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(form): ValidatedJson<BookForm>,
) -> ApiResult<Book> {
    let id = parse_id(&id)?;
    updated(state.books.update(id, &form).await?)
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_book(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.books.delete(id).await?;
    deleted(id)
}
