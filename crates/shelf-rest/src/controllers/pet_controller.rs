//! Pet controller (read-only).

use crate::{
    extractors::{parse_id, Pagination, PaginationQuery},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use shelf_core::{domain::Pet, ListResponse};

/// Creates the pet router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pets))
        .route("/:id", get(get_pet))
}

#[utoipa::path(
    get,
    path = "/api/v1/pets",
    tag = "pets",
    params(PaginationQuery),
    responses((status = 200, description = "One page of pets", body = ListResponse<Pet>))
)]
pub async fn list_pets(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Pet>> {
    ok(state.pets.list(page).await?)
}

#[utoipa::path(
    get,
    path = "/api/v1/pets/{id}",
    tag = "pets",
    params(("id" = i64, Path, description = "Pet id")),
    responses(
        (status = 200, description = "Pet found", body = Pet),
        (status = 404, description = "Pet not found")
    )
)]
pub async fn get_pet(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Pet> {
    let id = parse_id(&id)?;
    ok(state.pets.get(id).await?)
}
