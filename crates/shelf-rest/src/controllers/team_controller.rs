//! Team controller.
//!
//! Plain CRUD with a cached list.

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
    domain::{Team, TeamForm},
    ListResponse,
};

/// Creates the team router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/:id", get(get_team).put(update_team).delete(delete_team))
}

#[utoipa::path(
    get,
    path = "/api/v1/teams",
    tag = "teams",
    params(PaginationQuery),
    responses((status = 200, description = "One page of teams", body = ListResponse<Team>))
)]
pub async fn list_teams(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ListResponse<Team>> {
    ok(state.teams.list(page).await?)
}

#[utoipa::path(
    get,
    path = "/api/v1/teams/{id}",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id")),
    responses(
        (status = 200, description = "Team found", body = Team),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Team> {
    let id = parse_id(&id)?;
    ok(state.teams.get(id).await?)
}

#[utoipa::path(
    post,
    path = "/api/v1/teams",
    tag = "teams",
    request_body = TeamForm,
    responses(
        (status = 201, description = "Team created", body = Team),
        (status = 400, description = "Invalid team")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_team(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    ValidatedJson(form): ValidatedJson<TeamForm>,
) -> CreatedResult<Team> {
    created(state.teams.create(&form).await?)
}

#[utoipa::path(
    put,
    path = "/api/v1/teams/{id}",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id")),
    request_body = TeamForm,
    responses(
        (status = 200, description = "Team updated", body = Team),
        (status = 404, description = "Team not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_team(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(form): ValidatedJson<TeamForm>,
) -> ApiResult<Team> {
    let id = parse_id(&id)?;
    updated(state.teams.update(id, &form).await?)
}

#[utoipa::path(
    delete,
    path = "/api/v1/teams/{id}",
    tag = "teams",
    params(("id" = i64, Path, description = "Team id")),
    responses(
        (status = 200, description = "Team deleted"),
        (status = 404, description = "Team not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_team(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let id = parse_id(&id)?;
    state.teams.delete(id).await?;
    deleted(id)
}
