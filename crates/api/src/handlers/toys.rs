use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use toycraft_catalog::usecases::{AddToyInput, UpdateToyInput};
use toycraft_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::BearerToken;
use crate::query::{PaginationParams, ToyQueryParams};
use crate::response::{CountResponse, DataResponse};
use crate::state::AppState;

/// GET /api/v1/toys
pub async fn list_toys(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<ToyQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.to_filters()?;
    let toys = state
        .catalog
        .get_toys(Some(&page.to_pagination()), Some(&filters))
        .await?;

    Ok(Json(DataResponse { data: toys }))
}

/// GET /api/v1/toys/count
pub async fn count_toys(
    State(state): State<AppState>,
    Query(params): Query<ToyQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.to_filters()?;
    let total = state.catalog.count_toys(Some(&filters)).await?;

    Ok(Json(DataResponse {
        data: CountResponse { total },
    }))
}

/// GET /api/v1/toys/{id}
pub async fn get_toy(
    State(state): State<AppState>,
    Path(toy_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let toy = state.catalog.get_toy(toy_id).await?;

    Ok(Json(DataResponse { data: toy }))
}

/// POST /api/v1/toys
///
/// Adds a toy owned by the caller's master and returns the stored aggregate.
pub async fn create_toy(
    token: BearerToken,
    State(state): State<AppState>,
    Json(input): Json<AddToyInput>,
) -> AppResult<impl IntoResponse> {
    let toy_id = state.catalog.add_toy(token.as_str(), input).await?;
    let toy = state.catalog.get_toy(toy_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: toy })))
}

/// PUT /api/v1/toys/{id}
///
/// Requires a valid bearer token. `tag_ids` and `attachments` replace the
/// toy's collections when present.
pub async fn update_toy(
    token: BearerToken,
    State(state): State<AppState>,
    Path(toy_id): Path<DbId>,
    Json(mut input): Json<UpdateToyInput>,
) -> AppResult<impl IntoResponse> {
    let user_id = state.catalog.authenticate(token.as_str()).await?;
    tracing::debug!(user_id, toy_id, "Toy update requested");
    input.id = toy_id;
    state.catalog.update_toy(input).await?;
    let toy = state.catalog.get_toy(toy_id).await?;

    Ok(Json(DataResponse { data: toy }))
}

/// DELETE /api/v1/toys/{id}
///
/// Requires a valid bearer token.
pub async fn delete_toy(
    token: BearerToken,
    State(state): State<AppState>,
    Path(toy_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user_id = state.catalog.authenticate(token.as_str()).await?;
    tracing::debug!(user_id, toy_id, "Toy delete requested");
    state.catalog.delete_toy(toy_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
