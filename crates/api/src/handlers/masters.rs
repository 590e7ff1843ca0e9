use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use toycraft_catalog::usecases::{RegisterMasterInput, UpdateMasterInput};
use toycraft_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::BearerToken;
use crate::query::{MasterQueryParams, PaginationParams, ToyQueryParams};
use crate::response::{CountResponse, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Masters
// ---------------------------------------------------------------------------

/// GET /api/v1/masters
pub async fn list_masters(
    State(state): State<AppState>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<MasterQueryParams>,
) -> AppResult<impl IntoResponse> {
    let masters = state
        .catalog
        .get_masters(Some(&page.to_pagination()), Some(&params.to_filters()))
        .await?;

    Ok(Json(DataResponse { data: masters }))
}

/// POST /api/v1/masters
///
/// Registers the caller as a master. A user can own only one.
pub async fn register_master(
    token: BearerToken,
    State(state): State<AppState>,
    Json(input): Json<RegisterMasterInput>,
) -> AppResult<impl IntoResponse> {
    let master_id = state.catalog.register_master(token.as_str(), input).await?;
    let master = state.catalog.get_master(master_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: master })))
}

/// PUT /api/v1/masters/me
pub async fn update_own_master(
    token: BearerToken,
    State(state): State<AppState>,
    Json(input): Json<UpdateMasterInput>,
) -> AppResult<impl IntoResponse> {
    state.catalog.update_master(token.as_str(), input).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/masters/{id}
pub async fn get_master(
    State(state): State<AppState>,
    Path(master_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let master = state.catalog.get_master(master_id).await?;

    Ok(Json(DataResponse { data: master }))
}

/// GET /api/v1/masters/{id}/toys
pub async fn list_master_toys(
    State(state): State<AppState>,
    Path(master_id): Path<DbId>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<ToyQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.to_filters()?;
    let toys = state
        .catalog
        .get_master_toys(master_id, Some(&page.to_pagination()), Some(&filters))
        .await?;

    Ok(Json(DataResponse { data: toys }))
}

/// GET /api/v1/masters/{id}/toys/count
pub async fn count_master_toys(
    State(state): State<AppState>,
    Path(master_id): Path<DbId>,
    Query(params): Query<ToyQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.to_filters()?;
    let total = state
        .catalog
        .count_master_toys(master_id, Some(&filters))
        .await?;

    Ok(Json(DataResponse {
        data: CountResponse { total },
    }))
}

// ---------------------------------------------------------------------------
// User-scoped lookups
// ---------------------------------------------------------------------------

/// GET /api/v1/users/{user_id}/master
pub async fn get_user_master(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let master = state.catalog.get_master_by_user(user_id).await?;

    Ok(Json(DataResponse { data: master }))
}

/// GET /api/v1/users/{user_id}/toys
pub async fn list_user_toys(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Query(page): Query<PaginationParams>,
    Query(params): Query<ToyQueryParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.to_filters()?;
    let toys = state
        .catalog
        .get_user_toys(user_id, Some(&page.to_pagination()), Some(&filters))
        .await?;

    Ok(Json(DataResponse { data: toys }))
}
