use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use toycraft_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.catalog.get_categories().await?;

    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = state.catalog.get_category(category_id).await?;

    Ok(Json(DataResponse { data: category }))
}
