use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use toycraft_core::types::DbId;

use crate::error::AppResult;
use crate::response::{DataResponse, IdsResponse};
use crate::state::AppState;

/// Body of `POST /api/v1/tags`.
#[derive(Debug, Deserialize)]
pub struct CreateTagsRequest {
    pub names: Vec<String>,
}

/// GET /api/v1/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tags = state.catalog.get_tags().await?;

    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tag = state.catalog.get_tag(tag_id).await?;

    Ok(Json(DataResponse { data: tag }))
}

/// POST /api/v1/tags
///
/// Creates the names not yet known (case-insensitively) and returns one id
/// per distinct name.
pub async fn create_tags(
    State(state): State<AppState>,
    Json(input): Json<CreateTagsRequest>,
) -> AppResult<impl IntoResponse> {
    let ids = state.catalog.create_tags(&input.names).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: IdsResponse { ids },
        }),
    ))
}
