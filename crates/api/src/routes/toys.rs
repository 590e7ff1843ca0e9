use axum::routing::get;
use axum::Router;

use crate::handlers::toys;
use crate::state::AppState;

/// Toy routes mounted at `/toys`.
///
/// ```text
/// GET    /          -> list_toys
/// POST   /          -> create_toy (bearer token)
/// GET    /count     -> count_toys
/// GET    /{id}      -> get_toy
/// PUT    /{id}      -> update_toy (bearer token)
/// DELETE /{id}      -> delete_toy (bearer token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(toys::list_toys).post(toys::create_toy))
        .route("/count", get(toys::count_toys))
        .route(
            "/{id}",
            get(toys::get_toy)
                .put(toys::update_toy)
                .delete(toys::delete_toy),
        )
}
