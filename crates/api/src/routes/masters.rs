use axum::routing::{get, put};
use axum::Router;

use crate::handlers::masters;
use crate::state::AppState;

/// Master routes mounted at `/masters`.
///
/// ```text
/// GET    /                  -> list_masters
/// POST   /                  -> register_master
/// PUT    /me                -> update_own_master
/// GET    /{id}              -> get_master
/// GET    /{id}/toys         -> list_master_toys
/// GET    /{id}/toys/count   -> count_master_toys
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(masters::list_masters).post(masters::register_master),
        )
        .route("/me", put(masters::update_own_master))
        .route("/{id}", get(masters::get_master))
        .route("/{id}/toys", get(masters::list_master_toys))
        .route("/{id}/toys/count", get(masters::count_master_toys))
}
