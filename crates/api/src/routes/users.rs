use axum::routing::get;
use axum::Router;

use crate::handlers::masters;
use crate::state::AppState;

/// User-scoped lookups mounted at `/users`.
///
/// ```text
/// GET    /{user_id}/master  -> get_user_master
/// GET    /{user_id}/toys    -> list_user_toys
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{user_id}/master", get(masters::get_user_master))
        .route("/{user_id}/toys", get(masters::list_user_toys))
}
