pub mod categories;
pub mod health;
pub mod masters;
pub mod tags;
pub mod toys;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /toys                               list, add (bearer token)
/// /toys/count                         count
/// /toys/{id}                          get, update and delete (bearer token)
///
/// /masters                            list, register (bearer token)
/// /masters/me                         update own master (bearer token)
/// /masters/{id}                       get (with toys)
/// /masters/{id}/toys                  list master toys
/// /masters/{id}/toys/count            count master toys
///
/// /users/{user_id}/master             master owned by a user (with toys)
/// /users/{user_id}/toys               toys of the user's master
///
/// /tags                               list, bulk create
/// /tags/{id}                          get
///
/// /categories                         list
/// /categories/{id}                    get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/toys", toys::router())
        .nest("/masters", masters::router())
        .nest("/users", users::router())
        .nest("/tags", tags::router())
        .nest("/categories", categories::router())
}
