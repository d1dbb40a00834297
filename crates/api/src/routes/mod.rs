pub mod health;
pub mod news;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /news                  list, create
/// /news/upload           upload image (multipart)
/// /news/{id}             get, update (PUT/PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/news", news::router())
}
