//! Route definitions for news articles and image uploads.
//!
//! Registered under `/news`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use newsdesk_core::upload::MAX_IMAGE_BYTES;

use crate::handlers::{news, upload};
use crate::state::AppState;

/// Request body cap for the upload route.
///
/// Twice the image limit, so oversized images still reach the policy check
/// and get a descriptive error instead of a bare 413.
const UPLOAD_BODY_LIMIT: usize = 2 * MAX_IMAGE_BYTES;

/// News routes, registered as `/news`.
///
/// ```text
/// GET    /            list
/// POST   /            create
/// POST   /upload      upload_image
/// GET    /{id}        get_by_id
/// PUT    /{id}        update
/// PATCH  /{id}        update
/// DELETE /{id}        delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(news::list).post(news::create))
        .route(
            "/upload",
            post(upload::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/{id}",
            get(news::get_by_id)
                .put(news::update)
                .patch(news::update)
                .delete(news::delete),
        )
}
