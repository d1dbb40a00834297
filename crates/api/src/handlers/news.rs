//! Handlers for the `/news` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use newsdesk_core::article::ArticlePatch;
use newsdesk_core::types::DbId;
use newsdesk_db::models::article::{Article, CreateArticle};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /api/news
///
/// All articles, most recently created first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Article>>> {
    let articles = state.articles.list().await?;
    Ok(Json(articles))
}

/// GET /api/news/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Article>> {
    let article = state.articles.get_or_not_found(id).await?;
    Ok(Json(article))
}

/// POST /api/news
pub async fn create(
    State(state): State<AppState>,
    input: Result<Json<CreateArticle>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Article>)> {
    let Json(input) = input.map_err(invalid_json)?;
    let article = state.articles.create(input).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT|PATCH /api/news/{id}
///
/// Both verbs are partial: only keys present in the body are applied.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    patch: Result<Json<ArticlePatch>, JsonRejection>,
) -> AppResult<Json<Article>> {
    // An unknown id wins over a malformed body.
    let current = state.articles.get_or_not_found(id).await?;
    let Json(patch) = patch.map_err(invalid_json)?;
    let article = state.articles.apply_patch(current, patch).await?;
    Ok(Json(article))
}

/// DELETE /api/news/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.articles.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "News deleted successfully",
    }))
}

fn invalid_json(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(format!("Invalid JSON: {}", rejection.body_text()))
}
