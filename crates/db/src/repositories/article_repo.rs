//! Repository for the `news` table.

use newsdesk_core::article::ArticleFields;
use newsdesk_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::article::Article;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, body, image, created_at, updated_at";

/// Provides CRUD operations for news articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article with `created_at = updated_at = now`.
    pub async fn create(
        pool: &PgPool,
        input: &ArticleFields,
        now: Timestamp,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO news (title, body, image, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.image)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find an article by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all articles, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM news ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Article>(&query).fetch_all(pool).await
    }

    /// Write back every mutable column of `article`, including `updated_at`.
    ///
    /// Returns `None` if no row with the article's `id` exists.
    pub async fn update(pool: &PgPool, article: &Article) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE news SET
                title = $2,
                body = $3,
                image = $4,
                updated_at = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(article.id)
            .bind(&article.title)
            .bind(&article.body)
            .bind(&article.image)
            .bind(article.updated_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
