//! The storage seam for articles.
//!
//! [`ArticleStore`] is what the service layer holds. [`PgArticleStore`]
//! backs production; [`MemoryArticleStore`] backs tests and local demos
//! that run without PostgreSQL.

use async_trait::async_trait;
use newsdesk_core::article::ArticleFields;
use newsdesk_core::types::DbId;

use crate::models::article::Article;
use crate::repositories::ArticleRepo;
use crate::DbPool;

mod memory;

pub use memory::MemoryArticleStore;

/// Durable CRUD for article records.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// All articles, newest `created_at` first (ties broken by newest id).
    async fn list(&self) -> Result<Vec<Article>, sqlx::Error>;

    /// Look up an article by id. `None` is a normal "not found" result.
    async fn get(&self, id: DbId) -> Result<Option<Article>, sqlx::Error>;

    /// Persist a new article, assigning its id and both timestamps.
    async fn insert(&self, fields: &ArticleFields) -> Result<Article, sqlx::Error>;

    /// Persist a mutated article. The caller sets `updated_at`.
    ///
    /// Returns `None` if the row no longer exists.
    async fn update(&self, article: &Article) -> Result<Option<Article>, sqlx::Error>;

    /// Remove an article. Returns `false` if no such id exists.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// PostgreSQL-backed store delegating to [`ArticleRepo`].
#[derive(Clone)]
pub struct PgArticleStore {
    pool: DbPool,
}

impl PgArticleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn list(&self) -> Result<Vec<Article>, sqlx::Error> {
        ArticleRepo::list(&self.pool).await
    }

    async fn get(&self, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        ArticleRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, fields: &ArticleFields) -> Result<Article, sqlx::Error> {
        ArticleRepo::create(&self.pool, fields, chrono::Utc::now()).await
    }

    async fn update(&self, article: &Article) -> Result<Option<Article>, sqlx::Error> {
        ArticleRepo::update(&self.pool, article).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ArticleRepo::delete(&self.pool, id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
