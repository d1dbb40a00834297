//! Article lifecycle orchestration.
//!
//! [`ArticleService`] is the only place that couples store mutations with
//! image file side effects. Handlers never touch the store directly.

use std::sync::Arc;

use newsdesk_core::article::{ArticleFields, ArticlePatch};
use newsdesk_core::error::CoreError;
use newsdesk_core::types::DbId;
use newsdesk_core::upload::is_managed_image;
use newsdesk_db::models::article::{Article, CreateArticle};
use newsdesk_db::store::ArticleStore;

use crate::error::{AppError, AppResult};
use crate::storage::ImageStorage;

const ENTITY: &str = "News";

pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
    images: Arc<dyn ImageStorage>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>, images: Arc<dyn ImageStorage>) -> Self {
        Self { store, images }
    }

    /// All articles, most recently created first.
    pub async fn list(&self) -> AppResult<Vec<Article>> {
        Ok(self.store.list().await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<Option<Article>> {
        Ok(self.store.get(id).await?)
    }

    /// Store connectivity, for the health endpoint.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await.is_ok()
    }

    /// Validate and persist a new article.
    ///
    /// `image` is a reference to an already-uploaded file (or an external
    /// URL), never raw bytes.
    pub async fn create(&self, input: CreateArticle) -> AppResult<Article> {
        let fields = ArticleFields::from(input);
        fields.validate()?;

        tracing::info!(title = %fields.title, "Creating article");
        let article = self.store.insert(&fields).await?;
        tracing::info!(id = article.id, "Article created");

        Ok(article)
    }

    /// Apply a partial update to the article with `id`.
    pub async fn update(&self, id: DbId, patch: ArticlePatch) -> AppResult<Article> {
        let article = self.get_or_not_found(id).await?;
        self.apply_patch(article, patch).await
    }

    /// Apply a partial update to an article already loaded from the store.
    ///
    /// Fields absent from `patch` keep their current value. When nothing
    /// actually changes the stored record is returned as-is.
    ///
    /// A replaced image is left on disk.
    // TODO: remove the previous managed image once product confirms old
    // uploads are not referenced from anywhere else.
    pub async fn apply_patch(
        &self,
        mut article: Article,
        patch: ArticlePatch,
    ) -> AppResult<Article> {
        let id = article.id;
        let mut fields = article.fields();
        let changed = fields.apply(patch);
        fields.validate()?;

        if !changed {
            tracing::debug!(id, "Update left article unchanged");
            return Ok(article);
        }

        tracing::info!(id, "Updating article");
        article.set_fields(fields);
        // Clock skew must never move updated_at backwards.
        article.updated_at = chrono::Utc::now().max(article.updated_at);

        let updated = self
            .store
            .update(&article)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
        tracing::info!(id, "Article updated");

        Ok(updated)
    }

    /// Delete an article and, best-effort, its managed image file.
    ///
    /// Image cleanup failures are logged by the storage layer and never
    /// affect the result.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let article = self.get_or_not_found(id).await?;
        tracing::info!(id, "Deleting article");

        if let Some(image) = article.image.as_deref().filter(|i| is_managed_image(i)) {
            self.images.delete(image).await;
        }

        if !self.store.delete(id).await? {
            return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
        }
        tracing::info!(id, "Article deleted");

        Ok(())
    }

    /// Like [`ArticleService::get_by_id`], but a missing id is an error.
    pub async fn get_or_not_found(&self, id: DbId) -> AppResult<Article> {
        self.store
            .get(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
    }
}
