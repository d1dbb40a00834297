use std::collections::BTreeMap;

use async_trait::async_trait;
use newsdesk_core::article::ArticleFields;
use newsdesk_core::types::DbId;
use tokio::sync::RwLock;

use super::ArticleStore;
use crate::models::article::Article;

/// In-process article store.
///
/// Ids come from a counter that only moves forward, so deleted ids are
/// never handed out again.
#[derive(Default)]
pub struct MemoryArticleStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, Article>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored articles.
    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn list(&self) -> Result<Vec<Article>, sqlx::Error> {
        let inner = self.inner.read().await;
        let mut articles: Vec<Article> = inner.rows.values().cloned().collect();
        articles.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(articles)
    }

    async fn get(&self, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, fields: &ArticleFields) -> Result<Article, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = chrono::Utc::now();
        let article = Article {
            id: inner.last_id,
            title: fields.title.clone(),
            body: fields.body.clone(),
            image: fields.image.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(article.id, article.clone());
        Ok(article)
    }

    async fn update(&self, article: &Article) -> Result<Option<Article>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let Some(row) = inner.rows.get_mut(&article.id) else {
            return Ok(None);
        };
        row.title = article.title.clone();
        row.body = article.body.clone();
        row.image = article.image.clone();
        row.updated_at = article.updated_at;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> ArticleFields {
        ArticleFields::new(title, "Body text", None)
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_equal_timestamps() {
        let store = MemoryArticleStore::new();
        let a = store.insert(&fields("First")).await.unwrap();
        let b = store.insert(&fields("Second")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryArticleStore::new();
        for title in ["One", "Two", "Three"] {
            store.insert(&fields(title)).await.unwrap();
        }

        let titles: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.title)
            .collect();
        assert_eq!(titles, vec!["Three", "Two", "One"]);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let store = MemoryArticleStore::new();
        let a = store.insert(&fields("First")).await.unwrap();
        assert!(store.delete(a.id).await.unwrap());
        assert!(!store.delete(a.id).await.unwrap());

        let b = store.insert(&fields("Second")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(store.get(a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let store = MemoryArticleStore::new();
        let mut a = store.insert(&fields("First")).await.unwrap();
        store.delete(a.id).await.unwrap();

        a.title = "Changed".into();
        assert!(store.update(&a).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
