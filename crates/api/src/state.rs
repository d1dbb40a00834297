use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::ArticleService;
use crate::storage::ImageStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Article lifecycle operations (store + image cleanup).
    pub articles: Arc<ArticleService>,
    /// Image file manager, used directly by the upload endpoint.
    pub images: Arc<dyn ImageStorage>,
}

impl AppState {
    /// Wire the service from explicit store and image storage handles.
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn newsdesk_db::store::ArticleStore>,
        images: Arc<dyn ImageStorage>,
    ) -> Self {
        let articles = ArticleService::new(store, Arc::clone(&images));
        Self {
            config: Arc::new(config),
            articles: Arc::new(articles),
            images,
        }
    }
}
