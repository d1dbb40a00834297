//! Service layer: business operations that span the store and the
//! filesystem.

mod article_service;

pub use article_service::ArticleService;
