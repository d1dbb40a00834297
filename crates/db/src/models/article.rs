//! News article entity and create DTO.

use newsdesk_core::article::ArticleFields;
use newsdesk_core::types::{serialize_timestamp, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `news` table.
///
/// Serializes with camelCase keys and `YYYY-MM-DD HH:MM:SS` timestamps,
/// which is the shape the HTTP API returns.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: Timestamp,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: Timestamp,
}

impl Article {
    /// Copy out the mutable fields for validation and patching.
    pub fn fields(&self) -> ArticleFields {
        ArticleFields {
            title: self.title.clone(),
            body: self.body.clone(),
            image: self.image.clone(),
        }
    }

    /// Overwrite the mutable fields. Timestamps are left to the caller.
    pub fn set_fields(&mut self, fields: ArticleFields) {
        self.title = fields.title;
        self.body = fields.body;
        self.image = fields.image;
    }
}

/// DTO for creating a new article.
///
/// Missing or `null` `title`/`body` become empty strings so they surface as
/// field-level validation errors rather than JSON parse failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<CreateArticle> for ArticleFields {
    fn from(input: CreateArticle) -> Self {
        ArticleFields::new(
            input.title.unwrap_or_default(),
            input.body.unwrap_or_default(),
            input.image,
        )
    }
}
