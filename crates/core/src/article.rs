//! Article field rules and partial-update merging.
//!
//! Validation mirrors what the HTTP layer reports back to clients: one
//! message per offending field, keyed by the JSON field name.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::patch::Patch;

/// Minimum title length, in characters.
pub const TITLE_MIN_CHARS: usize = 3;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// The mutable fields of an article, as they would be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
}

impl ArticleFields {
    pub fn new(title: impl Into<String>, body: impl Into<String>, image: Option<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            image: normalize_image(image),
        }
    }

    /// Check title and body constraints, collecting every failing field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = ValidationErrors::new();

        if let Some(err) = check_title(&self.title) {
            errors.add("title", err);
        }
        if self.body.trim().is_empty() {
            errors.add("body", field_error("blank", "Body is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors))
        }
    }

    /// Merge `patch` into these fields. Returns `true` if any value changed.
    ///
    /// Absent patch fields leave the current value in place. An explicit
    /// `null` clears `image` and empties `title`/`body` (which then fails
    /// [`ArticleFields::validate`]).
    pub fn apply(&mut self, patch: ArticlePatch) -> bool {
        let mut changed = false;

        if let Some(title) = patch.title.into_option() {
            let title = title.unwrap_or_default();
            changed |= title != self.title;
            self.title = title;
        }
        if let Some(body) = patch.body.into_option() {
            let body = body.unwrap_or_default();
            changed |= body != self.body;
            self.body = body;
        }
        if let Some(image) = patch.image.into_option() {
            let image = normalize_image(image);
            changed |= image != self.image;
            self.image = image;
        }

        changed
    }
}

/// Field-presence-driven update request for an article.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArticlePatch {
    pub title: Patch<String>,
    pub body: Patch<String>,
    pub image: Patch<String>,
}

impl ArticlePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_absent() && self.body.is_absent() && self.image.is_absent()
    }
}

/// Treat blank image references as "no image".
pub fn normalize_image(image: Option<String>) -> Option<String> {
    image.filter(|s| !s.trim().is_empty())
}

fn check_title(title: &str) -> Option<ValidationError> {
    if title.trim().is_empty() {
        return Some(field_error("blank", "Title is required"));
    }

    let len = title.chars().count();
    if len < TITLE_MIN_CHARS {
        Some(field_error(
            "length",
            format!(
                "This value is too short. It should have {TITLE_MIN_CHARS} characters or more."
            ),
        ))
    } else if len > TITLE_MAX_CHARS {
        Some(field_error(
            "length",
            format!(
                "This value is too long. It should have {TITLE_MAX_CHARS} characters or less."
            ),
        ))
    } else {
        None
    }
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
