use validator::ValidationErrors;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// One or more fields failed validation. Carries a message per field.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Flatten field errors into `(field, message)` pairs, sorted by field.
    ///
    /// Only the first message per field is kept. Returns an empty list for
    /// every variant other than [`CoreError::Validation`].
    pub fn field_messages(&self) -> Vec<(String, String)> {
        let CoreError::Validation(errors) = self else {
            return Vec::new();
        };

        let mut out: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    (field.to_string(), message)
                })
            })
            .collect();
        out.sort();
        out
    }
}
