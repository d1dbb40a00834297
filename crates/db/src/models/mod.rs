//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row and the `Deserialize` create DTO for inserts. Update
//! requests use [`newsdesk_core::article::ArticlePatch`].

pub mod article;
