//! Domain layer for the newsdesk service.
//!
//! Pure logic only: no database or filesystem access lives here. The `db`
//! crate persists what this crate validates, and the `api` crate wires both
//! to HTTP.

pub mod article;
pub mod error;
pub mod patch;
pub mod types;
pub mod upload;
