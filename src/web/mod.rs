//! HTTP surface: rendered pages plus the JSON API.
//!
//! Every HTML route has a `/api` twin serving the flat `TagSummary` shape
//! with permissive cross-origin headers.

/// Askama page templates.
pub mod pages;

/// Router and request handlers.
pub mod routes;

pub use routes::{router, AppState};
