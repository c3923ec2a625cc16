//! Shared types and derived-state logic for the Farm Dashboard
//!
//! Everything here is pure: models in their UI-facing shape plus the
//! aggregations the dashboard, task board, finance page and crop detail view
//! are computed from. The backend and the WASM bindings both build on it.

pub mod calendar;
pub mod dashboard;
pub mod finance;
pub mod models;
pub mod tasks;
pub mod timeline;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
