//! Shared types for the Taberna backend
//!
//! Error system, API models and small utilities used by the server crate
//! and its tests.

pub mod error;
pub mod models;
pub mod request;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
