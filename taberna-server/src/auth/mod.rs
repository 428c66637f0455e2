//! Authentication

pub mod basic;

pub use basic::{AdminCredentials, require_admin};
