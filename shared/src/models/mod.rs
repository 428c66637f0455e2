//! Data models
//!
//! Shared between taberna-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All row IDs are `i64` (SQLite INTEGER PRIMARY KEY); the API exposes
//! them with a kind prefix (`resv_12`, `food_3`, `lead_7`, `evt_2`).

pub mod app_config;
pub mod availability;
pub mod contact;
pub mod event;
pub mod menu;
pub mod reservation;
pub mod schedule;

// Re-exports
pub use app_config::*;
pub use availability::*;
pub use contact::*;
pub use event::*;
pub use menu::*;
pub use reservation::*;
pub use schedule::*;
