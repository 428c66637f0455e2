//! taberna-server: restaurant backend
//!
//! Public menu, schedule, availability, reservations and contact intake,
//! plus a Basic-Auth admin surface. The booking core keeps confirmed party
//! sizes per slot within capacity.

pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod state;

pub use config::Config;
pub use state::AppState;
