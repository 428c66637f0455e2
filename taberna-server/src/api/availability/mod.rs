//! Availability API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/availability?date=&partySize= | GET | none |

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/availability", get(handler::get_availability))
}
