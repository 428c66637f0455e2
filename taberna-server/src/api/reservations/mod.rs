//! Reservation API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/reservations | POST | none |
//! | /api/v1/reservations/{id} | GET | none |
//! | /api/v1/reservations/{id}/cancel | POST | none |
//! | /admin/reservations?date= | GET | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservations", post(handler::create))
        .route("/reservations/{id}", get(handler::get_by_id))
        .route("/reservations/{id}/cancel", post(handler::cancel))
}

pub fn admin_router() -> Router<AppState> {
    Router::new().route("/reservations", get(handler::list_by_date))
}
