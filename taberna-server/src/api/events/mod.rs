//! Events API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/events | GET | none |
//! | /api/v1/events/{id} | GET | none |
//! | /admin/events | GET, POST | admin |
//! | /admin/events/{id} | PUT, DELETE | admin |
//! | /admin/events/{id}/publish | POST | admin |
//! | /admin/events/{id}/unpublish | POST | admin |
//!
//! Public routes only ever see published events.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(handler::list_published))
        .route("/events/{id}", get(handler::get_published))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/events", get(handler::list_all).post(handler::create))
        .route("/events/{id}", put(handler::replace).delete(handler::delete))
        .route("/events/{id}/publish", post(handler::publish))
        .route("/events/{id}/unpublish", post(handler::unpublish))
}
