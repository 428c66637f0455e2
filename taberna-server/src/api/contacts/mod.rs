//! Project contact API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/contacts/projects | POST | none |
//! | /admin/contacts/projects?limit=&offset= | GET | admin |
//! | /admin/contacts/projects/stats | GET | admin |
//! | /admin/contacts/projects/{id}/read | POST | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/contacts/projects", post(handler::submit))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/contacts/projects", get(handler::list))
        .route("/contacts/projects/stats", get(handler::stats))
        .route("/contacts/projects/{id}/read", post(handler::mark_read))
}
