//! Site configuration API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/config | GET | none |
//! | /admin/config | GET | admin |
//! | /admin/config/{key} | GET, PUT | admin |

mod handler;

use axum::{
    Router,
    routing::get,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/config", get(handler::public_config))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/config", get(handler::list))
        .route("/config/{key}", get(handler::get_entry).put(handler::upsert))
}
