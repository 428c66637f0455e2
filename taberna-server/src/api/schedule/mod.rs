//! Schedule API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/schedule?from=&to= | GET | none |
//! | /admin/schedule/day?date=&open=&note= | POST | admin |
//! | /admin/schedule/window?date=&start=&end= | POST, DELETE | admin |
//! | /admin/capacity?date= | GET | admin |
//! | /admin/capacity | PUT | admin |
//! | /admin/capacity?date=&slot= | DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/schedule", get(handler::list))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/schedule/day", post(handler::upsert_day))
        .route(
            "/schedule/window",
            post(handler::add_window).delete(handler::delete_window),
        )
        .route(
            "/capacity",
            get(handler::list_capacity)
                .put(handler::set_capacity)
                .delete(handler::delete_capacity),
        )
}
