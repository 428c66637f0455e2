//! Menu API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/v1/menu | GET | none |
//! | /api/v1/menu/food | GET | none |
//! | /api/v1/menu/wines | GET | none |
//! | /admin/menu/food | POST | admin |
//! | /admin/menu/wines | POST | admin |
//! | /admin/menu/{id} | PATCH, DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", get(handler::get_menu))
        .route("/menu/food", get(handler::list_food))
        .route("/menu/wines", get(handler::list_wines))
}

pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/menu/food", post(handler::create_food))
        .route("/menu/wines", post(handler::create_wine))
        .route("/menu/{id}", patch(handler::update).delete(handler::delete))
}
