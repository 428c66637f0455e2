//! HTTP API
//!
//! Public routes live under `/api/v1`, Basic-Auth protected routes under
//! `/admin`. Each resource module exposes `router()` and, where it has
//! an admin side, `admin_router()`.

pub mod availability;
pub mod config;
pub mod contacts;
pub mod events;
pub mod health;
pub mod menu;
pub mod reservations;
pub mod schedule;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::JsonRejection;
use axum::{Json, middleware};
use http::{HeaderName, HeaderValue, Method, StatusCode, header};
use shared::error::AppError;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_admin;
use crate::config::Config;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";
const BODY_LIMIT: usize = 1024 * 1024;

/// Request ID generator (uuid v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn build_router(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .merge(availability::router())
        .merge(reservations::router())
        .merge(schedule::router())
        .merge(menu::router())
        .merge(events::router())
        .merge(config::router())
        .merge(contacts::router());

    let admin = Router::new()
        .merge(reservations::admin_router())
        .merge(schedule::admin_router())
        .merge(menu::admin_router())
        .merge(events::admin_router())
        .merge(config::admin_router())
        .merge(contacts::admin_router())
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .nest("/api/v1", public)
        .nest("/admin", admin)
        .merge(health::router())
}

/// Fully configured application with middleware and state
pub fn build_app(state: AppState, config: &Config) -> Router {
    let mut app = build_router(&state)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )));

    if let Some(cors) = cors_layer(&config.cors_origins) {
        app = app.layer(cors);
    }

    app.with_state(state)
}

/// CORS for the configured origins; `None` when no origin is configured
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}

/// Unwrap a JSON body, turning extractor rejections into a 400 `AppError`
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_request(rejection.body_text()))
}

/// Trimmed value, `None` when blank
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skipped_without_origins() {
        assert!(cors_layer(&[]).is_none());
        assert!(cors_layer(&["https://taberna.es".to_string()]).is_some());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  hi ".into())).as_deref(), Some("hi"));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
