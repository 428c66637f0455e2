#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use taberna_server::db::DbService;
use taberna_server::db::repository::schedule;
use taberna_server::{AppState, Config, api};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "s3cret";
pub const OPEN_DAY: &str = "2030-06-01";

pub fn test_config(capacity: u32) -> Config {
    let capacity = capacity.to_string();
    Config::from_lookup(|name| match name {
        "ADMIN_USERNAME" => Some(ADMIN_USER.to_string()),
        "ADMIN_PASSWORD" => Some(ADMIN_PASS.to_string()),
        "RESERVATION_SLOT_CAPACITY" => Some(capacity.clone()),
        "ENVIRONMENT" => Some("test".to_string()),
        _ => None,
    })
    .unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// App over a private in-memory database with one open day
/// (`OPEN_DAY`, service 20:00-22:00, 30 minute slots).
pub async fn test_app(capacity: u32) -> TestApp {
    let config = test_config(capacity);
    let db = DbService::in_memory().await.unwrap();
    let state = AppState::with_db(db, &config).await.unwrap();

    let day = schedule::upsert_day(state.pool(), OPEN_DAY, true, None)
        .await
        .unwrap();
    schedule::add_window(state.pool(), day.id, "20:00", "22:00")
        .await
        .unwrap();

    TestApp {
        router: api::build_app(state.clone(), &config),
        state,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request(Method::POST, uri, Some(body))).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut req = request(method, uri, body);
        req.headers_mut().insert(
            header::AUTHORIZATION,
            basic_auth(ADMIN_USER, ADMIN_PASS).parse().unwrap(),
        );
        self.send(req).await
    }

    pub async fn book(&self, slot: &str, party_size: i64) -> TestResponse {
        self.post_json(
            "/api/v1/reservations",
            serde_json::json!({
                "date": OPEN_DAY,
                "slot": slot,
                "partySize": party_size,
                "customer": { "name": "Ana", "email": "ana@example.com" }
            }),
        )
        .await
    }

    /// Remaining capacity of `slot` on `OPEN_DAY` as reported by the API
    pub async fn remaining(&self, slot: &str) -> u64 {
        let res = self
            .get(&format!("/api/v1/availability?date={OPEN_DAY}&partySize=1"))
            .await;
        assert_eq!(res.status, StatusCode::OK);
        res.body["slots"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["slot"] == slot)
            .map(|s| s["remainingCapacity"].as_u64().unwrap())
            .unwrap()
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}
