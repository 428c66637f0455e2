mod common;

use http::{Method, StatusCode};
use serde_json::json;
use shared::error::ErrorCode;

use common::{OPEN_DAY, test_app};

#[tokio::test]
async fn test_slot_fills_and_frees_on_cancel() {
    let app = test_app(10).await;

    let first = app.book("20:00", 6).await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["status"], "CONFIRMED");
    assert_eq!(first.body["partySize"], 6);
    let first_id = first.body["id"].as_str().unwrap().to_string();
    assert!(first_id.starts_with("resv_"));

    let rejected = app.book("20:00", 5).await;
    assert_eq!(rejected.status, StatusCode::CONFLICT);
    assert_eq!(rejected.body["code"], ErrorCode::CapacityExceeded.code());
    assert_eq!(rejected.body["details"]["remaining"], 4);
    assert_eq!(rejected.body["details"]["requested"], 5);

    let second = app.book("20:00", 4).await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(app.remaining("20:00").await, 0);

    let cancelled = app
        .post_json(&format!("/api/v1/reservations/{first_id}/cancel"), json!({}))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["status"], "CANCELLED");
    assert_eq!(app.remaining("20:00").await, 6);

    // Other slots are untouched
    assert_eq!(app.remaining("20:30").await, 10);
}

#[tokio::test]
async fn test_availability_lists_generated_slots() {
    let app = test_app(4).await;
    app.book("21:00", 3).await;

    let res = app
        .get(&format!("/api/v1/availability?date={OPEN_DAY}&partySize=2"))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["date"], OPEN_DAY);
    assert_eq!(res.body["partySize"], 2);
    assert_eq!(res.body["timezone"], "Europe/Madrid");

    let slots = res.body["slots"].as_array().unwrap();
    let times: Vec<&str> = slots.iter().map(|s| s["slot"].as_str().unwrap()).collect();
    assert_eq!(times, ["20:00", "20:30", "21:00", "21:30"]);

    let full = &slots[2];
    assert_eq!(full["remainingCapacity"], 1);
    assert_eq!(full["available"], false);
    assert_eq!(full["reason"], "FULL");
    assert_eq!(slots[0]["available"], true);
    assert!(slots[0].get("reason").is_none());
}

#[tokio::test]
async fn test_availability_on_closed_day_is_empty() {
    let app = test_app(10).await;
    let res = app
        .get("/api/v1/availability?date=2030-06-02&partySize=2")
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["slots"], json!([]));
}

#[tokio::test]
async fn test_availability_rejects_bad_query() {
    let app = test_app(10).await;

    let res = app.get("/api/v1/availability?partySize=2").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], ErrorCode::RequiredField.code());

    let res = app
        .get(&format!("/api/v1/availability?date={OPEN_DAY}&partySize=0"))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], ErrorCode::PartySizeInvalid.code());

    let res = app
        .get("/api/v1/availability?date=01-06-2030&partySize=2")
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], ErrorCode::InvalidFormat.code());
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = test_app(10).await;

    let off_grid = app.book("20:15", 2).await;
    assert_eq!(off_grid.status, StatusCode::BAD_REQUEST);
    assert_eq!(off_grid.body["code"], ErrorCode::SlotNotOffered.code());

    let too_big = app.book("20:00", 51).await;
    assert_eq!(too_big.status, StatusCode::BAD_REQUEST);
    assert_eq!(too_big.body["code"], ErrorCode::PartySizeInvalid.code());

    let closed = app
        .post_json(
            "/api/v1/reservations",
            json!({
                "date": "2030-06-02",
                "time": "20:00",
                "partySize": 2,
                "customer": { "name": "Ana" }
            }),
        )
        .await;
    assert_eq!(closed.status, StatusCode::BAD_REQUEST);
    assert_eq!(closed.body["code"], ErrorCode::DayClosed.code());

    let nameless = app
        .post_json(
            "/api/v1/reservations",
            json!({
                "date": OPEN_DAY,
                "slot": "20:00",
                "partySize": 2,
                "customer": { "name": "   " }
            }),
        )
        .await;
    assert_eq!(nameless.status, StatusCode::BAD_REQUEST);
    assert_eq!(nameless.body["code"], ErrorCode::RequiredField.code());

    let malformed = app
        .send(common::request(Method::POST, "/api/v1/reservations", None))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    // Nothing above consumed capacity
    assert_eq!(app.remaining("20:00").await, 10);
}

#[tokio::test]
async fn test_get_and_cancel_unknown_reservation() {
    let app = test_app(10).await;

    let res = app.get("/api/v1/reservations/resv_999").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], ErrorCode::ReservationNotFound.code());

    let res = app.get("/api/v1/reservations/not-an-id").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app
        .post_json("/api/v1/reservations/resv_999/cancel", json!({}))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_twice_conflicts() {
    let app = test_app(10).await;
    let created = app.book("20:30", 2).await;
    let id = created.body["id"].as_str().unwrap().to_string();

    // No body at all is accepted
    let res = app
        .send(common::request(
            Method::POST,
            &format!("/api/v1/reservations/{id}/cancel"),
            None,
        ))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .post_json(
            &format!("/api/v1/reservations/{id}/cancel"),
            json!({ "reason": "again" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body["code"], ErrorCode::ReservationAlreadyCancelled.code());

    let fetched = app.get(&format!("/api/v1/reservations/{id}")).await;
    assert_eq!(fetched.body["status"], "CANCELLED");
    assert!(fetched.body.get("cancelReason").is_none());
}

#[tokio::test]
async fn test_cancel_reason_is_kept() {
    let app = test_app(10).await;
    let created = app.book("21:30", 2).await;
    let id = created.body["id"].as_str().unwrap().to_string();

    let res = app
        .post_json(
            &format!("/api/v1/reservations/{id}/cancel"),
            json!({ "reason": "Cambio de planes" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["cancelReason"], "Cambio de planes");
}
