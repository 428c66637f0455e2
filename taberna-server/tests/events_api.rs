mod common;

use http::{Method, StatusCode};
use serde_json::{Value, json};
use shared::error::ErrorCode;

use common::{TestApp, test_app};

fn event(title: &str, date_start: &str, category: &str) -> Value {
    json!({
        "title": title,
        "dateStart": date_start,
        "description": "En la terraza",
        "category": category,
        "imageUrl": "https://taberna.es/evento.jpg",
    })
}

async fn create(app: &TestApp, body: Value) -> String {
    let res = app.admin(Method::POST, "/admin/events", Some(body)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["id"].as_str().unwrap().to_string()
}

fn titles(body: &Value) -> Vec<&str> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_event_lifecycle() {
    let app = test_app(10).await;

    let id = create(&app, event("Noche de jazz", "2030-06-07T20:00:00+02:00", "musica")).await;
    assert!(id.starts_with("evt_"));

    // drafts stay hidden from the public side
    let public = app.get(&format!("/api/v1/events/{id}")).await;
    assert_eq!(public.status, StatusCode::NOT_FOUND);
    assert_eq!(public.body["code"], ErrorCode::EventNotFound.code());
    assert_eq!(titles(&app.get("/api/v1/events").await.body), Vec::<&str>::new());

    let published = app
        .admin(Method::POST, &format!("/admin/events/{id}/publish"), None)
        .await;
    assert_eq!(published.status, StatusCode::OK);
    assert_eq!(published.body, json!({ "id": id, "isPublished": true }));

    let public = app.get(&format!("/api/v1/events/{id}")).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["dateStart"], "2030-06-07T18:00:00Z");
    assert_eq!(public.body["timezone"], "Europe/Madrid");

    let mut changed = event("Noche de jazz y vermut", "2030-06-07T21:00:00+02:00", "musica");
    changed["isPublished"] = json!(true);
    changed["locationName"] = json!("Terraza");
    let replaced = app
        .admin(Method::PUT, &format!("/admin/events/{id}"), Some(changed))
        .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["title"], "Noche de jazz y vermut");
    assert_eq!(replaced.body["locationName"], "Terraza");
    assert!(replaced.body["updatedAt"].as_i64().unwrap() >= replaced.body["createdAt"].as_i64().unwrap());

    let hidden = app
        .admin(Method::POST, &format!("/admin/events/{id}/unpublish"), None)
        .await;
    assert_eq!(hidden.body["isPublished"], false);
    assert_eq!(app.get(&format!("/api/v1/events/{id}")).await.status, StatusCode::NOT_FOUND);

    let res = app.admin(Method::DELETE, &format!("/admin/events/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let res = app.admin(Method::DELETE, &format!("/admin/events/{id}"), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], ErrorCode::EventNotFound.code());
}

#[tokio::test]
async fn test_public_listing_pages_and_filters() {
    let app = test_app(10).await;
    for (title, start, category) in [
        ("c", "2030-06-03T20:00:00Z", "musica"),
        ("a", "2030-06-01T20:00:00Z", "musica"),
        ("b", "2030-06-02T20:00:00Z", "cata"),
    ] {
        let mut body = event(title, start, category);
        body["isPublished"] = json!(true);
        create(&app, body).await;
    }
    create(&app, event("borrador", "2030-06-02T21:00:00Z", "musica")).await;

    let first = app.get("/api/v1/events?limit=2").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(titles(&first.body), ["a", "b"]);
    assert_eq!(first.body["nextCursor"], "2");

    let rest = app.get("/api/v1/events?limit=2&cursor=2").await;
    assert_eq!(titles(&rest.body), ["c"]);
    assert_eq!(rest.body["nextCursor"], Value::Null);

    let day = app.get("/api/v1/events?from=2030-06-02&to=2030-06-02").await;
    assert_eq!(titles(&day.body), ["b"]);

    let music = app.get("/api/v1/events?category=musica").await;
    assert_eq!(titles(&music.body), ["a", "c"]);

    let res = app.get("/api/v1/events?limit=101").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], ErrorCode::ValueOutOfRange.code());

    let res = app.get("/api/v1/events?cursor=next").await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], ErrorCode::InvalidFormat.code());
}

#[tokio::test]
async fn test_admin_listing_by_status() {
    let app = test_app(10).await;
    let mut live = event("en cartel", "2030-06-01T20:00:00Z", "musica");
    live["isPublished"] = json!(true);
    create(&app, live).await;
    create(&app, event("borrador", "2030-06-05T20:00:00Z", "musica")).await;

    let all = app.admin(Method::GET, "/admin/events", None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(titles(&all.body), ["borrador", "en cartel"]);
    assert!(all.body["items"][0]["createdAt"].is_i64());

    let drafts = app.admin(Method::GET, "/admin/events?status=draft", None).await;
    assert_eq!(titles(&drafts.body), ["borrador"]);

    let published = app
        .admin(Method::GET, "/admin/events?status=published", None)
        .await;
    assert_eq!(titles(&published.body), ["en cartel"]);

    assert_eq!(
        app.get("/admin/events").await.status,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_invalid_event_payloads() {
    let app = test_app(10).await;

    let mut backwards = event("Cata", "2030-06-07T20:00:00Z", "cata");
    backwards["dateEnd"] = json!("2030-06-07T19:00:00Z");
    let res = app.admin(Method::POST, "/admin/events", Some(backwards)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], ErrorCode::EventInvalidDates.code());

    let res = app
        .admin(Method::POST, "/admin/events", Some(event(" ", "2030-06-07T20:00:00Z", "cata")))
        .await;
    assert_eq!(res.body["code"], ErrorCode::RequiredField.code());
    assert_eq!(res.body["details"]["field"], "title");

    let res = app
        .admin(Method::POST, "/admin/events", Some(event("Cata", "mañana", "cata")))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .admin(
            Method::PUT,
            "/admin/events/evt_99",
            Some(event("Cata", "2030-06-07T20:00:00Z", "cata")),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["code"], ErrorCode::EventNotFound.code());
}
