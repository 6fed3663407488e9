//! HTTP round-trips through the full router, driving the booking core the
//! way the browser UI would.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use boxoffice::booking::BookingEngine;
use boxoffice::catalog::Catalog;
use boxoffice::handlers::AppState;
use boxoffice::ledger::TicketLedger;
use boxoffice::routes::create_routes;
use boxoffice::session::Sessions;
use boxoffice::store::InMemoryStore;

fn test_app() -> Router {
    let store = Arc::new(InMemoryStore::new());
    let catalog = Arc::new(Catalog::open(store.clone()));
    let ledger = Arc::new(TicketLedger::open(store.clone()));
    let sessions = Arc::new(Sessions::open(store));
    let booking = Arc::new(BookingEngine::new(catalog.clone(), ledger.clone()));
    create_routes(AppState {
        catalog,
        ledger,
        booking,
        sessions,
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

async fn login(app: &Router, role: &str) {
    let (status, _) = send(app, post("/session/login", json!({ "role": role }))).await;
    assert_eq!(status, StatusCode::OK);
}

fn event_draft() -> Value {
    json!({
        "name": "Launch Night",
        "date": "2025-10-03",
        "time": "19:30:00",
        "venue": "Main Stage",
        "categories": [
            { "name": "Standard", "price": 80, "capacity": 2 }
        ]
    })
}

async fn create_event(app: &Router) -> String {
    login(app, "organizer").await;
    let (status, body) = send(app, post("/events", event_draft())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_str().expect("event id").to_string()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let app = test_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn event_creation_requires_an_organizer_session() {
    let app = test_app();

    let (status, body) = send(&app, post("/events", event_draft())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");

    login(&app, "consumer").await;
    let (status, body) = send(&app, post("/events", event_draft())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn rejects_a_draft_with_no_valid_categories() {
    let app = test_app();
    login(&app, "organizer").await;

    let draft = json!({
        "name": "Empty",
        "date": "2025-10-03",
        "time": "19:30:00",
        "venue": "Main Stage",
        "categories": [{ "name": "", "price": 0, "capacity": 5 }]
    });
    let (status, body) = send(&app, post("/events", draft)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn booking_round_trip_with_error_codes() {
    let app = test_app();
    let event_id = create_event(&app).await;
    let book_uri = format!("/events/{event_id}/categories/Standard/book");

    login(&app, "consumer").await;

    let (status, body) = send(&app, post(&book_uri, json!({ "seat_number": 1 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["seat_number"], 1);
    assert_eq!(body["data"]["price"], "80");

    let (status, body) = send(&app, post(&book_uri, json!({ "seat_number": 1 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SEAT_TAKEN");

    let (status, body) = send(&app, post(&book_uri, json!({ "seat_number": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_SEAT");

    let (status, body) = send(
        &app,
        post(
            &format!("/events/{event_id}/categories/Backstage/book"),
            json!({ "seat_number": 1 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "CATEGORY_NOT_FOUND");

    let (status, body) = send(
        &app,
        get(&format!(
            "/events/{event_id}/categories/Standard/occupancy"
        )),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["capacity"], 2);
    assert_eq!(body["data"]["occupied_seats"], json!([1]));
}

#[tokio::test]
async fn consumer_history_and_payload_export() {
    let app = test_app();
    let event_id = create_event(&app).await;

    login(&app, "consumer").await;
    let book_uri = format!("/events/{event_id}/categories/Standard/book");
    let (_, body) = send(&app, post(&book_uri, json!({ "seat_number": 2 }))).await;
    let ticket_id = body["data"]["id"].as_str().expect("ticket id").to_string();

    let (status, body) = send(&app, get("/tickets")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().expect("array").len(), 1);

    let (status, body) = send(&app, get(&format!("/tickets/{ticket_id}/payload"))).await;
    assert_eq!(status, StatusCode::OK);
    let payload: Value =
        serde_json::from_str(body["data"]["payload"].as_str().expect("payload string"))
            .expect("payload json");
    assert_eq!(payload["version"], 1);
    assert_eq!(payload["eventName"], "Launch Night");
    assert_eq!(payload["seatNumber"], 2);
}

#[tokio::test]
async fn session_lifecycle() {
    let app = test_app();

    let (status, body) = send(&app, get("/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], Value::Null);

    login(&app, "organizer").await;
    let (_, body) = send(&app, get("/session")).await;
    assert_eq!(body["data"]["name"], "Alice Organizer");
    assert_eq!(body["data"]["role"], "organizer");

    let (status, _) = send(&app, delete("/session")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, get("/session")).await;
    assert_eq!(body["data"], Value::Null);
}
