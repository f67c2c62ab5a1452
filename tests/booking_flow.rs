//! End-to-end page flow against a stub rental API.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use carhire_web::config::Config;
use carhire_web::{routes, AppState};

#[derive(Clone)]
struct Stub {
    bookings: Arc<Mutex<Vec<Value>>>,
    reply_status: u16,
    reply_body: String,
}

impl Stub {
    fn accepting() -> Self {
        Self::replying(201, r#"{"id": 99}"#)
    }

    fn replying(status: u16, body: &str) -> Self {
        Self {
            bookings: Arc::new(Mutex::new(Vec::new())),
            reply_status: status,
            reply_body: body.to_string(),
        }
    }

    fn bookings(&self) -> Vec<Value> {
        self.bookings.lock().unwrap().clone()
    }
}

fn vehicles_json() -> Value {
    json!([
        {
            "id": 1,
            "uuid": "patrol-1",
            "vehicle_name": "Nissan Patrol",
            "price": "3000",
            "base_price": 3000,
            "seats": 7,
            "category": {"name": "Luxury"},
            "type": "4WD",
            "ac": true,
            "images": []
        },
        {
            "id": 2,
            "uuid": "tahoe-2",
            "vehicle_name": "Chevrolet Tahoe",
            "price": 2500.5,
            "images": ["/img/tahoe.jpg"]
        }
    ])
}

async fn stub_vehicles() -> Json<Value> {
    Json(vehicles_json())
}

async fn stub_details(Query(params): Query<HashMap<String, String>>) -> Response {
    let key = params.get("uuid").cloned().unwrap_or_default();
    let vehicles = vehicles_json();
    let found = vehicles
        .as_array()
        .and_then(|list| list.iter().find(|v| v["uuid"] == key.as_str()).cloned());
    match found {
        Some(vehicle) => Json(vehicle).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

async fn stub_accessories(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("vehicle_uuid").map(String::as_str) {
        Some("patrol-1") => Json(json!([
            {"id": 1, "name": "Additional Driver", "price": "262.50", "per_day": 0},
            {"id": 2, "name": "SCDW Walkin (Monthly)", "price": 476},
            {"id": 7, "name": "GPS", "price": "35.00", "per_day": true}
        ])),
        _ => Json(json!([])),
    }
}

async fn stub_locations(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("type").map(String::as_str) {
        Some("pickup") => Json(json!([
            {"id": 1, "type": "pickup", "location_name": "Dubai Al Quoz Head Office"},
            {"id": 2, "type": "pickup", "location_name": "Airport T3", "emirate_name": "Dubai"}
        ])),
        _ => Json(json!([
            {"id": "R1", "type": "return", "location_name": "Marina"}
        ])),
    }
}

async fn stub_create_booking(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.bookings.lock().unwrap().push(body);
    let status = StatusCode::from_u16(stub.reply_status).unwrap();
    (status, stub.reply_body.clone()).into_response()
}

async fn start_stub(stub: Stub) -> String {
    let app = Router::new()
        .route("/api/vehicles/", get(stub_vehicles))
        .route("/api/vehicles/details/", get(stub_details))
        .route("/api/accessories/", get(stub_accessories))
        .route("/api/locations/", get(stub_locations))
        .route("/api/booking/create/", post(stub_create_booking))
        .with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", address)
}

fn app(api_base_url: &str) -> Router {
    let config = Config::from_lookup(|key| match key {
        "API_BASE_URL" => Some(api_base_url.to_string()),
        "CACHE_WARMER" => Some("false".to_string()),
        _ => None,
    })
    .unwrap();
    routes::router(AppState::new(config).unwrap())
}

async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_form(app: Router, uri: &str, form: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

const SEARCH: &str = "/?pickup_location=1&return_location=R1&pickup_date=2025-11-16&pickup_time=10:00&return_date=2025-12-14&return_time=10:00";

const DRAFT: &str = "vehicle=patrol-1&pickup_location=1&return_location=R1&pickup_date=16/11/2025&pickup_time=10:00&return_date=2025-12-14&return_time=08:00&accessories=1";

const RENTER: &str = "first_name=Aisha&last_name=Khan&dob=04/05/1990&nationality=Emirati&phone=0501234567&email=aisha%40example.com&address=&license_number=DL-123&license_expiry=2030-01-31&license_issuer=Dubai";

fn submission(extra: &str) -> String {
    format!("{}&{}{}", DRAFT, RENTER, extra)
}

#[tokio::test]
async fn test_search_lists_vehicles() {
    let base = start_stub(Stub::accepting()).await;
    let (status, body) = get_page(app(&base), SEARCH).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Nissan Patrol"));
    assert!(body.contains("Chevrolet Tahoe"));
    assert!(body.contains("AED 3000.00"));
    assert!(body.contains("AED 2500.50"));
    assert!(body.contains("No Image"));
    assert!(body.contains("/img/tahoe.jpg"));
    assert!(body.contains("7 Seats"));
    assert!(!body.contains("Ready to Continue?"));
}

#[tokio::test]
async fn test_search_defaults_to_first_locations() {
    let base = start_stub(Stub::accepting()).await;
    let (status, body) = get_page(app(&base), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<option value="1" selected>"#));
    assert!(body.contains(r#"<option value="R1" selected>"#));
    assert!(body.contains("Airport T3, Dubai"));
    // Defaults make the selection complete, so results are shown
    assert!(body.contains("Nissan Patrol"));
}

#[tokio::test]
async fn test_search_opens_vehicle_panel() {
    let base = start_stub(Stub::accepting()).await;
    let uri = format!("{}&open=patrol-1", SEARCH);
    let (status, body) = get_page(app(&base), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ready to Continue?"));
    assert!(body.contains("Base Rental Price: AED 3000.00"));
    assert!(body.contains("Category: Luxury"));
    assert!(body.contains("AC: Yes"));
}

#[tokio::test]
async fn test_search_failure_is_shown_on_page() {
    // Nothing listens on port 1
    let (status, body) = get_page(app("http://127.0.0.1:1"), SEARCH).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to fetch vehicles"));
}

#[tokio::test]
async fn test_vehicle_page_totals_selected_accessories() {
    let base = start_stub(Stub::accepting()).await;
    let (status, body) = get_page(app(&base), "/vehicle/patrol-1?accessories=1&accessories=2&accessories=99").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Additional Driver"));
    assert!(body.contains("GPS"));
    assert!(body.contains("AED 738.50"));
    assert!(body.contains("AED 3738.50"));
    assert!(body.contains(r#"value="1" checked"#));
    assert!(!body.contains(r#"value="7" checked"#));
    // No search context carried over
    assert!(body.contains("Dubai Al Quoz Head Office"));
    assert!(body.contains("November 16, 2025 10:00 AM"));
    assert!(body.contains("December 14, 2025 8:00 AM"));
}

#[tokio::test]
async fn test_vehicle_page_uses_built_in_catalog_when_api_has_none() {
    let base = start_stub(Stub::accepting()).await;
    let (status, body) = get_page(app(&base), "/vehicle/tahoe-2?accessories=3").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Delivery Surcharge (Dubai)"));
    assert!(body.contains("Child Seat - Monthly"));
    assert!(body.contains("AED 2553.00"));
}

#[tokio::test]
async fn test_unknown_vehicle_is_not_found() {
    let base = start_stub(Stub::accepting()).await;
    let (status, body) = get_page(app(&base), "/vehicle/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Vehicle not found"));
}

#[tokio::test]
async fn test_review_page_shows_draft() {
    let base = start_stub(Stub::accepting()).await;
    let (status, body) = post_form(app(&base), "/booking-review", DRAFT).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Review Your Booking"));
    assert!(body.contains("Dubai Al Quoz Head Office"));
    assert!(body.contains("Marina"));
    assert!(body.contains("November 16, 2025 10:00 AM"));
    assert!(body.contains("December 14, 2025 8:00 AM"));
    assert!(body.contains("Additional Driver"));
    assert!(body.contains("AED 3262.50"));
    assert!(body.contains("United Arab Emirates"));
}

#[tokio::test]
async fn test_review_for_unknown_vehicle_is_not_found() {
    let base = start_stub(Stub::accepting()).await;
    let (status, _) = post_form(app(&base), "/booking-review", "vehicle=missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_review_with_api_down_is_bad_gateway() {
    let (status, body) = post_form(app("http://127.0.0.1:1"), "/booking-review", DRAFT).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("The booking service is unavailable"));
}

#[tokio::test]
async fn test_successful_booking_sends_payload() {
    let stub = Stub::accepting();
    let base = start_stub(stub.clone()).await;
    let (status, body) = post_form(app(&base), "/booking", &submission("&terms_accepted=on")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Booking Confirmed!"));
    assert!(body.contains("Thank you for your reservation. We have received your booking!"));

    let bookings = stub.bookings();
    assert_eq!(bookings.len(), 1);
    let payload = &bookings[0];
    assert_eq!(payload["vehicle"], json!(1));
    assert_eq!(payload["first_name"], "Aisha");
    assert_eq!(payload["email_address"], "aisha@example.com");
    assert_eq!(payload["date_of_birth"], "1990-05-04");
    assert_eq!(payload["driving_license_expiry_on"], "2030-01-31");
    assert_eq!(payload["country_region"], "United Arab Emirates");
    assert_eq!(payload["start_date"], "2025-11-16T10:00:00");
    assert_eq!(payload["end_date"], "2025-12-14T08:00:00");
    assert_eq!(payload["pickup_location"], json!(1));
    assert_eq!(payload["dropoff_location"], "R1");
    assert_eq!(payload["total_amount"], json!(3262.5));
    assert_eq!(payload["selected_accessories"], json!(["1"]));
}

#[tokio::test]
async fn test_missing_fields_block_submission() {
    let stub = Stub::accepting();
    let base = start_stub(stub.clone()).await;
    let (status, body) = post_form(app(&base), "/booking", DRAFT).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Required"));
    assert!(body.contains("You must accept terms"));
    assert!(stub.bookings().is_empty());
}

#[tokio::test]
async fn test_malformed_date_blocks_submission() {
    let stub = Stub::accepting();
    let base = start_stub(stub.clone()).await;
    let form = submission("&terms_accepted=on").replace("dob=04/05/1990", "dob=31/02/1990");
    let (status, body) = post_form(app(&base), "/booking", &form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Invalid date"));
    // Typed values are kept
    assert!(body.contains(r#"value="Aisha""#));
    assert!(stub.bookings().is_empty());
}

#[tokio::test]
async fn test_rejected_booking_shows_backend_detail() {
    let stub = Stub::replying(400, r#"{"detail": "Vehicle already booked for these dates"}"#);
    let base = start_stub(stub.clone()).await;
    let (status, body) = post_form(app(&base), "/booking", &submission("&terms_accepted=on")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Vehicle already booked for these dates"));
    assert_eq!(stub.bookings().len(), 1);
}

#[tokio::test]
async fn test_rejected_booking_without_detail_shows_generic_message() {
    let stub = Stub::replying(500, "<html>Server Error</html>");
    let base = start_stub(stub).await;
    let (status, body) = post_form(app(&base), "/booking", &submission("&terms_accepted=on")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Failed to submit booking. Please try again."));
}

#[tokio::test]
async fn test_quote_endpoint() {
    let base = start_stub(Stub::accepting()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/quote")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"vehicle": "patrol-1", "accessories": ["1", "2", "99"]}"#))
        .unwrap();
    let (status, body) = send(app(&base), request).await;

    assert_eq!(status, StatusCode::OK);
    let quote: Value = serde_json::from_str(&body).unwrap();
    let amount = |key: &str| Decimal::from_str(quote[key]["amount"].as_str().unwrap()).unwrap();
    assert_eq!(amount("base_price"), dec!(3000));
    assert_eq!(amount("accessories"), dec!(738.50));
    assert_eq!(amount("total"), dec!(3738.50));
    assert_eq!(quote["total"]["currency"], "AED");
    assert_eq!(quote["selected_accessories"], json!(["1", "2", "99"]));
}

#[tokio::test]
async fn test_quote_for_unknown_vehicle() {
    let base = start_stub(Stub::accepting()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/quote")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"vehicle": "missing"}"#))
        .unwrap();
    let (status, body) = send(app(&base), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error_type"], "VehicleNotFound");
}

#[tokio::test]
async fn test_health_reports_cache() {
    let base = start_stub(Stub::accepting()).await;
    let (status, body) = get_page(app(&base), "/health").await;

    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["api_base_url"], base);
}
