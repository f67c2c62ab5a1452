//! HTTP route handlers

use std::time::Duration;

use askama::Template;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::booking::dates::RentalWindow;
use crate::booking::format_money;
use crate::booking::responses::HealthResponse;
use crate::booking::BookingDraft;
use crate::error::Result;
use crate::models::Vehicle;
use crate::AppState;

pub mod booking;
pub mod home;
pub mod quote;
pub mod vehicle;

const DEFAULT_DESCRIPTION: &str = "Full-size SUV, 4WD, 5 doors, typically 7 seats, AC (Air Conditioning).";

/// Build the application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/api/quote", post(quote::quote))
        .layer(cors);

    Router::new()
        .route("/", get(home::search))
        .route("/vehicle/:key", get(vehicle::details))
        .route("/booking-review", post(booking::review))
        .route("/booking", post(booking::submit))
        .route("/health", get(health))
        .merge(api)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness plus cache statistics
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        api_base_url: state.api.base_url().to_string(),
        cache: state.cache.stats(),
    })
}

/// Search context carried between pages as hidden inputs
#[derive(Debug, Clone, Default)]
pub(crate) struct ContextFields {
    pub pickup_location: String,
    pub return_location: String,
    pub pickup_date: String,
    pub pickup_time: String,
    pub return_date: String,
    pub return_time: String,
}

impl ContextFields {
    pub fn new(pickup_location: String, return_location: String, window: &RentalWindow) -> Self {
        Self {
            pickup_location,
            return_location,
            pickup_date: window.pickup_date.clone(),
            pickup_time: window.pickup_time.clone(),
            return_date: window.return_date.clone(),
            return_time: window.return_time.clone(),
        }
    }

    pub fn from_draft(draft: &BookingDraft) -> Self {
        Self::new(
            draft.pickup_location.form_value(),
            draft.return_location.form_value(),
            &draft.window,
        )
    }
}

/// Vehicle fields as shown on cards and detail panels
#[derive(Debug, Clone)]
pub(crate) struct VehicleView {
    pub key: String,
    pub name: String,
    pub image: Option<String>,
    pub price: String,
    pub base_price: String,
    pub category: String,
    pub vehicle_type: String,
    pub ac: &'static str,
    pub description: String,
    pub seats: String,
    pub doors: String,
    pub engine_cc: String,
}

impl VehicleView {
    pub fn new(vehicle: &Vehicle, currency: &str) -> Self {
        Self {
            key: vehicle.route_key(),
            name: vehicle.display_name().to_string(),
            image: vehicle.primary_image().map(str::to_string),
            price: vehicle
                .price
                .map(|price| format_money(price, currency))
                .unwrap_or_else(|| "—".to_string()),
            base_price: format_money(vehicle.effective_base_price().unwrap_or_default(), currency),
            category: vehicle.category_name().to_string(),
            vehicle_type: vehicle.type_name().to_string(),
            ac: if vehicle.ac { "Yes" } else { "No" },
            description: vehicle
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_string(),
            seats: vehicle.seats.map(|n| n.to_string()).unwrap_or_else(|| "—".to_string()),
            doors: vehicle.doors.unwrap_or(4).to_string(),
            engine_cc: vehicle.engine_cc.unwrap_or(4000).to_string(),
        }
    }
}

/// Standalone message page
#[derive(Template)]
#[template(path = "notice.html")]
struct NoticeTemplate<'a> {
    title: &'a str,
    message: &'a str,
}

pub(crate) fn notice(status: StatusCode, title: &str, message: &str) -> Result<Response> {
    let html = NoticeTemplate { title, message }.render()?;
    Ok((status, Html(html)).into_response())
}
