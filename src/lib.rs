//! Customer-facing web frontend for a vehicle rental service.
//!
//! Customers search vehicles for a pickup/return location and period, open a
//! vehicle, pick accessories, fill in renter details and submit a booking.
//! All data lives behind a remote rental API; this crate renders pages,
//! prices the selection and builds the booking request.
//!
//! # Layout
//! - [`api`]: HTTP client for the rental API
//! - [`booking`]: pricing, dates, renter form validation, booking payload
//! - [`models`]: records returned by the API
//! - [`routes`]: axum handlers and askama templates
//! - [`cache`]: moka caches in front of the API

use std::sync::Arc;

pub mod api;
pub mod booking;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use api::{ApiClient, ApiError};
use cache::AppCache;
use config::Config;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub api: ApiClient,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_base_url, config.api_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            api,
            cache: AppCache::new(),
        })
    }
}
