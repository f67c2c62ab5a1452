//! HTTP client for the remote rental API.
//!
//! One method per endpoint. Each call is a single attempt: no retries, no
//! backoff. Callers decide what a failure means for the page.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::{extract_detail, ApiError};
use crate::booking::{BookingRequest, SearchSelection};
use crate::models::{Accessory, Location, LocationKind, Vehicle};

/// Client bound to one API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Vehicles available for the selection
    pub async fn search_vehicles(&self, selection: &SearchSelection) -> Result<Vec<Vehicle>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/vehicles/"))
            .query(&selection.query_params())
            .send()
            .await?;
        read_json(response).await
    }

    /// Single vehicle by route key (uuid)
    pub async fn vehicle_details(&self, key: &str) -> Result<Vehicle, ApiError> {
        let response = self
            .http
            .get(self.url("/api/vehicles/details/"))
            .query(&[("uuid", key)])
            .send()
            .await?;
        read_json(response).await
    }

    /// Accessories offered for a vehicle
    pub async fn accessories(&self, vehicle_key: &str) -> Result<Vec<Accessory>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/accessories/"))
            .query(&[("vehicle_uuid", vehicle_key)])
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn locations(&self, kind: LocationKind) -> Result<Vec<Location>, ApiError> {
        let response = self
            .http
            .get(self.url("/api/locations/"))
            .query(&[("type", kind.as_str())])
            .send()
            .await?;
        read_json(response).await
    }

    /// Submit a booking. Any 2xx is success; the body is not inspected.
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/booking/create/"))
            .json(request)
            .send()
            .await?;
        ensure_success(response).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!("Rental API error {}: {}", status, body);
    Err(ApiError::Status {
        status: status.as_u16(),
        detail: extract_detail(&body),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
