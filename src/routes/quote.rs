//! JSON price quote endpoint

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use crate::booking::requests::QuoteRequest;
use crate::booking::responses::ErrorResponse;
use crate::booking::services;
use crate::error::AppError;
use crate::AppState;

/// Price breakdown for a vehicle and accessory selection
pub async fn quote(State(state): State<AppState>, Json(request): Json<QuoteRequest>) -> Response {
    match services::quote(&state, &request).await {
        Ok(quote) => Json(quote).into_response(),
        Err(e) => {
            let error_type = match &e {
                AppError::NotFound => "VehicleNotFound",
                AppError::Api(_) => "UpstreamError",
                AppError::Template(_) => "InternalError",
            };
            if !matches!(e, AppError::NotFound) {
                tracing::error!("Quote failed: {}", e);
            }
            let body = ErrorResponse {
                error_type: error_type.to_string(),
                message: e.public_message().to_string(),
            };
            (e.status(), Json(body)).into_response()
        }
    }
}
