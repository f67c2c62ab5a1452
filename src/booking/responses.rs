//! Response DTOs for the JSON endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cache::CacheStats;

/// Money value for JSON responses
#[derive(Debug, Clone, Serialize)]
pub struct MoneyResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub currency: String,
}

impl MoneyResponse {
    pub fn new(amount: Decimal, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
        }
    }
}

/// Response for a price quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub vehicle: String,
    pub base_price: MoneyResponse,
    pub accessories: MoneyResponse,
    pub total: MoneyResponse,
    pub selected_accessories: Vec<String>,
}

/// Generic error response for JSON endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: String,
    pub message: String,
}

/// Response for the health endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub api_base_url: String,
    pub cache: CacheStats,
}
