//! Errors from the remote rental API

/// Shown when a booking is rejected without a usable `detail`
pub const BOOKING_FAILED: &str = "Failed to submit booking. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to rental API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Rental API responded with status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("Unexpected response from rental API: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The backend's own explanation, when it sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message for the customer: the backend detail, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// Pull a non-empty string `detail` out of an error body. Anything else
/// (HTML error pages, other shapes) yields `None`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
