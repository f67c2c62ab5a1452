//! Remote rental API: vehicle search, details, accessories, locations and
//! booking creation.

mod client;
mod error;

pub use client::ApiClient;
pub use error::{extract_detail, ApiError, BOOKING_FAILED};
