//! Mapping from page state to the booking-creation request.

use rust_decimal::Decimal;
use serde::Serialize;

use super::dates::{combine_date_time, normalize_date, DateError};
use super::draft::BookingDraft;
use super::form::RenterForm;
use crate::models::{Id, LocationReference};

/// Fixed country sent with every booking
pub const COUNTRY_REGION: &str = "United Arab Emirates";

/// Body of `POST /api/booking/create/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub vehicle: Id,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub phone_number: String,
    pub email_address: String,
    pub address: String,
    pub country_region: String,
    pub driving_license_number: String,
    pub driving_license_expiry_on: String,
    pub driving_license_issuer: String,
    pub start_date: String,
    pub end_date: String,
    pub pickup_location: LocationReference,
    pub dropoff_location: LocationReference,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub selected_accessories: Vec<String>,
}

/// Payload construction failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("invalid {field}: {source}")]
    InvalidDate {
        field: &'static str,
        source: DateError,
    },
}

impl BookingError {
    /// Form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            BookingError::InvalidDate { field, .. } => *field,
        }
    }
}

fn date_field(field: &'static str, value: &str) -> Result<String, BookingError> {
    normalize_date(value).map_err(|source| BookingError::InvalidDate { field, source })
}

fn text(value: &str) -> String {
    value.trim().to_string()
}

fn timestamp_field(field: &'static str, date: &str, time: &str) -> Result<String, BookingError> {
    combine_date_time(date, time).map_err(|source| BookingError::InvalidDate { field, source })
}

/// Build the request body. Text fields are sent as typed (trimmed); dates
/// are normalized to ISO and any malformed date fails the whole build.
pub fn build_payload(form: &RenterForm, draft: &BookingDraft) -> Result<BookingRequest, BookingError> {
    Ok(BookingRequest {
        vehicle: draft.vehicle.id.clone(),
        first_name: text(&form.first_name),
        last_name: text(&form.last_name),
        date_of_birth: date_field("dob", &form.dob)?,
        nationality: text(&form.nationality),
        phone_number: text(&form.phone),
        email_address: text(&form.email),
        address: text(&form.address),
        country_region: COUNTRY_REGION.to_string(),
        driving_license_number: text(&form.license_number),
        driving_license_expiry_on: date_field("license_expiry", &form.license_expiry)?,
        driving_license_issuer: text(&form.license_issuer),
        start_date: timestamp_field("pickup_date", &draft.window.pickup_date, &draft.window.pickup_time)?,
        end_date: timestamp_field("return_date", &draft.window.return_date, &draft.window.return_time)?,
        pickup_location: draft.pickup_location.reference(),
        dropoff_location: draft.return_location.reference(),
        total_amount: draft.total_price,
        selected_accessories: draft.selected_accessories.iter().cloned().collect(),
    })
}
