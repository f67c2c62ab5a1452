//! Request DTOs for page forms and the quote endpoint.
//!
//! Booking state moves between pages as plain form fields. Every field
//! defaults to empty so a partial form still deserializes and the handler
//! decides what is missing.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer};

use super::dates::RentalWindow;
use super::draft::SearchSelection;
use super::form::RenterForm;

/// Location shown on the vehicle page when none was carried over
pub const FALLBACK_LOCATION: &str = "Dubai Al Quoz Head Office";
const FALLBACK_PICKUP_DATE: &str = "2025-11-16";
const FALLBACK_PICKUP_TIME: &str = "10:00";
const FALLBACK_RETURN_DATE: &str = "2025-12-14";
const FALLBACK_RETURN_TIME: &str = "08:00";

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn or_default(value: Option<String>, default: &str) -> String {
    non_blank(value).unwrap_or_else(|| default.to_string())
}

/// HTML checkbox: present with any value other than an explicit "off"
/// means checked.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value.as_deref().map(str::trim) {
        None | Some("") => false,
        Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "off" | "false" | "0"),
    })
}

/// Query string of the search page
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub return_location: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub return_time: Option<String>,
    /// Route key of the vehicle whose details panel is open
    #[serde(default)]
    pub open: Option<String>,
}

impl SearchQuery {
    /// Fill anything the customer left out from the given defaults.
    pub fn into_selection(
        self,
        default_pickup: Option<String>,
        default_return: Option<String>,
        defaults: RentalWindow,
    ) -> SearchSelection {
        SearchSelection {
            pickup_location: non_blank(self.pickup_location).or(default_pickup),
            return_location: non_blank(self.return_location).or(default_return),
            window: RentalWindow {
                pickup_date: or_default(self.pickup_date, &defaults.pickup_date),
                pickup_time: or_default(self.pickup_time, &defaults.pickup_time),
                return_date: or_default(self.return_date, &defaults.return_date),
                return_time: or_default(self.return_time, &defaults.return_time),
            },
        }
    }
}

/// Query string of the vehicle page
#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuery {
    #[serde(default)]
    pub pickup_location: Option<String>,
    #[serde(default)]
    pub return_location: Option<String>,
    #[serde(default)]
    pub pickup_date: Option<String>,
    #[serde(default)]
    pub pickup_time: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub return_time: Option<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
}

impl VehicleQuery {
    pub fn pickup_location(&self) -> String {
        or_default(self.pickup_location.clone(), FALLBACK_LOCATION)
    }

    pub fn return_location(&self) -> String {
        or_default(self.return_location.clone(), FALLBACK_LOCATION)
    }

    pub fn window(&self) -> RentalWindow {
        RentalWindow {
            pickup_date: or_default(self.pickup_date.clone(), FALLBACK_PICKUP_DATE),
            pickup_time: or_default(self.pickup_time.clone(), FALLBACK_PICKUP_TIME),
            return_date: or_default(self.return_date.clone(), FALLBACK_RETURN_DATE),
            return_time: or_default(self.return_time.clone(), FALLBACK_RETURN_TIME),
        }
    }

    pub fn selected(&self) -> BTreeSet<String> {
        selected_ids(&self.accessories)
    }
}

fn selected_ids(ids: &[String]) -> BTreeSet<String> {
    ids.iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Booking draft as posted from the vehicle page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftFields {
    #[serde(default)]
    pub vehicle: String,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub return_location: String,
    #[serde(default)]
    pub pickup_date: String,
    #[serde(default)]
    pub pickup_time: String,
    #[serde(default)]
    pub return_date: String,
    #[serde(default)]
    pub return_time: String,
    #[serde(default)]
    pub accessories: Vec<String>,
}

impl DraftFields {
    pub fn window(&self) -> RentalWindow {
        RentalWindow {
            pickup_date: self.pickup_date.trim().to_string(),
            pickup_time: self.pickup_time.trim().to_string(),
            return_date: self.return_date.trim().to_string(),
            return_time: self.return_time.trim().to_string(),
        }
    }

    pub fn selected(&self) -> BTreeSet<String> {
        selected_ids(&self.accessories)
    }
}

/// Review page submission: the carried draft plus the renter form
#[derive(Debug, Default, Deserialize)]
pub struct SubmitBookingForm {
    #[serde(default)]
    pub vehicle: String,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub return_location: String,
    #[serde(default)]
    pub pickup_date: String,
    #[serde(default)]
    pub pickup_time: String,
    #[serde(default)]
    pub return_date: String,
    #[serde(default)]
    pub return_time: String,
    #[serde(default)]
    pub accessories: Vec<String>,

    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub license_expiry: String,
    #[serde(default)]
    pub license_issuer: String,
    #[serde(default, deserialize_with = "checkbox")]
    pub terms_accepted: bool,
}

impl SubmitBookingForm {
    pub fn into_parts(self) -> (DraftFields, RenterForm) {
        let draft = DraftFields {
            vehicle: self.vehicle,
            pickup_location: self.pickup_location,
            return_location: self.return_location,
            pickup_date: self.pickup_date,
            pickup_time: self.pickup_time,
            return_date: self.return_date,
            return_time: self.return_time,
            accessories: self.accessories,
        };
        let renter = RenterForm {
            first_name: self.first_name,
            last_name: self.last_name,
            dob: self.dob,
            nationality: self.nationality,
            phone: self.phone,
            email: self.email,
            address: self.address,
            license_number: self.license_number,
            license_expiry: self.license_expiry,
            license_issuer: self.license_issuer,
            terms_accepted: self.terms_accepted,
        };
        (draft, renter)
    }
}

/// Body of `POST /api/quote`
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub vehicle: String,
    #[serde(default)]
    pub accessories: Vec<String>,
}

impl QuoteRequest {
    pub fn selected(&self) -> BTreeSet<String> {
        selected_ids(&self.accessories)
    }
}
