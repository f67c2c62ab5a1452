//! Booking state carried from the vehicle page to submission.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use super::dates::RentalWindow;
use super::pricing::compute_total;
use crate::models::{Accessory, LocationRef, Vehicle};

/// What the customer picked on the search page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchSelection {
    pub pickup_location: Option<String>,
    pub return_location: Option<String>,
    pub window: RentalWindow,
}

impl SearchSelection {
    /// Both locations and every date/time present
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.pickup_location) && filled(&self.return_location) && self.window.is_complete()
    }

    /// Search endpoint parameters, skipping anything blank.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let candidates = [
            ("pickup_location", self.pickup_location.as_deref()),
            ("return_location", self.return_location.as_deref()),
            ("pickup_date", Some(self.window.pickup_date.as_str())),
            ("pickup_time", Some(self.window.pickup_time.as_str())),
            ("return_date", Some(self.window.return_date.as_str())),
            ("return_time", Some(self.window.return_time.as_str())),
        ];
        candidates
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.to_string()))
            })
            .collect()
    }
}

/// Everything needed to review and submit a booking
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub vehicle: Vehicle,
    pub pickup_location: LocationRef,
    pub return_location: LocationRef,
    pub window: RentalWindow,
    pub selected_accessories: BTreeSet<String>,
    pub total_price: Decimal,
}

impl BookingDraft {
    /// Build a draft, pricing the selection against `catalog`.
    pub fn new(
        vehicle: Vehicle,
        pickup_location: LocationRef,
        return_location: LocationRef,
        window: RentalWindow,
        selected_accessories: BTreeSet<String>,
        catalog: &[Accessory],
    ) -> Self {
        let total_price = compute_total(vehicle.effective_base_price(), &selected_accessories, catalog);
        Self {
            vehicle,
            pickup_location,
            return_location,
            window,
            selected_accessories,
            total_price,
        }
    }

    /// Catalog entries for the selected ids, in catalog order.
    pub fn chosen_accessories<'a>(&self, catalog: &'a [Accessory]) -> Vec<&'a Accessory> {
        catalog
            .iter()
            .filter(|accessory| self.selected_accessories.contains(&accessory.id))
            .collect()
    }
}
