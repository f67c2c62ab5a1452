//! Optional rental add-ons

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::lenient;

/// Accessory offered for a vehicle
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Accessory {
    #[serde(deserialize_with = "lenient::key")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub per_day: bool,
}

impl Accessory {
    fn fixed(id: &str, name: &str, price: Decimal) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price: Some(price),
            per_day: false,
        }
    }
}

/// Built-in accessory list, used only when the API has none for a vehicle.
pub fn default_catalog() -> Vec<Accessory> {
    vec![
        Accessory::fixed("1", "Additional Driver", dec!(262.50)),
        Accessory::fixed("2", "SCDW Walkin (Monthly)", dec!(476.00)),
        Accessory::fixed("3", "Delivery Surcharge (Dubai)", dec!(52.50)),
        Accessory::fixed("4", "Collection Surcharges (Dubai)", dec!(52.50)),
        Accessory::fixed("5", "Child Seat - Monthly", dec!(262.50)),
    ]
}
