//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no network access.

use std::collections::BTreeSet;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::models::Accessory;

/// Round to specified decimal places, halves away from zero.
///
/// Totals are stored unrounded; rounding only happens when a value is shown.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use carhire_web::booking::round_money;
///
/// assert_eq!(round_money(dec!(52.505), 2), dec!(52.51));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Display form: currency code and exactly two decimals, e.g. "AED 262.50".
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let mut rounded = round_money(amount, 2);
    rounded.rescale(2);
    format!("{} {}", currency, rounded)
}

/// Sum of the prices of the selected accessories.
///
/// Ids with no catalog entry, and entries without a price, add nothing. A
/// price that would overflow the running sum is skipped.
pub fn accessories_total(selected: &BTreeSet<String>, catalog: &[Accessory]) -> Decimal {
    selected
        .iter()
        .filter_map(|id| catalog.iter().find(|accessory| &accessory.id == id))
        .filter_map(|accessory| accessory.price)
        .fold(Decimal::ZERO, |sum, price| sum.checked_add(price).unwrap_or(sum))
}

/// Base price plus the selected accessories. An absent base price counts
/// as zero; so do accessories when adding them would overflow.
pub fn compute_total(
    base_price: Option<Decimal>,
    selected: &BTreeSet<String>,
    catalog: &[Accessory],
) -> Decimal {
    let base = base_price.unwrap_or(Decimal::ZERO);
    base.checked_add(accessories_total(selected, catalog)).unwrap_or(base)
}

/// Price summary shown under the accessory list
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub base: Decimal,
    pub accessories: Decimal,
    pub total: Decimal,
}

pub fn price_breakdown(
    base_price: Option<Decimal>,
    selected: &BTreeSet<String>,
    catalog: &[Accessory],
) -> PriceBreakdown {
    let base = base_price.unwrap_or(Decimal::ZERO);
    let accessories = accessories_total(selected, catalog);
    PriceBreakdown {
        base,
        accessories,
        total: compute_total(base_price, selected, catalog),
    }
}
