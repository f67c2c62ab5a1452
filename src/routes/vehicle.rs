//! Vehicle detail page with accessory selection

use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Query;
use tracing::warn;

use super::{notice, ContextFields, VehicleView};
use crate::booking::format_money;
use crate::booking::pricing::price_breakdown;
use crate::booking::requests::VehicleQuery;
use crate::booking::services::{load_catalog, load_vehicle, resolve_location};
use crate::error::Result;
use crate::models::{Accessory, LocationKind};
use crate::AppState;

/// Checkbox row in the accessory list
#[derive(Debug, Clone)]
pub(crate) struct AccessoryOption {
    pub id: String,
    pub name: String,
    pub price: String,
    pub per_day: bool,
    pub checked: bool,
}

impl AccessoryOption {
    pub fn new(accessory: &Accessory, checked: bool, currency: &str) -> Self {
        Self {
            id: accessory.id.clone(),
            name: accessory.name.clone(),
            price: accessory
                .price
                .map(|price| format_money(price, currency))
                .unwrap_or_else(|| "—".to_string()),
            per_day: accessory.per_day,
            checked,
        }
    }
}

#[derive(Template)]
#[template(path = "vehicle.html")]
struct VehicleTemplate {
    vehicle: VehicleView,
    context: ContextFields,
    pickup_label: String,
    return_label: String,
    pickup_when: String,
    return_when: String,
    accessories: Vec<AccessoryOption>,
    base_total: String,
    accessories_total: String,
    total: String,
}

/// Vehicle detail page. Submitting the accessory form back here
/// recomputes the total.
pub async fn details(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<VehicleQuery>,
) -> Result<Response> {
    let vehicle = match load_vehicle(&state, &key).await {
        Ok(vehicle) => vehicle,
        Err(e) => {
            warn!("Vehicle {} not found: {}", key, e);
            return notice(StatusCode::NOT_FOUND, "Vehicle not found", "Vehicle not found");
        }
    };

    let pickup_raw = query.pickup_location();
    let return_raw = query.return_location();
    let (catalog, pickup, dropoff) = tokio::join!(
        load_catalog(&state, &key),
        resolve_location(&state, LocationKind::Pickup, &pickup_raw),
        resolve_location(&state, LocationKind::Return, &return_raw),
    );

    let selected = query.selected();
    let window = query.window();
    let breakdown = price_breakdown(vehicle.effective_base_price(), &selected, &catalog);
    let currency = state.config.currency.as_str();

    let template = VehicleTemplate {
        vehicle: VehicleView::new(&vehicle, currency),
        context: ContextFields::new(pickup.form_value(), dropoff.form_value(), &window),
        pickup_label: pickup.display(),
        return_label: dropoff.display(),
        pickup_when: window.pickup_display(),
        return_when: window.return_display(),
        accessories: catalog
            .iter()
            .map(|accessory| AccessoryOption::new(accessory, selected.contains(&accessory.id), currency))
            .collect(),
        base_total: format_money(breakdown.base, currency),
        accessories_total: format_money(breakdown.accessories, currency),
        total: format_money(breakdown.total, currency),
    };

    Ok(Html(template.render()?).into_response())
}
