//! Vehicle search page

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Local;
use tracing::{info, warn};

use super::{ContextFields, VehicleView};
use crate::booking::dates::{format_short_date, format_time_12h, RentalWindow};
use crate::booking::requests::SearchQuery;
use crate::booking::services::load_locations;
use crate::error::Result;
use crate::models::{Location, LocationKind, VehicleStore};
use crate::AppState;

/// Shown when the vehicle search request fails
pub const SEARCH_FAILED: &str = "Failed to fetch vehicles";

/// Entry of a location dropdown
#[derive(Debug, Clone)]
struct LocationOption {
    value: String,
    label: String,
    selected: bool,
}

fn location_options(locations: &[Location], current: Option<&str>) -> Vec<LocationOption> {
    locations
        .iter()
        .filter_map(|location| {
            let value = location.usable_id()?.to_string();
            Some(LocationOption {
                selected: current == Some(value.as_str()),
                label: location.display_name(),
                value,
            })
        })
        .collect()
}

fn first_id(locations: &[Location]) -> Option<String> {
    locations.iter().find_map(|l| l.usable_id()).map(|id| id.to_string())
}

/// "Sun, Nov 16 10:00 AM" style summary for the search bar
fn summary(date: &str, time: &str) -> String {
    match format_time_12h(time) {
        Ok(time) => format!("{} {}", format_short_date(date), time),
        Err(_) => format_short_date(date),
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    context: ContextFields,
    pickup_options: Vec<LocationOption>,
    return_options: Vec<LocationOption>,
    pickup_summary: String,
    return_summary: String,
    vehicles: Vec<VehicleView>,
    open: Option<VehicleView>,
    searched: bool,
    error: Option<String>,
}

/// Search page: location and date pickers plus results
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>> {
    let (pickups, returns) = tokio::join!(
        load_locations(&state, LocationKind::Pickup),
        load_locations(&state, LocationKind::Return),
    );

    let open_key = query
        .open
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string);
    let defaults = RentalWindow::starting_at(Local::now().naive_local());
    let selection = query.into_selection(first_id(&pickups), first_id(&returns), defaults);

    let mut store = VehicleStore::default();
    let mut error = None;
    let searched = selection.is_complete();
    if searched {
        match state.api.search_vehicles(&selection).await {
            Ok(vehicles) => {
                info!("Vehicle search returned {} results", vehicles.len());
                store.set_vehicles(vehicles);
            }
            Err(e) => {
                warn!("Vehicle search failed: {}", e);
                error = Some(SEARCH_FAILED.to_string());
            }
        }
    }
    if let Some(key) = open_key.as_deref() {
        store.select_vehicle(key);
    }

    let currency = state.config.currency.as_str();
    let window = &selection.window;
    let template = HomeTemplate {
        pickup_options: location_options(&pickups, selection.pickup_location.as_deref()),
        return_options: location_options(&returns, selection.return_location.as_deref()),
        pickup_summary: summary(&window.pickup_date, &window.pickup_time),
        return_summary: summary(&window.return_date, &window.return_time),
        vehicles: store
            .vehicles()
            .iter()
            .map(|vehicle| VehicleView::new(vehicle, currency))
            .collect(),
        open: store.selected().map(|vehicle| VehicleView::new(vehicle, currency)),
        context: ContextFields::new(
            selection.pickup_location.clone().unwrap_or_default(),
            selection.return_location.clone().unwrap_or_default(),
            window,
        ),
        searched,
        error,
    };

    Ok(Html(template.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locations() -> Vec<Location> {
        serde_json::from_str(
            r#"[{"id": ""}, {"id": 1, "location_name": "Al Quoz"}, {"id": "2", "location_name": "Airport", "emirate_name": "Dubai"}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_first_id_skips_blank_ids() {
        assert_eq!(first_id(&locations()).as_deref(), Some("1"));
        assert_eq!(first_id(&[]), None);
    }

    #[test]
    fn test_location_options_mark_current() {
        let options = location_options(&locations(), Some("2"));
        assert_eq!(options.len(), 2);
        assert!(!options[0].selected);
        assert!(options[1].selected);
        assert_eq!(options[1].label, "Airport, Dubai");
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary("2025-11-16", "13:30"), "Sun, Nov 16 1:30 PM");
        assert_eq!(summary("", ""), "—");
    }
}
