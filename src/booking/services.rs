//! Booking service functions with API and cache access.
//!
//! Route handlers call these; they in turn use the cache, the API client
//! and the pure functions in the sibling modules.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::draft::BookingDraft;
use super::form::{FieldErrors, RenterForm, INVALID_DATE};
use super::payload::{build_payload, BookingRequest};
use super::pricing::price_breakdown;
use super::requests::{DraftFields, QuoteRequest};
use super::responses::{MoneyResponse, QuoteResponse};
use crate::api::{ApiError, BOOKING_FAILED};
use crate::error::AppError;
use crate::models::{default_catalog, Accessory, Id, Location, LocationKind, LocationRef, Vehicle};
use crate::AppState;

/// Why a booking was not submitted
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// Form problems; the backend was not contacted
    Invalid(FieldErrors),
    /// The backend refused or could not be reached
    Rejected(String),
}

/// Location list for a kind. A failed fetch yields an empty list and is not
/// cached.
pub async fn load_locations(state: &AppState, kind: LocationKind) -> Arc<Vec<Location>> {
    if let Some(cached) = state.cache.locations.get(&kind).await {
        debug!("Cache HIT for {} locations", kind);
        return cached;
    }
    debug!("Cache MISS for {} locations", kind);

    match state.api.locations(kind).await {
        Ok(locations) => {
            let locations = Arc::new(locations);
            state.cache.locations.insert(kind, locations.clone()).await;
            locations
        }
        Err(e) => {
            warn!("Failed to fetch {} locations: {}", kind, e);
            Arc::new(Vec::new())
        }
    }
}

/// Find a location by the id text carried in a form.
pub fn find_location<'a>(locations: &'a [Location], raw: &str) -> Option<&'a Location> {
    locations
        .iter()
        .find(|location| location.usable_id().is_some_and(|id| id.to_string() == raw))
}

/// Match a carried form value against a location list. Known ids become
/// their record. With no list to check against, a numeric value is kept as
/// a numeric id so the booking payload keeps its JSON type.
pub fn location_from_form(locations: &[Location], raw: &str) -> LocationRef {
    let raw = raw.trim();
    if let Some(location) = find_location(locations, raw) {
        return LocationRef::Record(location.clone());
    }
    match raw.parse::<i64>() {
        Ok(id) if locations.is_empty() && id != 0 => LocationRef::Record(Location {
            id: Some(Id::Number(id)),
            ..Location::default()
        }),
        _ => LocationRef::Label(raw.to_string()),
    }
}

pub async fn resolve_location(state: &AppState, kind: LocationKind, raw: &str) -> LocationRef {
    let locations = load_locations(state, kind).await;
    location_from_form(&locations, raw)
}

pub async fn load_vehicle(state: &AppState, key: &str) -> Result<Arc<Vehicle>, ApiError> {
    if let Some(cached) = state.cache.vehicles.get(key).await {
        debug!("Cache HIT for vehicle: {}", key);
        return Ok(cached);
    }
    debug!("Cache MISS for vehicle: {}", key);

    let vehicle = Arc::new(state.api.vehicle_details(key).await?);
    state.cache.vehicles.insert(key.to_string(), vehicle.clone()).await;
    Ok(vehicle)
}

/// Accessories for a vehicle. The API list is authoritative; the built-in
/// catalog is used only when the API has nothing to offer.
pub async fn load_catalog(state: &AppState, key: &str) -> Arc<Vec<Accessory>> {
    if let Some(cached) = state.cache.accessories.get(key).await {
        debug!("Cache HIT for accessories: {}", key);
        return cached;
    }
    debug!("Cache MISS for accessories: {}", key);

    match state.api.accessories(key).await {
        Ok(accessories) if !accessories.is_empty() => {
            let accessories = Arc::new(accessories);
            state.cache.accessories.insert(key.to_string(), accessories.clone()).await;
            accessories
        }
        Ok(_) => {
            info!("No accessories listed for vehicle {}, using built-in catalog", key);
            Arc::new(default_catalog())
        }
        Err(e) => {
            warn!("Failed to fetch accessories for vehicle {}: {}; using built-in catalog", key, e);
            Arc::new(default_catalog())
        }
    }
}

/// A missing vehicle is a 404; anything else is the API failing.
fn vehicle_lookup_error(error: ApiError) -> AppError {
    match error {
        ApiError::Status { status: 404, .. } => AppError::NotFound,
        other => AppError::Api(other),
    }
}

/// Rebuild the booking draft from posted fields. The total is always
/// recomputed here from the current vehicle and catalog.
pub async fn assemble_draft(
    state: &AppState,
    fields: &DraftFields,
) -> Result<(BookingDraft, Arc<Vec<Accessory>>), AppError> {
    let key = fields.vehicle.trim();
    if key.is_empty() {
        return Err(AppError::NotFound);
    }

    let vehicle = load_vehicle(state, key).await.map_err(|e| {
        warn!("Vehicle {} unavailable for booking: {}", key, e);
        vehicle_lookup_error(e)
    })?;

    let (catalog, pickup, dropoff) = tokio::join!(
        load_catalog(state, key),
        resolve_location(state, LocationKind::Pickup, &fields.pickup_location),
        resolve_location(state, LocationKind::Return, &fields.return_location),
    );

    let draft = BookingDraft::new(
        (*vehicle).clone(),
        pickup,
        dropoff,
        fields.window(),
        fields.selected(),
        &catalog,
    );
    Ok((draft, catalog))
}

/// Validate, build the payload and send it.
pub async fn submit_booking(
    state: &AppState,
    form: &RenterForm,
    draft: &BookingDraft,
) -> Result<BookingRequest, SubmitError> {
    form.validate().map_err(SubmitError::Invalid)?;

    let request = build_payload(form, draft).map_err(|e| {
        debug!("Booking payload rejected: {}", e);
        let mut errors = FieldErrors::default();
        errors.insert(e.field(), INVALID_DATE);
        SubmitError::Invalid(errors)
    })?;

    if let Err(e) = state.api.create_booking(&request).await {
        warn!("Booking for vehicle {} failed: {}", request.vehicle, e);
        // Price or availability may have changed; fetch fresh on the next view
        state.cache.invalidate_vehicle(&draft.vehicle.route_key()).await;
        return Err(SubmitError::Rejected(e.user_message(BOOKING_FAILED)));
    }

    info!("Booking submitted for vehicle {}", request.vehicle);
    Ok(request)
}

/// Price breakdown for the quote endpoint
pub async fn quote(state: &AppState, request: &QuoteRequest) -> Result<QuoteResponse, AppError> {
    let key = request.vehicle.trim();
    if key.is_empty() {
        return Err(AppError::NotFound);
    }

    let vehicle = load_vehicle(state, key).await.map_err(vehicle_lookup_error)?;
    let catalog = load_catalog(state, key).await;
    let selected = request.selected();
    let breakdown = price_breakdown(vehicle.effective_base_price(), &selected, &catalog);
    let currency = state.config.currency.as_str();

    Ok(QuoteResponse {
        vehicle: vehicle.route_key(),
        base_price: MoneyResponse::new(breakdown.base, currency),
        accessories: MoneyResponse::new(breakdown.accessories, currency),
        total: MoneyResponse::new(breakdown.total, currency),
        selected_accessories: selected.into_iter().collect(),
    })
}
