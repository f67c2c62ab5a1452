//! Booking review and submission

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;

use super::{ContextFields, VehicleView};
use crate::booking::format_money;
use crate::booking::payload::COUNTRY_REGION;
use crate::booking::requests::{DraftFields, SubmitBookingForm};
use crate::booking::services::{assemble_draft, submit_booking};
use crate::booking::{BookingDraft, FieldErrors, RenterForm, SubmitError};
use crate::error::Result;
use crate::models::Accessory;
use crate::AppState;

/// Accessory line in the order summary
#[derive(Debug, Clone)]
struct OrderLine {
    name: String,
    price: String,
}

#[derive(Template)]
#[template(path = "review.html")]
struct ReviewTemplate {
    vehicle: VehicleView,
    context: ContextFields,
    selected: Vec<String>,
    pickup_label: String,
    return_label: String,
    pickup_when: String,
    return_when: String,
    lines: Vec<OrderLine>,
    base_total: String,
    total: String,
    country: &'static str,
    form: RenterForm,
    errors: FieldErrors,
    submit_error: Option<String>,
}

impl ReviewTemplate {
    fn new(
        draft: &BookingDraft,
        catalog: &[Accessory],
        currency: &str,
        form: RenterForm,
        errors: FieldErrors,
        submit_error: Option<String>,
    ) -> Self {
        let money = |amount| format_money(amount, currency);
        Self {
            vehicle: VehicleView::new(&draft.vehicle, currency),
            context: ContextFields::from_draft(draft),
            selected: draft.selected_accessories.iter().cloned().collect(),
            pickup_label: draft.pickup_location.display(),
            return_label: draft.return_location.display(),
            pickup_when: draft.window.pickup_display(),
            return_when: draft.window.return_display(),
            lines: draft
                .chosen_accessories(catalog)
                .into_iter()
                .map(|accessory| OrderLine {
                    name: accessory.name.clone(),
                    price: money(accessory.price.unwrap_or_default()),
                })
                .collect(),
            base_total: money(draft.vehicle.effective_base_price().unwrap_or_default()),
            total: money(draft.total_price),
            country: COUNTRY_REGION,
            form,
            errors,
            submit_error,
        }
    }
}

#[derive(Template)]
#[template(path = "confirmed.html")]
struct ConfirmedTemplate {
    vehicle_name: String,
    total: String,
}

/// Review page for a draft posted from the vehicle page
pub async fn review(
    State(state): State<AppState>,
    Form(fields): Form<DraftFields>,
) -> Result<Html<String>> {
    let (draft, catalog) = assemble_draft(&state, &fields).await?;
    let template = ReviewTemplate::new(
        &draft,
        &catalog,
        &state.config.currency,
        RenterForm::default(),
        FieldErrors::default(),
        None,
    );
    Ok(Html(template.render()?))
}

/// Validate and submit. Validation problems come back as 422 with the form
/// re-rendered; a refused booking as 502 with the backend's message.
pub async fn submit(
    State(state): State<AppState>,
    Form(posted): Form<SubmitBookingForm>,
) -> Result<Response> {
    let (fields, renter) = posted.into_parts();
    let (draft, catalog) = assemble_draft(&state, &fields).await?;
    let currency = state.config.currency.as_str();

    let (status, errors, submit_error) = match submit_booking(&state, &renter, &draft).await {
        Ok(_) => {
            let template = ConfirmedTemplate {
                vehicle_name: draft.vehicle.display_name().to_string(),
                total: format_money(draft.total_price, currency),
            };
            return Ok(Html(template.render()?).into_response());
        }
        Err(SubmitError::Invalid(errors)) => (StatusCode::UNPROCESSABLE_ENTITY, errors, None),
        Err(SubmitError::Rejected(message)) => {
            (StatusCode::BAD_GATEWAY, FieldErrors::default(), Some(message))
        }
    };

    let template = ReviewTemplate::new(&draft, &catalog, currency, renter, errors, submit_error);
    Ok((status, Html(template.render()?)).into_response())
}
