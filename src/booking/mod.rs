//! Booking flow: pricing, date handling, renter form validation and
//! construction of the booking-creation request.

pub mod dates;
pub mod draft;
pub mod form;
pub mod payload;
pub mod pricing;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use dates::{DateError, RentalWindow};
pub use draft::{BookingDraft, SearchSelection};
pub use form::{FieldErrors, RenterForm};
pub use payload::{build_payload, BookingError, BookingRequest};
pub use pricing::{compute_total, format_money, price_breakdown, round_money, PriceBreakdown};
pub use services::SubmitError;
