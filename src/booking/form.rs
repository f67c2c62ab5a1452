//! Renter details collected on the review page.

use std::collections::BTreeMap;

use super::dates::parse_date;

pub const REQUIRED: &str = "Required";
pub const INVALID_DATE: &str = "Invalid date";
pub const TERMS_NOT_ACCEPTED: &str = "You must accept terms";

/// Free-text renter fields, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenterForm {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub nationality: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub license_number: String,
    pub license_expiry: String,
    pub license_issuer: String,
    pub terms_accepted: bool,
}

/// Validation messages keyed by form field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Message for a field, or an empty string. Used by templates.
    pub fn message(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl RenterForm {
    /// Presence check on every required field, plus a parse check on the
    /// two date fields. Address is optional.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        let required: [(&'static str, &str); 9] = [
            ("first_name", self.first_name.as_str()),
            ("last_name", self.last_name.as_str()),
            ("dob", self.dob.as_str()),
            ("nationality", self.nationality.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("license_number", self.license_number.as_str()),
            ("license_expiry", self.license_expiry.as_str()),
            ("license_issuer", self.license_issuer.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.insert(field, REQUIRED);
            }
        }

        for (field, value) in [("dob", &self.dob), ("license_expiry", &self.license_expiry)] {
            if !value.trim().is_empty() && parse_date(value).is_err() {
                errors.insert(field, INVALID_DATE);
            }
        }

        if !self.terms_accepted {
            errors.insert("terms", TERMS_NOT_ACCEPTED);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
