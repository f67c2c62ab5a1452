//! Pickup and return locations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Id;

/// Which location list an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Pickup,
    Return,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::Pickup => "pickup",
            LocationKind::Return => "return",
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location record from the locations endpoint. Every descriptive field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub emirate: Option<String>,
    #[serde(default)]
    pub emirate_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_map_id: Option<Id>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Location {
    /// The id, unless it is missing or blank.
    pub fn usable_id(&self) -> Option<&Id> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }

    /// Human readable label: name, district, state and emirate joined with
    /// commas, then the free-text `location` if it adds anything.
    pub fn display_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        parts.extend(present(&self.location_name));
        parts.extend(present(&self.district));
        parts.extend(present(&self.state));
        match present(&self.emirate_name) {
            Some(emirate) => parts.push(emirate),
            None => parts.extend(present(&self.emirate)),
        }
        if let Some(extra) = present(&self.location) {
            if !parts.contains(&extra) {
                parts.push(extra);
            }
        }

        if parts.is_empty() {
            self.id.as_ref().map(Id::to_string).unwrap_or_default()
        } else {
            parts.join(", ")
        }
    }
}

/// A location as carried through the booking flow: a known record, or a
/// free-text label when nothing better is available.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationRef {
    Label(String),
    Record(Location),
}

/// What the booking endpoint receives for a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocationReference {
    Id(Id),
    Label(String),
}

impl LocationRef {
    pub fn display(&self) -> String {
        match self {
            LocationRef::Label(label) => label.clone(),
            LocationRef::Record(record) => record.display_name(),
        }
    }

    /// The identifier for records that have one, the raw text otherwise.
    pub fn reference(&self) -> LocationReference {
        match self {
            LocationRef::Record(record) => match record.usable_id() {
                Some(id) => LocationReference::Id(id.clone()),
                None => LocationReference::Label(record.display_name()),
            },
            LocationRef::Label(label) => LocationReference::Label(label.clone()),
        }
    }

    /// Value carried in page forms so the location can be resolved again on
    /// the next step.
    pub fn form_value(&self) -> String {
        match self.reference() {
            LocationReference::Id(id) => id.to_string(),
            LocationReference::Label(label) => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Location {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_structured_location_uses_id() {
        let loc = LocationRef::Record(record(r#"{"id": "L1", "location_name": "Downtown"}"#));
        assert_eq!(loc.reference(), LocationReference::Id(Id::from("L1")));
        assert_eq!(serde_json::to_string(&loc.reference()).unwrap(), "\"L1\"");
    }

    #[test]
    fn test_plain_location_passes_through() {
        let loc = LocationRef::Label("Downtown".to_string());
        assert_eq!(loc.reference(), LocationReference::Label("Downtown".to_string()));
        assert_eq!(loc.display(), "Downtown");
    }

    #[test]
    fn test_numeric_id_stays_numeric_on_the_wire() {
        let loc = LocationRef::Record(record(r#"{"id": 7, "location_name": "Airport"}"#));
        assert_eq!(serde_json::to_string(&loc.reference()).unwrap(), "7");
        assert_eq!(loc.form_value(), "7");
    }

    #[test]
    fn test_record_without_id_falls_back_to_label() {
        let loc = LocationRef::Record(record(r#"{"id": "", "location_name": "Marina"}"#));
        assert_eq!(loc.reference(), LocationReference::Label("Marina".to_string()));
    }

    #[test]
    fn test_display_joins_parts() {
        let loc = record(
            r#"{
                "id": 3,
                "location_name": "Al Quoz Head Office",
                "district": "Al Quoz",
                "emirate": "DXB",
                "emirate_name": "Dubai",
                "location": "Dubai"
            }"#,
        );
        assert_eq!(loc.display_name(), "Al Quoz Head Office, Al Quoz, Dubai");
    }

    #[test]
    fn test_display_uses_emirate_code_and_extra_location() {
        let loc = record(r#"{"id": 4, "state": "Sharjah", "emirate": "SHJ", "location": "Gate 2"}"#);
        assert_eq!(loc.display_name(), "Sharjah, SHJ, Gate 2");
    }

    #[test]
    fn test_display_degrades_to_id() {
        assert_eq!(record(r#"{"id": 99}"#).display_name(), "99");
        assert_eq!(record("{}").display_name(), "");
    }
}
