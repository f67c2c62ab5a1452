//! Vehicle records

use rust_decimal::Decimal;
use serde::Deserialize;

use super::{lenient, Id};

/// Category or body type: either a plain string or an object with a `name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    Named {
        #[serde(default)]
        name: Option<String>,
    },
}

impl Label {
    /// The label text, if there is a non-empty one.
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Label::Text(text) => Some(text.as_str()),
            Label::Named { name } => name.as_deref(),
        };
        name.filter(|n| !n.trim().is_empty())
    }
}

/// Vehicle from the search and detail endpoints
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    pub id: Id,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub vehicle_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub seats: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub doors: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub engine_cc: Option<u32>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<Label>,
    #[serde(default, rename = "type")]
    pub vehicle_type: Option<Label>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub ac: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub base_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub price: Option<Decimal>,
}

impl Vehicle {
    /// Key used in page URLs and detail/accessory lookups: the uuid when
    /// present, otherwise the id.
    pub fn route_key(&self) -> String {
        match self.uuid.as_deref().map(str::trim) {
            Some(uuid) if !uuid.is_empty() => uuid.to_string(),
            _ => self.id.to_string(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.vehicle_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Vehicle")
    }

    pub fn category_name(&self) -> &str {
        self.category.as_ref().and_then(Label::name).unwrap_or("4X4")
    }

    pub fn type_name(&self) -> &str {
        self.vehicle_type.as_ref().and_then(Label::name).unwrap_or("SUV")
    }

    /// Base rental price: `base_price`, falling back to `price`.
    pub fn effective_base_price(&self) -> Option<Decimal> {
        self.base_price.or(self.price)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .as_ref()
            .and_then(|images| images.first())
            .map(String::as_str)
            .filter(|src| !src.is_empty())
    }
}
