//! Records returned by the remote rental API.
//!
//! The API is loose about JSON types: identifiers arrive as numbers or
//! strings, prices as numbers or numeric strings, and category-like fields
//! as either a plain string or an object with a `name`. Every such field is
//! resolved into a tagged union here, at deserialization, so the rest of the
//! crate never re-checks the shape.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

mod accessory;
mod location;
mod store;
mod vehicle;

pub use accessory::{default_catalog, Accessory};
pub use location::{Location, LocationKind, LocationRef, LocationReference};
pub use store::VehicleStore;
pub use vehicle::{Label, Vehicle};

/// Opaque backend identifier. The JSON type is kept so it can be echoed back
/// unchanged in the booking payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl Id {
    /// An id the backend would treat as unset: `0` or a blank string.
    pub fn is_empty(&self) -> bool {
        match self {
            Id::Number(n) => *n == 0,
            Id::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Number(value)
    }
}

/// Deserializers for fields the API sends with inconsistent JSON types.
pub(crate) mod lenient {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawScalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    fn decimal_from_f64(value: f64) -> Option<Decimal> {
        Decimal::from_str(&value.to_string())
            .ok()
            .or_else(|| Decimal::try_from(value).ok())
    }

    /// Money amount from a number or a numeric string. Anything else is
    /// treated as absent.
    pub fn amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawScalar>::deserialize(deserializer)?;
        Ok(raw.and_then(|raw| match raw {
            RawScalar::Int(n) => Some(Decimal::from(n)),
            RawScalar::Float(f) => decimal_from_f64(f),
            RawScalar::Text(s) => Decimal::from_str(s.trim()).ok(),
            RawScalar::Bool(_) => None,
        }))
    }

    fn whole(value: f64) -> Option<u32> {
        (value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX)).then(|| value.round() as u32)
    }

    /// Small count (seats, doors, engine size) from a number or a numeric
    /// string. Anything else is treated as absent.
    pub fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawScalar>::deserialize(deserializer)?;
        Ok(raw.and_then(|raw| match raw {
            RawScalar::Int(n) => u32::try_from(n).ok(),
            RawScalar::Float(f) => whole(f),
            RawScalar::Text(s) => {
                let s = s.trim();
                s.parse::<u32>().ok().or_else(|| s.parse::<f64>().ok().and_then(whole))
            }
            RawScalar::Bool(_) => None,
        }))
    }

    /// String key from a number or a string.
    pub fn key<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawScalar::deserialize(deserializer)?;
        Ok(match raw {
            RawScalar::Int(n) => n.to_string(),
            RawScalar::Float(f) => f.to_string(),
            RawScalar::Text(s) => s,
            RawScalar::Bool(b) => b.to_string(),
        })
    }

    /// Truthiness the way the API's JavaScript clients read it: `true`,
    /// any non-zero number, any non-empty string.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawScalar>::deserialize(deserializer)?;
        Ok(match raw {
            None => false,
            Some(RawScalar::Bool(b)) => b,
            Some(RawScalar::Int(n)) => n != 0,
            Some(RawScalar::Float(f)) => f != 0.0,
            Some(RawScalar::Text(s)) => !s.is_empty(),
        })
    }
}
