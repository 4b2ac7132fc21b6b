use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Closed set of customer actions the model is prompted to report.
///
/// The raw field on [`InteractionRecord`] stays a string so unrecognized
/// action text survives to the processing log; dispatch happens on this enum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "picked up")]
    PickedUp,
    #[serde(rename = "put back")]
    PutBack,
    #[serde(rename = "examined")]
    Examined,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "picked up" => Some(Action::PickedUp),
            "put back" => Some(Action::PutBack),
            "examined" => Some(Action::Examined),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::PickedUp => "picked up",
            Action::PutBack => "put back",
            Action::Examined => "examined",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-level shape failure while constructing an [`InteractionRecord`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("interaction record must be a JSON object")]
    NotAnObject,

    #[error("field '{field}' has invalid type (expected {expected})")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unexpected field '{0}'")]
    UnexpectedField(String),
}

/// One parsed customer-product interaction, as reported by the vision model.
///
/// Transient: built per frame blob, consumed by reconciliation and pattern
/// aggregation, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub customer_gender: Option<String>,
    pub customer_age_range: Option<String>,
    pub action: Option<String>,
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: i64,
}

impl InteractionRecord {
    /// Validating constructor: builds a record from a loose JSON value,
    /// reporting exactly which field was malformed instead of failing
    /// generically.
    pub fn from_value(value: &JsonValue) -> Result<Self, RecordError> {
        let map = value.as_object().ok_or(RecordError::NotAnObject)?;

        for key in map.keys() {
            if !matches!(
                key.as_str(),
                "customer_gender" | "customer_age_range" | "action" | "product_name" | "quantity"
            ) {
                return Err(RecordError::UnexpectedField(key.clone()));
            }
        }

        Ok(Self {
            customer_gender: opt_string(map, "customer_gender")?,
            customer_age_range: opt_string(map, "customer_age_range")?,
            action: opt_string(map, "action")?,
            product_name: opt_string(map, "product_name")?,
            quantity: opt_integer(map, "quantity")?,
        })
    }

    /// The recognized action, if the raw action text matches the closed set.
    pub fn action(&self) -> Option<Action> {
        self.action.as_deref().and_then(Action::parse)
    }

    /// True when every field is null/empty (the model's "no clear
    /// interaction" answer).
    pub fn is_empty(&self) -> bool {
        self.customer_gender.is_none()
            && self.customer_age_range.is_none()
            && self.action.is_none()
            && self.product_name.is_none()
            && self.quantity == 0
    }
}

fn opt_string(
    map: &serde_json::Map<String, JsonValue>,
    field: &'static str,
) -> Result<Option<String>, RecordError> {
    match map.get(field) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RecordError::InvalidField {
            field,
            expected: "string or null",
        }),
    }
}

fn opt_integer(
    map: &serde_json::Map<String, JsonValue>,
    field: &'static str,
) -> Result<i64, RecordError> {
    match map.get(field) {
        None | Some(JsonValue::Null) => Ok(0),
        Some(JsonValue::Number(n)) => n.as_i64().ok_or(RecordError::InvalidField {
            field,
            expected: "integer",
        }),
        Some(_) => Err(RecordError::InvalidField {
            field,
            expected: "integer",
        }),
    }
}
