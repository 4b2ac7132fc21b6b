use chrono::{DateTime, Utc};
use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

/// Fields are optional so missing-field failures surface as explicit 400s
/// with the field names, not generic body-rejection errors.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub sku: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub sku: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "itemId")]
    pub item_id: Option<String>,
}

/// Body of `POST /api/analyze`: one raw model output per frame.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub frames: Vec<String>,
}
