use serde::{Deserialize, Serialize};

use shelftally_core::ItemId;
use shelftally_ledger::AuditEvent;

/// One ledger mutation applied during a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedItem {
    pub item_id: ItemId,
    pub name: String,
    pub old_quantity: i64,
    pub new_quantity: i64,
    /// The detected quantity delta (always positive; pickups decrement).
    pub quantity_changed: i64,
}

/// Result bundle of one reconciliation pass.
///
/// Every field is a deterministic function of input order and ledger state:
/// `processed_events`, `updated_items` and `processing_log` preserve record
/// order; `total_records` counts all parsed records that entered the pass;
/// `inventory_changes` counts the records that mutated the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub message: String,
    pub processed_events: Vec<AuditEvent>,
    pub updated_items: Vec<UpdatedItem>,
    pub processing_log: Vec<String>,
    pub total_records: usize,
    pub inventory_changes: usize,
}
