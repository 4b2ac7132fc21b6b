use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelftally_core::{AuditEventId, DomainError, DomainResult, ItemId};

use crate::ledger::InventoryLedger;

/// Closed set of audit event kinds.
///
/// Adding a kind is a compile-time decision: every consumer matches
/// exhaustively, and the wire labels below are stable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditEventKind {
    #[serde(rename = "Initial Stock")]
    InitialStock,
    #[serde(rename = "Manual Update")]
    ManualUpdate,
    #[serde(rename = "AI Detection: Item Removed")]
    AiDetectedRemoval,
    #[serde(rename = "AI Detection: Item Update")]
    AiDetectedUpdate,
}

impl AuditEventKind {
    /// Stable human-readable label (also the wire value).
    pub fn label(&self) -> &'static str {
        match self {
            AuditEventKind::InitialStock => "Initial Stock",
            AuditEventKind::ManualUpdate => "Manual Update",
            AuditEventKind::AiDetectedRemoval => "AI Detection: Item Removed",
            AuditEventKind::AiDetectedUpdate => "AI Detection: Item Update",
        }
    }

    /// Parse a free-text kind label, tolerating case differences.
    pub fn parse_label(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "initial stock" => Some(AuditEventKind::InitialStock),
            "manual update" => Some(AuditEventKind::ManualUpdate),
            "ai detection: item removed" => Some(AuditEventKind::AiDetectedRemoval),
            "ai detection: item update" => Some(AuditEventKind::AiDetectedUpdate),
            _ => None,
        }
    }
}

impl core::fmt::Display for AuditEventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry in the audit log.
///
/// Events are immutable facts: created once, never mutated, never destroyed
/// within the process lifetime. The `item_id` back-reference is weak: the
/// referenced item must exist when the event is created, but the event stays
/// valid regardless of what happens to the item afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: AuditEventId,
    #[serde(rename = "type")]
    pub kind: AuditEventKind,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(rename = "itemId", default)]
    pub item_id: Option<ItemId>,
}

impl AuditEvent {
    pub fn new(
        kind: AuditEventKind,
        description: impl Into<String>,
        item_id: Option<ItemId>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AuditEventId::new(),
            kind,
            timestamp,
            description: description.into(),
            item_id,
        }
    }
}

/// Append-only keyed store of [`AuditEvent`]s, preserving append order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditLog {
    events: HashMap<AuditEventId, AuditEvent>,
    order: Vec<AuditEventId>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event that carries no item back-reference (or whose
    /// reference was validated by the caller).
    pub fn append(&mut self, event: AuditEvent) -> AuditEventId {
        let id = event.id;
        self.order.push(id);
        self.events.insert(id, event);
        id
    }

    /// Append an event referencing an inventory item, enforcing the
    /// invariant that the item exists in the ledger at creation time.
    pub fn append_for_item(
        &mut self,
        ledger: &InventoryLedger,
        kind: AuditEventKind,
        description: impl Into<String>,
        item_id: ItemId,
        timestamp: DateTime<Utc>,
    ) -> DomainResult<AuditEventId> {
        if !ledger.contains(&item_id) {
            return Err(DomainError::invariant(format!(
                "audit event references unknown item '{item_id}'"
            )));
        }
        Ok(self.append(AuditEvent::new(kind, description, Some(item_id), timestamp)))
    }

    pub fn get(&self, id: &AuditEventId) -> Option<&AuditEvent> {
        self.events.get(id)
    }

    /// Iterate events in append order.
    pub fn iter(&self) -> impl Iterator<Item = &AuditEvent> {
        self.order.iter().filter_map(|id| self.events.get(id))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::InventoryItem;

    #[test]
    fn kind_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&AuditEventKind::AiDetectedRemoval).unwrap();
        assert_eq!(json, r#""AI Detection: Item Removed""#);
        let kind: AuditEventKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, AuditEventKind::AiDetectedRemoval);
    }

    #[test]
    fn parse_label_is_case_insensitive() {
        assert_eq!(
            AuditEventKind::parse_label("manual UPDATE"),
            Some(AuditEventKind::ManualUpdate)
        );
        assert_eq!(AuditEventKind::parse_label("restock"), None);
    }

    #[test]
    fn event_serializes_with_item_id_as_camel_case() {
        let event = AuditEvent::new(
            AuditEventKind::ManualUpdate,
            "Stock corrected after recount.",
            Some(ItemId::new("item-1")),
            Utc::now(),
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "Manual Update");
        assert_eq!(json["itemId"], "item-1");
        // ISO-8601 UTC with Z suffix.
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn append_for_item_rejects_unknown_items() {
        let mut ledger = InventoryLedger::new();
        ledger.insert(InventoryItem::new("item-1", "Grape Nuts", 50));
        let mut log = AuditLog::new();

        let ok = log.append_for_item(
            &ledger,
            AuditEventKind::InitialStock,
            "Initial stock recorded.",
            ItemId::new("item-1"),
            Utc::now(),
        );
        assert!(ok.is_ok());

        let err = log.append_for_item(
            &ledger,
            AuditEventKind::ManualUpdate,
            "Phantom item.",
            ItemId::new("item-99"),
            Utc::now(),
        );
        assert!(matches!(err, Err(DomainError::InvariantViolation(_))));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn iteration_preserves_append_order() {
        let mut log = AuditLog::new();
        for i in 0..5 {
            log.append(AuditEvent::new(
                AuditEventKind::ManualUpdate,
                format!("update {i}"),
                None,
                Utc::now(),
            ));
        }
        let descriptions: Vec<_> = log.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(
            descriptions,
            ["update 0", "update 1", "update 2", "update 3", "update 4"]
        );
    }
}
