//! JSON snapshot persistence for the ledger and audit log.
//!
//! Snapshots are flat JSON objects keyed by id, matching the wire shapes the
//! HTTP layer serves. This is a host convenience for carrying state across
//! restarts, not a storage engine: no locking, no durability guarantees.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::audit::{AuditEvent, AuditLog};
use crate::item::InventoryItem;
use crate::ledger::InventoryLedger;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load ledger and audit log from two JSON files.
///
/// A missing file yields an empty store. Items are inserted in sorted-id
/// order so ledger iteration order is deterministic across loads.
pub fn load(
    inventory_path: impl AsRef<Path>,
    events_path: impl AsRef<Path>,
) -> Result<(InventoryLedger, AuditLog), SnapshotError> {
    let mut ledger = InventoryLedger::new();
    if inventory_path.as_ref().exists() {
        let text = std::fs::read_to_string(inventory_path)?;
        let items: BTreeMap<String, InventoryItem> = serde_json::from_str(&text)?;
        for item in items.into_values() {
            ledger.insert(item);
        }
    }

    let mut log = AuditLog::new();
    if events_path.as_ref().exists() {
        let text = std::fs::read_to_string(events_path)?;
        let events: BTreeMap<String, AuditEvent> = serde_json::from_str(&text)?;
        for event in events.into_values() {
            log.append(event);
        }
    }

    Ok((ledger, log))
}

/// Write ledger and audit log as pretty-printed JSON objects keyed by id.
pub fn save(
    ledger: &InventoryLedger,
    log: &AuditLog,
    inventory_path: impl AsRef<Path>,
    events_path: impl AsRef<Path>,
) -> Result<(), SnapshotError> {
    let items: BTreeMap<String, &InventoryItem> =
        ledger.iter().map(|i| (i.id.to_string(), i)).collect();
    std::fs::write(inventory_path, serde_json::to_string_pretty(&items)?)?;

    let events: BTreeMap<String, &AuditEvent> =
        log.iter().map(|e| (e.id.to_string(), e)).collect();
    std::fs::write(events_path, serde_json::to_string_pretty(&events)?)?;

    Ok(())
}

/// Shallow-merge two ledgers; on id collision the entry from `second` wins
/// (it replaces in place, keeping the first ledger's iteration position).
pub fn merge_ledgers(first: &InventoryLedger, second: &InventoryLedger) -> InventoryLedger {
    let mut merged = first.clone();
    for item in second.iter() {
        merged.insert(item.clone());
    }
    merged
}

/// Merge two audit logs, preferring `second` on id collision.
pub fn merge_audit_logs(first: &AuditLog, second: &AuditLog) -> AuditLog {
    let mut merged = AuditLog::new();
    for event in first.iter() {
        if second.get(&event.id).is_none() {
            merged.append(event.clone());
        }
    }
    for event in second.iter() {
        merged.append(event.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditEventKind;
    use chrono::Utc;

    fn temp_paths(tag: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let dir = std::env::temp_dir();
        (
            dir.join(format!("shelftally-inv-{tag}-{}.json", std::process::id())),
            dir.join(format!("shelftally-ev-{tag}-{}.json", std::process::id())),
        )
    }

    #[test]
    fn save_then_load_round_trips() {
        let (inv_path, ev_path) = temp_paths("roundtrip");

        let mut ledger = InventoryLedger::new();
        ledger.insert(InventoryItem::new("item-1", "Grape Nuts", 50).with_price(4.99));
        ledger.insert(InventoryItem::new("item-2", "Fibre 1", 30));

        let mut log = AuditLog::new();
        log.append(AuditEvent::new(
            AuditEventKind::InitialStock,
            "Initial stock recorded.",
            Some("item-1".into()),
            Utc::now(),
        ));

        save(&ledger, &log, &inv_path, &ev_path).unwrap();
        let (loaded_ledger, loaded_log) = load(&inv_path, &ev_path).unwrap();

        assert_eq!(loaded_ledger.len(), 2);
        assert_eq!(
            loaded_ledger.get(&"item-1".into()).unwrap().price,
            Some(4.99)
        );
        assert_eq!(loaded_log.len(), 1);

        let _ = std::fs::remove_file(inv_path);
        let _ = std::fs::remove_file(ev_path);
    }

    #[test]
    fn missing_files_load_as_empty_stores() {
        let (ledger, log) = load("/nonexistent/inventory.json", "/nonexistent/events.json").unwrap();
        assert!(ledger.is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn merge_prefers_second_on_collision() {
        let mut first = InventoryLedger::new();
        first.insert(InventoryItem::new("item-1", "Grape Nuts", 50));
        first.insert(InventoryItem::new("item-2", "Fibre 1", 30));

        let mut second = InventoryLedger::new();
        second.insert(InventoryItem::new("item-2", "Fibre One", 28));
        second.insert(InventoryItem::new("item-3", "Cheerios", 25));

        let merged = merge_ledgers(&first, &second);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get(&"item-2".into()).unwrap().name, "Fibre One");
        assert_eq!(merged.get(&"item-2".into()).unwrap().quantity, 28);
    }
}
