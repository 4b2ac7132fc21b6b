use std::sync::{Arc, Mutex};

use chrono::Utc;
use shelftally_ledger::{AuditEventKind, AuditLog, InventoryItem, InventoryLedger};

/// The process-owned mutable state: one ledger, one audit log.
///
/// Constructed at startup, torn down at process exit; persisted only when
/// the host asks for a snapshot. Handlers serialize access through the
/// session mutex; the core assumes a single writer per reconciliation pass.
#[derive(Debug, Default)]
pub struct Session {
    pub ledger: InventoryLedger,
    pub audit_log: AuditLog,
}

pub type SharedSession = Arc<Mutex<Session>>;

impl Session {
    pub fn new(ledger: InventoryLedger, audit_log: AuditLog) -> Self {
        Self { ledger, audit_log }
    }

    /// A small built-in shelf, used when no snapshot is configured.
    ///
    /// Each seeded item gets an initial-stock audit event.
    pub fn sample() -> Self {
        let mut session = Self::default();
        let items = [
            InventoryItem::new("item_001", "Grape Nuts", 50).with_price(4.99),
            InventoryItem::new("item_002", "Fibre 1", 30).with_price(3.49),
            InventoryItem::new("item_003", "Cheerios", 25).with_price(4.29),
            InventoryItem::new("item_004", "Oat Bran", 20).with_price(3.99),
        ];
        for item in items {
            let id = item.id.clone();
            let description = format!("Initial stock of {} unit(s) of '{}'.", item.quantity, item.name);
            session.ledger.insert(item);
            // Item was just inserted, so the invariant check cannot fail.
            let _ = session.audit_log.append_for_item(
                &session.ledger,
                AuditEventKind::InitialStock,
                description,
                id,
                Utc::now(),
            );
        }
        session
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }
}
