//! `shelftally-ledger`
//!
//! **Responsibility:** the in-memory inventory ledger and the append-only
//! audit log, plus JSON snapshot load/save for hosts that want to carry state
//! across process restarts.
//!
//! The ledger is an explicitly owned value: constructed at session start,
//! handed by reference to every reconciliation pass, never process-global.
//! Callers embedding it in a concurrent host are responsible for serializing
//! access (one reconciliation pass at a time).

pub mod audit;
pub mod item;
pub mod ledger;
pub mod snapshot;

pub use audit::{AuditEvent, AuditEventKind, AuditLog};
pub use item::InventoryItem;
pub use ledger::{InventoryLedger, LedgerSnapshot};
