//! `shelftally-reconcile`
//!
//! **Responsibility:** applying parsed interaction records to the inventory
//! ledger (with audit trail) and aggregating batch-level behavior patterns.
//!
//! One reconciliation pass is single-threaded and synchronous: one terminal
//! decision per record, in input order, no partial-batch abort. Hosts embed
//! the pass behind their own serialization (one pass at a time per ledger).

pub mod engine;
pub mod matcher;
pub mod patterns;
pub mod result;

pub use engine::reconcile;
pub use matcher::NameMatch;
pub use patterns::{aggregate, PatternSummary};
pub use result::{ReconciliationResult, UpdatedItem};
