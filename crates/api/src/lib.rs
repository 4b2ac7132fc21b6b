//! `shelftally-api`
//!
//! **Responsibility:** thin HTTP glue around the reconciliation core.
//!
//! The ledger and audit log live in one [`app::Session`] owned by the
//! process; handlers take the session lock for the duration of a request, so
//! at most one reconciliation pass runs at a time.

pub mod app;
