//! `shelftally-report`
//!
//! **Responsibility:** rendering one reconciliation pass into the
//! fixed-structure analysis report, the convenience pipeline that drives
//! parse → reconcile → aggregate → render in one synchronous call, and the
//! standalone markdown events report.

pub mod events_report;
pub mod render;

pub use events_report::render_events_report;
pub use render::{render_report, run_pipeline, ReportInput};
