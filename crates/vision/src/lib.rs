//! `shelftally-vision`
//!
//! **Responsibility:** the boundary to the external vision model and the
//! parsing of its output into typed interaction records.
//!
//! This crate is intentionally **not** part of the domain model:
//! - It never touches the ledger or audit log.
//! - The model itself is an opaque external dependency behind
//!   [`FrameAnalyzer`]; no client implementation lives here.

pub mod analyzer;
pub mod parser;
pub mod record;

pub use analyzer::{AnalyzerError, FrameAnalyzer, SHELF_PROMPT};
pub use parser::{parse_frames, ParsedBatch};
pub use record::{Action, InteractionRecord, RecordError};
