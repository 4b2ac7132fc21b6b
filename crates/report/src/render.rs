use chrono::{DateTime, SecondsFormat, Utc};

use shelftally_ledger::{AuditLog, InventoryLedger, LedgerSnapshot};
use shelftally_reconcile::{aggregate, reconcile, PatternSummary, ReconciliationResult};
use shelftally_vision::parse_frames;

/// Everything the formatter needs; assembled by [`run_pipeline`] or by a
/// host that ran the stages itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
    pub generated_at: DateTime<Utc>,
    pub initial: LedgerSnapshot,
    pub result: ReconciliationResult,
    pub patterns: PatternSummary,
    pub final_state: LedgerSnapshot,
}

/// Run the full analysis pipeline over raw frame outputs and render the
/// report.
///
/// One synchronous pass: snapshot, parse, reconcile (mutating `ledger` and
/// appending to `audit_log`), aggregate, snapshot again, render. Parser
/// warnings are emitted via `tracing`; the report is always produced.
pub fn run_pipeline(
    blobs: &[String],
    ledger: &mut InventoryLedger,
    audit_log: &mut AuditLog,
) -> String {
    let initial = ledger.snapshot();
    let batch = parse_frames(blobs);
    let result = reconcile(&batch.values, ledger, audit_log);
    let patterns = aggregate(&batch.values);
    let final_state = ledger.snapshot();

    render_report(&ReportInput {
        generated_at: Utc::now(),
        initial,
        result,
        patterns,
        final_state,
    })
}

/// Render the fixed-structure analysis report.
///
/// Section order is part of the contract; two invocations with identical
/// inputs produce identical output modulo `generated_at`.
pub fn render_report(input: &ReportInput) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=== SHOPPING EVENT ANALYSIS REPORT ===".to_string());
    lines.push(format!(
        "Generated: {}",
        input.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    lines.push(String::new());

    lines.push("=== INITIAL INVENTORY ===".to_string());
    push_inventory(&mut lines, &input.initial);

    lines.push(String::new());
    lines.push("=== PROCESSING EVENTS ===".to_string());
    lines.push(format!("Message: {}", input.result.message));
    lines.push(format!(
        "Total events processed: {}",
        input.result.total_records
    ));
    lines.push(format!(
        "Inventory changes: {}",
        input.result.inventory_changes
    ));

    lines.push(String::new());
    lines.push("=== PROCESSING LOG ===".to_string());
    for entry in &input.result.processing_log {
        lines.push(format!("- {entry}"));
    }

    lines.push(String::new());
    lines.push("=== PROCESSED EVENTS ===".to_string());
    if input.result.processed_events.is_empty() {
        lines.push("No events processed that affected inventory.".to_string());
    } else {
        for event in &input.result.processed_events {
            lines.push(format!("Event ID: {}", event.id));
            lines.push(format!("Type: {}", event.kind));
            lines.push(format!("Description: {}", event.description));
            lines.push(format!(
                "Timestamp: {}",
                event.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
            ));
            lines.push("---".to_string());
        }
    }

    lines.push(String::new());
    lines.push("=== UPDATED ITEMS ===".to_string());
    if input.result.updated_items.is_empty() {
        lines.push("No inventory items were updated.".to_string());
    } else {
        for item in &input.result.updated_items {
            lines.push(format!("Item: {}", item.name));
            lines.push(format!(
                "Quantity changed: {} → {} (-{})",
                item.old_quantity, item.new_quantity, item.quantity_changed
            ));
            lines.push("---".to_string());
        }
    }

    lines.push(String::new());
    lines.push("=== CUSTOMER PATTERNS ===".to_string());
    for (title, distribution) in input.patterns.categories() {
        if distribution.is_empty() {
            continue;
        }
        let listing: Vec<String> = distribution
            .iter()
            .map(|(key, count)| format!("{key}: {count}"))
            .collect();
        lines.push(format!("{title}: {}", listing.join(", ")));
    }

    lines.push(String::new());
    lines.push("=== FINAL INVENTORY ===".to_string());
    push_inventory(&mut lines, &input.final_state);

    lines.push(String::new());
    lines.push("=== SUMMARY STATISTICS ===".to_string());
    lines.push(format!(
        "Total inventory items: {}",
        input.final_state.total_items()
    ));
    lines.push(format!(
        "Total remaining stock: {}",
        input.final_state.total_stock()
    ));
    lines.push(format!(
        "Events that changed inventory: {}",
        input.result.updated_items.len()
    ));
    lines.push(format!(
        "Total events analyzed: {}",
        input.result.total_records
    ));

    lines.join("\n")
}

fn push_inventory(lines: &mut Vec<String>, snapshot: &LedgerSnapshot) {
    for item in &snapshot.items {
        lines.push(format!(
            "{}: {} - Quantity: {}",
            item.id, item.name, item.quantity
        ));
    }
}
