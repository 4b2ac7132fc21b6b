//! Standalone markdown report over a batch of detected events, independent
//! of the ledger: a detail table, per-product pickup/put-back totals, and
//! high-level metrics.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};

use shelftally_vision::{Action, InteractionRecord};

#[derive(Debug, Default, Clone, Copy)]
struct ProductTotals {
    picked_up: i64,
    put_back: i64,
}

/// Render the markdown events report.
///
/// Unlike [`crate::render_report`], the per-product summary here is
/// quantity-weighted: a record picking up 3 units contributes 3 to that
/// product's "Picked Up" column. Net change is put-back minus picked-up, so
/// a positive value means the shelf gained stock.
pub fn render_events_report(
    records: &[InteractionRecord],
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("## Inventory Events Report".to_string());
    lines.push(String::new());
    lines.push(format!(
        "Generated: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    lines.push(String::new());

    if records.is_empty() {
        lines.push("No events were detected.".to_string());
        return lines.join("\n");
    }

    lines.push("### Detected Events".to_string());
    lines.push(String::new());
    lines.push("| # | Gender | Age Range | Action | Product | Quantity |".to_string());
    lines.push("|---:|:------:|:---------:|:------:|:--------|--------:|".to_string());
    for (idx, record) in records.iter().enumerate() {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            idx + 1,
            record.customer_gender.as_deref().unwrap_or(""),
            record.customer_age_range.as_deref().unwrap_or(""),
            record.action.as_deref().unwrap_or(""),
            record.product_name.as_deref().unwrap_or(""),
            record.quantity,
        ));
    }
    lines.push(String::new());

    // Per-product totals, keyed by trimmed name (sorted by the BTreeMap).
    let mut by_product: BTreeMap<String, ProductTotals> = BTreeMap::new();
    for record in records {
        let product = record
            .product_name
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or("(unknown)")
            .to_string();
        let totals = by_product.entry(product).or_default();
        match record.action() {
            Some(Action::PickedUp) => totals.picked_up += record.quantity,
            Some(Action::PutBack) => totals.put_back += record.quantity,
            Some(Action::Examined) | None => {}
        }
    }

    lines.push("### Summary by Product".to_string());
    lines.push(String::new());
    lines.push("| Product | Picked Up | Put Back | Net Change |".to_string());
    lines.push("|:--------|----------:|---------:|-----------:|".to_string());
    for (product, totals) in &by_product {
        let net = totals.put_back - totals.picked_up;
        lines.push(format!(
            "| {product} | {} | {} | {net} |",
            totals.picked_up, totals.put_back
        ));
    }
    lines.push(String::new());

    let total_picked: i64 = by_product.values().map(|t| t.picked_up).sum();
    let total_put_back: i64 = by_product.values().map(|t| t.put_back).sum();

    lines.push("### Key Metrics".to_string());
    lines.push(String::new());
    lines.push(format!("- Total events: {}", records.len()));
    lines.push(format!("- Total units picked up: {total_picked}"));
    lines.push(format!("- Total units put back: {total_put_back}"));
    lines.push(format!(
        "- Net shelf change (units): {}",
        total_put_back - total_picked
    ));

    lines.join("\n")
}
