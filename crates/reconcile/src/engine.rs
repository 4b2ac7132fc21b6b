use chrono::Utc;
use serde_json::Value as JsonValue;

use shelftally_ledger::{AuditEventKind, AuditLog, InventoryLedger};
use shelftally_vision::{Action, InteractionRecord};

use crate::matcher::NameMatch;
use crate::result::{ReconciliationResult, UpdatedItem};

/// Apply one batch of parsed interaction records to the ledger.
///
/// One terminal decision per record, in input order:
/// - a recognized pickup with a matched product decrements stock (no floor at
///   zero; a negative result is preserved as an over-reconciliation signal)
///   and appends an audit event;
/// - everything else only logs. "put back" deliberately does not restock
///   (pending product-owner confirmation).
///
/// Per-record failures are recovered into log lines; the pass never aborts.
pub fn reconcile(
    values: &[JsonValue],
    ledger: &mut InventoryLedger,
    audit_log: &mut AuditLog,
) -> ReconciliationResult {
    let mut processed_events = Vec::new();
    let mut updated_items = Vec::new();
    let mut processing_log = Vec::new();

    for value in values {
        let record = match InteractionRecord::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                processing_log.push(format!("Error processing event: {e}"));
                continue;
            }
        };

        // An all-null record carries nothing worth matching on.
        if record.is_empty() {
            processing_log.push("Skipped: Event contains null/empty data.".to_string());
            continue;
        }

        let product = record.product_name.as_deref().unwrap_or("");
        let quantity = record.quantity;

        match record.action() {
            Some(Action::PickedUp) if !product.is_empty() && quantity > 0 => {
                let Some(item_id) = NameMatch::first_substring(ledger, product) else {
                    processing_log.push(format!(
                        "Skipped: AI detected an event for product '{product}', \
                         but it was not found in inventory."
                    ));
                    continue;
                };

                let (old_quantity, new_quantity, name) = match ledger.get_mut(&item_id) {
                    Some(item) => {
                        let old = item.quantity;
                        item.quantity = old - quantity;
                        (old, item.quantity, item.name.clone())
                    }
                    // The matcher just returned this id; a miss here means the
                    // ledger changed under us mid-pass.
                    None => {
                        processing_log.push(format!(
                            "Error processing event: item '{item_id}' vanished during reconciliation"
                        ));
                        continue;
                    }
                };

                let description = format!(
                    "AI detected a {} {} took {} unit(s) of '{}'.",
                    record.customer_age_range.as_deref().unwrap_or("unknown"),
                    record.customer_gender.as_deref().unwrap_or("unknown"),
                    quantity,
                    name,
                );

                match audit_log.append_for_item(
                    ledger,
                    AuditEventKind::AiDetectedRemoval,
                    description,
                    item_id.clone(),
                    Utc::now(),
                ) {
                    Ok(event_id) => {
                        if let Some(event) = audit_log.get(&event_id) {
                            processed_events.push(event.clone());
                        }
                        tracing::info!(
                            item = %item_id,
                            old = old_quantity,
                            new = new_quantity,
                            "stock decremented from detected pickup"
                        );
                        updated_items.push(UpdatedItem {
                            item_id,
                            name: name.clone(),
                            old_quantity,
                            new_quantity,
                            quantity_changed: quantity,
                        });
                        processing_log.push(format!(
                            "Success: Processed event for '{name}' \
                             (quantity: {old_quantity} → {new_quantity})"
                        ));
                    }
                    Err(e) => {
                        processing_log.push(format!("Error processing event: {e}"));
                    }
                }
            }

            Some(Action::Examined) => {
                processing_log.push(format!(
                    "Info: Customer examined '{}' but didn't take it.",
                    record.product_name.as_deref().unwrap_or("unknown product")
                ));
            }

            // Null/empty action or product: nothing to reconcile against.
            _ if record.action.as_deref().unwrap_or("").is_empty() || product.is_empty() => {
                processing_log.push("Skipped: Event contains null/empty data.".to_string());
            }

            // A pickup with quantity <= 0 carries no stock effect.
            Some(Action::PickedUp) => {
                processing_log.push(skipped_action_line("picked up"));
            }

            // Deliberately log-only; restocking on put-back is unconfirmed.
            Some(Action::PutBack) => {
                processing_log.push(skipped_action_line("put back"));
            }

            None => {
                let raw = record.action.as_deref().unwrap_or("");
                processing_log.push(skipped_action_line(raw));
            }
        }
    }

    let inventory_changes = updated_items.len();
    ReconciliationResult {
        message: "Analysis complete.".to_string(),
        processed_events,
        updated_items,
        processing_log,
        total_records: values.len(),
        inventory_changes,
    }
}

fn skipped_action_line(action: &str) -> String {
    format!("Skipped: AI detected an event with action '{action}' which does not affect inventory.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelftally_ledger::InventoryItem;

    fn sample_ledger() -> InventoryLedger {
        [
            InventoryItem::new("item-1", "Grape Nuts", 50),
            InventoryItem::new("item-2", "Fibre 1", 30),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn pickup_decrements_stock_and_records_audit_event() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![json!({
            "action": "picked up",
            "product_name": "Grape Nuts",
            "quantity": 3,
            "customer_gender": "female",
            "customer_age_range": "adult"
        })];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(ledger.get(&"item-1".into()).unwrap().quantity, 47);
        assert_eq!(result.processed_events.len(), 1);
        assert_eq!(
            result.processed_events[0].kind,
            AuditEventKind::AiDetectedRemoval
        );
        assert_eq!(
            result.processed_events[0].description,
            "AI detected a adult female took 3 unit(s) of 'Grape Nuts'."
        );
        assert_eq!(result.updated_items.len(), 1);
        let updated = &result.updated_items[0];
        assert_eq!(updated.old_quantity, 50);
        assert_eq!(updated.new_quantity, 47);
        assert_eq!(updated.quantity_changed, 3);
        assert_eq!(result.inventory_changes, 1);
        assert_eq!(audit_log.len(), 1);
    }

    #[test]
    fn examined_logs_info_without_mutation() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![json!({ "action": "examined", "product_name": "Grape Nuts" })];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(ledger.get(&"item-1".into()).unwrap().quantity, 50);
        assert!(result.processed_events.is_empty());
        assert!(audit_log.is_empty());
        assert_eq!(
            result.processing_log,
            ["Info: Customer examined 'Grape Nuts' but didn't take it."]
        );
    }

    #[test]
    fn unmatched_product_is_skipped_by_name() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![json!({
            "action": "picked up",
            "product_name": "Unknown Snack",
            "quantity": 1
        })];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(ledger.snapshot(), sample_ledger().snapshot());
        assert!(audit_log.is_empty());
        assert_eq!(result.processing_log.len(), 1);
        assert!(result.processing_log[0].contains("'Unknown Snack'"));
        assert!(result.processing_log[0].starts_with("Skipped:"));
    }

    #[test]
    fn put_back_never_restocks() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![json!({
            "action": "put back",
            "product_name": "Fibre 1",
            "quantity": 2
        })];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(ledger.get(&"item-2".into()).unwrap().quantity, 30);
        assert!(result.processing_log[0].contains("'put back'"));
        assert_eq!(result.inventory_changes, 0);
    }

    #[test]
    fn null_fields_log_the_generic_skip_line() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![
            json!({ "action": null, "product_name": "Grape Nuts", "quantity": 1 }),
            json!({ "action": "picked up", "product_name": null, "quantity": 1 }),
        ];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(
            result.processing_log,
            [
                "Skipped: Event contains null/empty data.",
                "Skipped: Event contains null/empty data."
            ]
        );
    }

    #[test]
    fn all_null_record_is_skipped_without_touching_the_ledger() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![json!({
            "customer_gender": null,
            "customer_age_range": null,
            "action": null,
            "product_name": null,
            "quantity": 0
        })];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(ledger.snapshot(), sample_ledger().snapshot());
        assert!(audit_log.is_empty());
        assert_eq!(result.processing_log, ["Skipped: Event contains null/empty data."]);
    }

    #[test]
    fn zero_quantity_pickup_does_not_affect_inventory() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![json!({
            "action": "picked up",
            "product_name": "Grape Nuts",
            "quantity": 0
        })];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(ledger.get(&"item-1".into()).unwrap().quantity, 50);
        assert!(result.processing_log[0].contains("'picked up'"));
    }

    #[test]
    fn over_reconciliation_preserves_negative_stock() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![json!({
            "action": "picked up",
            "product_name": "Fibre 1",
            "quantity": 45
        })];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(ledger.get(&"item-2".into()).unwrap().quantity, -15);
        assert_eq!(result.updated_items[0].new_quantity, -15);
        assert_eq!(result.updated_items[0].old_quantity, 30);
    }

    #[test]
    fn malformed_record_logs_error_and_continues() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![
            json!({ "quantity": "three" }),
            json!({ "action": "picked up", "product_name": "Fibre 1", "quantity": 2 }),
        ];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert!(result.processing_log[0].starts_with("Error processing event:"));
        assert!(result.processing_log[0].contains("quantity"));
        assert_eq!(ledger.get(&"item-2".into()).unwrap().quantity, 28);
        assert_eq!(result.total_records, 2);
        assert_eq!(result.inventory_changes, 1);
    }

    #[test]
    fn processing_log_is_one_line_per_record_in_order() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let values = vec![
            json!({ "action": "examined", "product_name": "Grape Nuts" }),
            json!({ "action": "picked up", "product_name": "Fibre 1", "quantity": 1 }),
            json!({ "action": "put back", "product_name": "Grape Nuts", "quantity": 1 }),
        ];

        let result = reconcile(&values, &mut ledger, &mut audit_log);

        assert_eq!(result.processing_log.len(), 3);
        assert!(result.processing_log[0].starts_with("Info:"));
        assert!(result.processing_log[1].starts_with("Success:"));
        assert!(result.processing_log[2].starts_with("Skipped:"));
    }

    #[test]
    fn successive_pickups_chain_old_and_new_quantities() {
        let mut ledger = sample_ledger();
        let mut audit_log = AuditLog::new();
        let pickup = |q: i64| {
            json!({ "action": "picked up", "product_name": "Grape Nuts", "quantity": q })
        };

        let result = reconcile(&[pickup(3), pickup(5)], &mut ledger, &mut audit_log);

        assert_eq!(result.updated_items[0].old_quantity, 50);
        assert_eq!(result.updated_items[0].new_quantity, 47);
        assert_eq!(result.updated_items[1].old_quantity, 47);
        assert_eq!(result.updated_items[1].new_quantity, 42);
        assert_eq!(audit_log.len(), 2);
    }
}
