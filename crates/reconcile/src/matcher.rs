use shelftally_core::ItemId;
use shelftally_ledger::InventoryLedger;

/// Name-resolution policy for free-text product names.
///
/// The policy is deliberately simple and deliberately *named*: first ledger
/// entry (in insertion order) whose display name contains the query as a
/// case-folded substring. Ambiguous queries ("Chex" against two Chex
/// variants) are not an error; insertion order resolves them, and repeated
/// lookups against unchanged ledger state return the same id.
///
/// No edit-distance matching, no scoring.
pub struct NameMatch;

impl NameMatch {
    /// Resolve a product name to an item id, or `None` for an empty query
    /// or no match.
    pub fn first_substring(ledger: &InventoryLedger, query: &str) -> Option<ItemId> {
        if query.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        ledger
            .iter()
            .find(|item| item.name.to_lowercase().contains(&needle))
            .map(|item| item.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shelftally_ledger::InventoryItem;

    fn sample_ledger() -> InventoryLedger {
        [
            InventoryItem::new("item_001", "Grape Nuts", 50),
            InventoryItem::new("item_002", "Corn Chex", 30),
            InventoryItem::new("item_003", "Rice Chex", 25),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn matches_case_insensitive_substring() {
        let ledger = sample_ledger();
        assert_eq!(
            NameMatch::first_substring(&ledger, "grape nuts"),
            Some("item_001".into())
        );
        assert_eq!(
            NameMatch::first_substring(&ledger, "NUTS"),
            Some("item_001".into())
        );
    }

    #[test]
    fn ambiguous_query_resolves_to_first_inserted() {
        let ledger = sample_ledger();
        assert_eq!(
            NameMatch::first_substring(&ledger, "Chex"),
            Some("item_002".into())
        );
    }

    #[test]
    fn empty_query_and_misses_yield_none() {
        let ledger = sample_ledger();
        assert_eq!(NameMatch::first_substring(&ledger, ""), None);
        assert_eq!(NameMatch::first_substring(&ledger, "Unknown Snack"), None);
    }

    proptest! {
        // Idempotence: same ledger state + same query => same answer.
        #[test]
        fn lookup_is_idempotent(query in ".{0,20}") {
            let ledger = sample_ledger();
            let first = NameMatch::first_substring(&ledger, &query);
            let second = NameMatch::first_substring(&ledger, &query);
            prop_assert_eq!(first, second);
        }
    }
}
