use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Occurrence-count distributions over one batch of interaction records.
///
/// Ordered maps so report rendering is deterministic without tracking
/// observation order per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    pub gender_distribution: BTreeMap<String, u64>,
    pub age_distribution: BTreeMap<String, u64>,
    pub action_distribution: BTreeMap<String, u64>,
    pub product_distribution: BTreeMap<String, u64>,
}

impl PatternSummary {
    /// Fixed-order view of (title, distribution) pairs for rendering.
    pub fn categories(&self) -> [(&'static str, &BTreeMap<String, u64>); 4] {
        [
            ("Gender Distribution", &self.gender_distribution),
            ("Age Distribution", &self.age_distribution),
            ("Action Distribution", &self.action_distribution),
            ("Product Distribution", &self.product_distribution),
        ]
    }
}

/// Tally categorical fields across a batch of parsed values.
///
/// Pure and independent of reconciliation: an unmatched pickup or an
/// "examined" record still counts. A record contributes to a distribution
/// only when the field is a non-empty string, and always by 1: counts are
/// occurrences, never quantity-weighted.
pub fn aggregate(values: &[JsonValue]) -> PatternSummary {
    let mut summary = PatternSummary::default();

    for value in values {
        tally(&mut summary.gender_distribution, value, "customer_gender");
        tally(&mut summary.age_distribution, value, "customer_age_range");
        tally(&mut summary.action_distribution, value, "action");
        tally(&mut summary.product_distribution, value, "product_name");
    }

    summary
}

fn tally(distribution: &mut BTreeMap<String, u64>, value: &JsonValue, field: &str) {
    if let Some(s) = value.get(field).and_then(JsonValue::as_str) {
        if !s.is_empty() {
            *distribution.entry(s.to_string()).or_insert(0) += 1;
        }
    }
}
