use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use shelftally_core::ItemId;

use crate::item::InventoryItem;

/// The in-memory inventory ledger: a keyed store of [`InventoryItem`]s with
/// stable insertion order.
///
/// Iteration order matters: the name-match policy used during reconciliation
/// resolves ties by first match in insertion order, so two lookups against the
/// same ledger state must walk items identically. A plain `HashMap` alone
/// would not give that guarantee; the ledger therefore keeps an explicit
/// insertion-order index alongside the map.
///
/// Item ids are append-only within a session: there is no remove operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryLedger {
    items: HashMap<ItemId, InventoryItem>,
    order: Vec<ItemId>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item. A new id is appended to the iteration
    /// order; replacing an existing id keeps its original position.
    pub fn insert(&mut self, item: InventoryItem) {
        if !self.items.contains_key(&item.id) {
            self.order.push(item.id.clone());
        }
        self.items.insert(item.id.clone(), item);
    }

    pub fn get(&self, id: &ItemId) -> Option<&InventoryItem> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut InventoryItem> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all stored quantities (negative quantities included as-is).
    pub fn total_stock(&self) -> i64 {
        self.items.values().map(|i| i.quantity).sum()
    }

    /// Next host-style sequential id (`item-1`, `item-2`, ...).
    pub fn next_item_id(&self) -> ItemId {
        ItemId::new(format!("item-{}", self.items.len() + 1))
    }

    /// A point-in-time copy of all items in iteration order, for reporting.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            items: self.iter().cloned().collect(),
        }
    }
}

impl FromIterator<InventoryItem> for InventoryLedger {
    fn from_iter<T: IntoIterator<Item = InventoryItem>>(iter: T) -> Self {
        let mut ledger = Self::new();
        for item in iter {
            ledger.insert(item);
        }
        ledger
    }
}

/// Immutable point-in-time view of the ledger, taken before and after a
/// reconciliation pass so the report can show both states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub items: Vec<InventoryItem>,
}

impl LedgerSnapshot {
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_stock(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
