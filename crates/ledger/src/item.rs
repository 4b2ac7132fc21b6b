use serde::{Deserialize, Serialize};

use shelftally_core::ItemId;

/// A stocked product on the shelf.
///
/// `quantity` is intentionally signed: reconciliation never clamps at zero, so
/// a negative value is preserved verbatim as an over-reconciliation signal for
/// downstream review rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub quantity: i64,
    #[serde(default)]
    pub location: String,
    /// Opaque pass-through; the reconciliation core never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl InventoryItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: String::new(),
            quantity,
            location: String::new(),
            price: None,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_flat_wire_shape() {
        let item = InventoryItem::new("item-1", "Grape Nuts", 50)
            .with_sku("SKU-ITEM-1")
            .with_location("Aisle 3");

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "item-1");
        assert_eq!(json["name"], "Grape Nuts");
        assert_eq!(json["quantity"], 50);
        assert_eq!(json["location"], "Aisle 3");
        assert!(json.get("price").is_none());
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let item: InventoryItem =
            serde_json::from_str(r#"{"id":"item_001","name":"Cheerios","quantity":25}"#).unwrap();
        assert_eq!(item.id, ItemId::new("item_001"));
        assert_eq!(item.sku, "");
        assert_eq!(item.price, None);
    }
}
