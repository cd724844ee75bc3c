//! Stock item model used by the item stock ledger.

use serde::{Deserialize, Serialize};

/// Derived availability of a stock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// Available quantity is above the reorder level.
    InStock,
    /// Available quantity is at or below the reorder level.
    LowStock,
    /// Nothing available.
    OutOfStock,
}

/// A stock-keeping unit with on-hand and reserved quantities.
///
/// Invariant: `reserved <= on_hand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    /// Stock-keeping unit identifier.
    pub sku: String,
    /// Item name.
    pub name: String,
    /// Physical quantity on hand.
    pub on_hand: u32,
    /// Quantity held for checkouts or orders.
    #[serde(default)]
    pub reserved: u32,
    /// Available quantity at or below which the item is low on stock.
    #[serde(default)]
    pub reorder_level: u32,
}

impl StockItem {
    /// Quantity that can still be reserved.
    pub fn available(&self) -> u32 {
        self.on_hand.saturating_sub(self.reserved)
    }

    /// Derives the stock status from the available quantity.
    ///
    /// ```
    /// use timeclock_engine::models::{StockItem, StockStatus};
    ///
    /// let item = StockItem {
    ///     sku: "PAL-01".to_string(),
    ///     name: "Pallet wrap".to_string(),
    ///     on_hand: 10,
    ///     reserved: 8,
    ///     reorder_level: 2,
    /// };
    /// assert_eq!(item.status(), StockStatus::LowStock);
    /// ```
    pub fn status(&self) -> StockStatus {
        match self.available() {
            0 => StockStatus::OutOfStock,
            n if n <= self.reorder_level => StockStatus::LowStock,
            _ => StockStatus::InStock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(on_hand: u32, reserved: u32, reorder_level: u32) -> StockItem {
        StockItem {
            sku: "SKU-1".to_string(),
            name: "Shrink wrap".to_string(),
            on_hand,
            reserved,
            reorder_level,
        }
    }

    #[test]
    fn test_status_out_of_stock_when_fully_reserved() {
        assert_eq!(item(5, 5, 1).status(), StockStatus::OutOfStock);
    }

    #[test]
    fn test_status_low_stock_at_reorder_level() {
        assert_eq!(item(10, 7, 3).status(), StockStatus::LowStock);
    }

    #[test]
    fn test_status_in_stock_above_reorder_level() {
        assert_eq!(item(10, 0, 3).status(), StockStatus::InStock);
    }

    #[test]
    fn test_deserialize_defaults_reserved_and_reorder_level() {
        let json = r#"{"sku": "SKU-9", "name": "Tape", "on_hand": 4}"#;
        let item: StockItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.reserved, 0);
        assert_eq!(item.reorder_level, 0);
        assert_eq!(item.available(), 4);
    }
}
