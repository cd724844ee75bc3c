//! In-memory implementation of the [`StockLedger`] port.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::StockItem;

use super::StockLedger;

/// Stock items held in process memory, keyed by SKU.
#[derive(Debug, Default)]
pub struct MemoryStockLedger {
    items: RwLock<BTreeMap<String, StockItem>>,
}

impl MemoryStockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `change` to one item under the write lock.
    ///
    /// `change` validates and mutates a copy; the stored item is replaced
    /// only when it succeeds.
    async fn adjust<F>(&self, sku: &str, quantity: u32, change: F) -> EngineResult<StockItem>
    where
        F: FnOnce(&mut StockItem) -> EngineResult<()> + Send,
    {
        if quantity == 0 {
            return Err(EngineError::InvalidQuantity {
                sku: sku.to_string(),
                message: "quantity must be greater than zero".to_string(),
            });
        }

        let mut items = self.items.write().await;
        let stored = items.get_mut(sku).ok_or_else(|| EngineError::ItemNotFound {
            sku: sku.to_string(),
        })?;

        let mut updated = stored.clone();
        change(&mut updated)?;
        *stored = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl StockLedger for MemoryStockLedger {
    async fn get_item(&self, sku: &str) -> EngineResult<Option<StockItem>> {
        Ok(self.items.read().await.get(sku).cloned())
    }

    async fn list_items(&self) -> EngineResult<Vec<StockItem>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn upsert_item(&self, item: StockItem) -> EngineResult<StockItem> {
        if item.reserved > item.on_hand {
            return Err(EngineError::InvalidQuantity {
                sku: item.sku,
                message: "reserved quantity exceeds quantity on hand".to_string(),
            });
        }
        self.items
            .write()
            .await
            .insert(item.sku.clone(), item.clone());
        Ok(item)
    }

    async fn reserve(&self, sku: &str, quantity: u32) -> EngineResult<StockItem> {
        self.adjust(sku, quantity, |item| {
            let available = item.available();
            if quantity > available {
                return Err(EngineError::InsufficientStock {
                    sku: item.sku.clone(),
                    requested: quantity,
                    available,
                });
            }
            item.reserved += quantity;
            Ok(())
        })
        .await
    }

    async fn release(&self, sku: &str, quantity: u32) -> EngineResult<StockItem> {
        self.adjust(sku, quantity, |item| {
            if quantity > item.reserved {
                return Err(EngineError::InvalidQuantity {
                    sku: item.sku.clone(),
                    message: format!(
                        "cannot release {} with only {} reserved",
                        quantity, item.reserved
                    ),
                });
            }
            item.reserved -= quantity;
            Ok(())
        })
        .await
    }

    async fn consume(&self, sku: &str, quantity: u32) -> EngineResult<StockItem> {
        self.adjust(sku, quantity, |item| {
            if quantity > item.reserved {
                return Err(EngineError::InvalidQuantity {
                    sku: item.sku.clone(),
                    message: format!(
                        "cannot consume {} with only {} reserved",
                        quantity, item.reserved
                    ),
                });
            }
            item.reserved -= quantity;
            item.on_hand -= quantity;
            Ok(())
        })
        .await
    }

    async fn receive(&self, sku: &str, quantity: u32) -> EngineResult<StockItem> {
        self.adjust(sku, quantity, |item| {
            item.on_hand = item
                .on_hand
                .checked_add(quantity)
                .ok_or_else(|| EngineError::InvalidQuantity {
                    sku: item.sku.clone(),
                    message: "quantity on hand would overflow".to_string(),
                })?;
            Ok(())
        })
        .await
    }
}
