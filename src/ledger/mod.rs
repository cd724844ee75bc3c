//! Item stock ledger.
//!
//! The inventory side of the backend (checkouts, orders, receiving) moves
//! stock only through the [`StockLedger`] port: reserve, release, consume
//! and receive. [`MemoryStockLedger`] is the in-process adapter.

mod memory;

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::models::StockItem;

pub use memory::MemoryStockLedger;

/// Quantity operations on stock items.
#[async_trait]
pub trait StockLedger: Send + Sync {
    /// Fetches an item by SKU.
    async fn get_item(&self, sku: &str) -> EngineResult<Option<StockItem>>;

    /// Lists every item ordered by SKU.
    async fn list_items(&self) -> EngineResult<Vec<StockItem>>;

    /// Creates or replaces an item.
    async fn upsert_item(&self, item: StockItem) -> EngineResult<StockItem>;

    /// Holds `quantity` of the available stock.
    async fn reserve(&self, sku: &str, quantity: u32) -> EngineResult<StockItem>;

    /// Returns `quantity` of the reserved stock to available.
    async fn release(&self, sku: &str, quantity: u32) -> EngineResult<StockItem>;

    /// Removes `quantity` of reserved stock from the shelf.
    async fn consume(&self, sku: &str, quantity: u32) -> EngineResult<StockItem>;

    /// Adds `quantity` of newly received stock.
    async fn receive(&self, sku: &str, quantity: u32) -> EngineResult<StockItem>;
}
