//! Application state for the time-clock API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::ledger::{MemoryStockLedger, StockLedger};
use crate::service::ClockService;
use crate::store::MemoryClockStore;

/// Shared application state.
///
/// Holds the clock service and the stock ledger behind `Arc`s so the state
/// can be cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    service: Arc<ClockService>,
    ledger: Arc<dyn StockLedger>,
}

impl AppState {
    /// Creates a new application state from its parts.
    pub fn new(service: ClockService, ledger: Arc<dyn StockLedger>) -> Self {
        Self {
            service: Arc::new(service),
            ledger,
        }
    }

    /// Builds in-memory stores, applies the configured policies and loads
    /// the seed records.
    pub async fn from_config(config: &ConfigLoader) -> EngineResult<Self> {
        let service = ClockService::from_config(Arc::new(MemoryClockStore::new()), config);
        let ledger = MemoryStockLedger::new();

        let seed = config.seed();
        let employees = service.seed_employees(&seed.employees).await?;
        for item in &seed.items {
            ledger.upsert_item(item.clone()).await?;
        }
        info!(
            employees,
            items = seed.items.len(),
            "Seed records loaded"
        );

        Ok(Self::new(service, Arc::new(ledger)))
    }

    /// Returns the clock service.
    pub fn service(&self) -> &ClockService {
        &self.service
    }

    /// Returns the stock ledger.
    pub fn ledger(&self) -> &dyn StockLedger {
        self.ledger.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_from_config_loads_seed_records() {
        let config = ConfigLoader::load("./config/timeclock.yaml").unwrap();
        let state = AppState::from_config(&config).await.unwrap();

        let employee = state.service().get_employee("emp_001").await.unwrap();
        assert_eq!(employee.name, "Dana Reyes");
        assert_eq!(state.service().list_employees().await.unwrap().len(), 2);
        assert!(state.ledger().get_item("PAL-01").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_from_default_config_is_empty() {
        let state = AppState::from_config(&ConfigLoader::default()).await.unwrap();
        assert!(state.service().list_employees().await.unwrap().is_empty());
        assert!(state.ledger().list_items().await.unwrap().is_empty());
    }
}
