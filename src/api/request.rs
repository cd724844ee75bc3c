//! Request types for the time-clock API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! clock, employee and inventory endpoints.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{DateRange, StockItem};

/// Request body for `POST /clock/action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockActionRequest {
    /// The employee punching the clock.
    pub employee_id: String,
    /// The terminal the punch came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// Query string for the timecard and export endpoints.
///
/// Both boundaries are optional here so that a missing one is reported as
/// a validation error rather than an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeQuery {
    /// First day (`YYYY-MM-DD`) or instant (RFC 3339) of the range.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day (`YYYY-MM-DD`) or instant (RFC 3339) of the range.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    /// Parses the query into a closed range.
    pub fn to_range(&self) -> EngineResult<DateRange> {
        DateRange::parse(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Hourly pay rate.
    pub pay_rate: Decimal,
}

/// Request body for `PUT /inventory/:sku`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertItemRequest {
    /// Item name.
    pub name: String,
    /// Quantity on the shelf.
    pub on_hand: u32,
    /// Quantity already held for orders.
    #[serde(default)]
    pub reserved: u32,
    /// Available quantity at or below which the item is low on stock.
    #[serde(default)]
    pub reorder_level: u32,
}

impl UpsertItemRequest {
    /// Builds the stock item stored under `sku`.
    pub fn into_item(self, sku: String) -> StockItem {
        StockItem {
            sku,
            name: self.name,
            on_hand: self.on_hand,
            reserved: self.reserved,
            reorder_level: self.reorder_level,
        }
    }
}

/// Request body for the inventory quantity operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuantityRequest {
    /// Number of units to move.
    pub quantity: u32,
}

/// Quantity operation named in the inventory path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockOperation {
    /// Hold available stock.
    Reserve,
    /// Return reserved stock.
    Release,
    /// Ship reserved stock.
    Consume,
    /// Restock.
    Receive,
}

impl StockOperation {
    /// The path segment for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StockOperation::Reserve => "reserve",
            StockOperation::Release => "release",
            StockOperation::Consume => "consume",
            StockOperation::Receive => "receive",
        }
    }
}

impl FromStr for StockOperation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reserve" => Ok(StockOperation::Reserve),
            "release" => Ok(StockOperation::Release),
            "consume" => Ok(StockOperation::Consume),
            "receive" => Ok(StockOperation::Receive),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_clock_action_request_device_is_optional() {
        let request: ClockActionRequest =
            serde_json::from_str(r#"{"employee_id": "emp_001"}"#).unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert!(request.device_id.is_none());
    }

    #[test]
    fn test_create_employee_request_accepts_string_and_number_rates() {
        let from_str: CreateEmployeeRequest =
            serde_json::from_str(r#"{"name": "Dana", "pay_rate": "25.50"}"#).unwrap();
        let from_num: CreateEmployeeRequest =
            serde_json::from_str(r#"{"name": "Dana", "pay_rate": 25.5}"#).unwrap();
        assert_eq!(from_str.pay_rate, Decimal::new(2550, 2));
        assert_eq!(from_num.pay_rate.normalize(), Decimal::new(255, 1));
    }

    #[test]
    fn test_missing_query_date_is_validation_error() {
        let query = DateRangeQuery {
            start_date: Some("2026-01-12".to_string()),
            end_date: None,
        };
        match query.to_range() {
            Err(EngineError::ValidationError { field, .. }) => assert_eq!(field, "end_date"),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_upsert_request_defaults() {
        let request: UpsertItemRequest =
            serde_json::from_str(r#"{"name": "Pallet wrap", "on_hand": 10}"#).unwrap();
        let item = request.into_item("PAL-01".to_string());
        assert_eq!(item.sku, "PAL-01");
        assert_eq!(item.reserved, 0);
        assert_eq!(item.reorder_level, 0);
    }

    #[test]
    fn test_stock_operation_from_path() {
        for op in [
            StockOperation::Reserve,
            StockOperation::Release,
            StockOperation::Consume,
            StockOperation::Receive,
        ] {
            assert_eq!(op.as_str().parse::<StockOperation>(), Ok(op));
        }
        assert!("restock".parse::<StockOperation>().is_err());
    }
}
