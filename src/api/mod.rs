//! HTTP API module for the time-clock engine.
//!
//! This module provides the REST endpoints for clock actions, timecards,
//! the payroll export, employee administration and the stock ledger.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockActionRequest, CreateEmployeeRequest, DateRangeQuery, QuantityRequest, StockOperation,
    UpsertItemRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
