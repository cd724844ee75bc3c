//! Error types for the time-clock engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the clock, timecard, payroll and ledger operations
//! can report to the HTTP layer.

use thiserror::Error;

/// The main error type for the time-clock engine.
///
/// # Example
///
/// ```
/// use timeclock_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// The status register holds a value outside the recognized states.
    #[error("Employee '{employee_id}' has unrecognized status '{status}'")]
    InvalidState {
        /// The employee whose status is corrupt.
        employee_id: String,
        /// The raw stored status value.
        status: String,
    },

    /// Input from the boundary layer was rejected.
    #[error("Invalid value for '{field}': {message}")]
    ValidationError {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// No stock item exists with the given SKU.
    #[error("Item not found: {sku}")]
    ItemNotFound {
        /// The SKU that was looked up.
        sku: String,
    },

    /// A reservation asked for more than is available.
    #[error("Insufficient stock for '{sku}': requested {requested}, available {available}")]
    InsufficientStock {
        /// The item SKU.
        sku: String,
        /// Quantity requested.
        requested: u32,
        /// Quantity available at the time of the request.
        available: u32,
    },

    /// A stock quantity was zero or exceeded what the operation allows.
    #[error("Invalid quantity for '{sku}': {message}")]
    InvalidQuantity {
        /// The item SKU.
        sku: String,
        /// Why the quantity was rejected.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The persistence layer failed.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::ValidationError`].
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
