//! Configuration types for the time-clock engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section is
//! optional and falls back to its default.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::StockItem;

/// How a work segment still open at the end of a day is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnterminatedShiftPolicy {
    /// An open segment earns nothing.
    #[default]
    Drop,
    /// An open segment is credited up to the end of its day, the end of the
    /// range or the current time, whichever comes first.
    CreditToRangeEnd,
}

/// What the payroll export does when one employee's timecard fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayrollFailurePolicy {
    /// The first failure aborts the whole export.
    #[default]
    FailFast,
    /// The failing row carries the error and the export continues.
    Isolate,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the server listens on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timecard computation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimecardConfig {
    /// Policy for shifts without a closing punch.
    pub unterminated_shift_policy: UnterminatedShiftPolicy,
}

/// Payroll export settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Policy for per-employee failures.
    pub failure_policy: PayrollFailurePolicy,
}

/// An employee created when the in-memory store starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEmployee {
    /// Fixed identifier; a UUID is generated when omitted.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Hourly pay rate.
    pub pay_rate: Decimal,
}

/// Records loaded into the in-memory stores at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Employees to create.
    pub employees: Vec<SeedEmployee>,
    /// Stock items to create.
    pub items: Vec<StockItem>,
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Server settings.
    pub server: ServerConfig,
    /// Timecard settings.
    pub timecard: TimecardConfig,
    /// Payroll settings.
    pub payroll: PayrollConfig,
    /// Startup seed data.
    pub seed: SeedConfig,
}
