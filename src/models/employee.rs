//! Employee model and clock status.
//!
//! This module defines the [`Employee`] struct and the [`EmployeeStatus`]
//! values held in the status register.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The coarse clock state of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmployeeStatus {
    /// Not on the clock.
    Inactive,
    /// Clocked in and working.
    Working,
    /// Clocked in but out to lunch.
    OnLunch,
}

impl EmployeeStatus {
    /// Returns the wire representation of the status.
    ///
    /// ```
    /// use timeclock_engine::models::EmployeeStatus;
    ///
    /// assert_eq!(EmployeeStatus::OnLunch.as_str(), "on-lunch");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Inactive => "inactive",
            EmployeeStatus::Working => "working",
            EmployeeStatus::OnLunch => "on-lunch",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored status string is not a known [`EmployeeStatus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl FromStr for EmployeeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inactive" => Ok(EmployeeStatus::Inactive),
            "working" => Ok(EmployeeStatus::Working),
            "on-lunch" => Ok(EmployeeStatus::OnLunch),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// An employee who punches the time clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hourly pay rate.
    pub pay_rate: Decimal,
    /// Current clock status.
    pub status: EmployeeStatus,
}

impl Employee {
    /// Creates an employee in the `inactive` state.
    pub fn new(id: impl Into<String>, name: impl Into<String>, pay_rate: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pay_rate,
            status: EmployeeStatus::Inactive,
        }
    }
}
