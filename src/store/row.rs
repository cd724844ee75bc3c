//! Persisted employee rows and their mapping into the domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Employee, EmployeeStatus};

/// An employee as stored, with the status kept as its raw string.
///
/// Mapping a row into an [`Employee`] is where a corrupt status register
/// value surfaces as [`EngineError::InvalidState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    /// Employee identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Hourly pay rate.
    pub pay_rate: Decimal,
    /// Raw status register value.
    pub status: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = EngineError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let status: EmployeeStatus =
            row.status
                .parse()
                .map_err(|_| EngineError::InvalidState {
                    employee_id: row.id.clone(),
                    status: row.status.clone(),
                })?;

        Ok(Employee {
            id: row.id,
            name: row.name,
            pay_rate: row.pay_rate,
            status,
        })
    }
}

impl From<&Employee> for EmployeeRow {
    fn from(employee: &Employee) -> Self {
        EmployeeRow {
            id: employee.id.clone(),
            name: employee.name.clone(),
            pay_rate: employee.pay_rate,
            status: employee.status.as_str().to_string(),
        }
    }
}
