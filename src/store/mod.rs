//! Persistence ports for employees and the punch log.
//!
//! The clock and timecard services only talk to storage through these
//! traits. [`MemoryClockStore`] is the in-process adapter used by the
//! binary and the tests; a database adapter implements the same traits.
//!
//! Clock actions write through a [`ClockTransaction`]: the status update
//! and the punch append are staged and become visible together on
//! [`ClockTransaction::commit`]. Dropping a transaction without committing
//! discards everything it staged.

mod memory;
mod row;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::EngineResult;
use crate::models::{Employee, EmployeeStatus, PunchEvent};

pub use memory::MemoryClockStore;
pub use row::EmployeeRow;

/// Read access and transaction entry point for employees and punches.
#[async_trait]
pub trait ClockStore: Send + Sync {
    /// Fetches the raw stored row for an employee.
    async fn get_employee_row(&self, employee_id: &str) -> EngineResult<Option<EmployeeRow>>;

    /// Lists raw rows for every employee, in insertion order.
    async fn list_employee_rows(&self) -> EngineResult<Vec<EmployeeRow>>;

    /// Stores a new employee.
    async fn insert_employee(&self, employee: &Employee) -> EngineResult<()>;

    /// Removes an employee record, keeping its punches. Returns whether a
    /// record was removed.
    async fn delete_employee(&self, employee_id: &str) -> EngineResult<bool>;

    /// The employee's most recent punch by timestamp.
    async fn last_punch(&self, employee_id: &str) -> EngineResult<Option<PunchEvent>>;

    /// The employee's punches with `from <= timestamp <= to`, ascending.
    async fn list_punches(
        &self,
        employee_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> EngineResult<Vec<PunchEvent>>;

    /// Opens a write transaction.
    async fn begin<'a>(&'a self) -> EngineResult<Box<dyn ClockTransaction + 'a>>;

    /// Fetches an employee, mapping the stored status.
    async fn get_employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        self.get_employee_row(employee_id)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    /// Lists every employee; fails on the first corrupt status.
    async fn list_all_employees(&self) -> EngineResult<Vec<Employee>> {
        self.list_employee_rows()
            .await?
            .into_iter()
            .map(Employee::try_from)
            .collect()
    }
}

/// A unit of work over the status register and the punch log.
///
/// Reads inside the transaction see its own staged writes.
#[async_trait]
pub trait ClockTransaction: Send {
    /// Fetches an employee, mapping the stored status.
    async fn get_employee(&mut self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// The employee's most recent punch by timestamp.
    async fn last_punch(&mut self, employee_id: &str) -> EngineResult<Option<PunchEvent>>;

    /// Stages a status change and returns the updated employee.
    async fn update_employee_status(
        &mut self,
        employee_id: &str,
        status: EmployeeStatus,
    ) -> EngineResult<Employee>;

    /// Stages a punch.
    async fn append_punch(&mut self, punch: PunchEvent) -> EngineResult<()>;

    /// Applies every staged write.
    async fn commit(&mut self) -> EngineResult<()>;
}
