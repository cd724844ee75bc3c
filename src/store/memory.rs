//! In-memory implementation of the [`ClockStore`] port.
//!
//! State lives behind one `tokio` read/write lock. A transaction holds the
//! write guard for its whole lifetime and stages its writes, so readers
//! never observe a status change without its punch.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EmployeeStatus, PunchEvent};

use super::{ClockStore, ClockTransaction, EmployeeRow};

#[derive(Debug, Default)]
struct MemoryState {
    employees: Vec<EmployeeRow>,
    punches: HashMap<String, Vec<PunchEvent>>,
}

impl MemoryState {
    fn row(&self, employee_id: &str) -> Option<&EmployeeRow> {
        self.employees.iter().find(|row| row.id == employee_id)
    }

    fn last_punch(&self, employee_id: &str) -> Option<&PunchEvent> {
        self.punches.get(employee_id).and_then(|log| log.last())
    }

    fn append(&mut self, punch: PunchEvent) {
        let log = self.punches.entry(punch.employee_id.clone()).or_default();
        // Keeps the log sorted even if a punch arrives late.
        let at = log.partition_point(|p| p.timestamp <= punch.timestamp);
        log.insert(at, punch);
    }
}

/// Employees and punches held in process memory.
#[derive(Debug, Default)]
pub struct MemoryClockStore {
    state: RwLock<MemoryState>,
}

impl MemoryClockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a raw row as-is, without validating its status.
    ///
    /// Used to load records migrated from other systems.
    pub async fn insert_row(&self, row: EmployeeRow) {
        let mut state = self.state.write().await;
        state.employees.retain(|existing| existing.id != row.id);
        state.employees.push(row);
    }

    /// Appends a punch directly to the log, outside the clock state machine.
    ///
    /// Used to import historical punches.
    pub async fn import_punch(&self, punch: PunchEvent) {
        self.state.write().await.append(punch);
    }

    /// Number of punches recorded for an employee.
    pub async fn punch_count(&self, employee_id: &str) -> usize {
        self.state
            .read()
            .await
            .punches
            .get(employee_id)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl ClockStore for MemoryClockStore {
    async fn get_employee_row(&self, employee_id: &str) -> EngineResult<Option<EmployeeRow>> {
        Ok(self.state.read().await.row(employee_id).cloned())
    }

    async fn list_employee_rows(&self) -> EngineResult<Vec<EmployeeRow>> {
        Ok(self.state.read().await.employees.clone())
    }

    async fn insert_employee(&self, employee: &Employee) -> EngineResult<()> {
        let mut state = self.state.write().await;
        if state.row(&employee.id).is_some() {
            return Err(EngineError::validation(
                "id",
                format!("employee '{}' already exists", employee.id),
            ));
        }
        state.employees.push(EmployeeRow::from(employee));
        Ok(())
    }

    async fn delete_employee(&self, employee_id: &str) -> EngineResult<bool> {
        let mut state = self.state.write().await;
        let before = state.employees.len();
        state.employees.retain(|row| row.id != employee_id);
        Ok(state.employees.len() != before)
    }

    async fn last_punch(&self, employee_id: &str) -> EngineResult<Option<PunchEvent>> {
        Ok(self.state.read().await.last_punch(employee_id).cloned())
    }

    async fn list_punches(
        &self,
        employee_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> EngineResult<Vec<PunchEvent>> {
        let state = self.state.read().await;
        Ok(state
            .punches
            .get(employee_id)
            .map(|log| {
                log.iter()
                    .filter(|p| p.timestamp >= from && p.timestamp <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn begin<'a>(&'a self) -> EngineResult<Box<dyn ClockTransaction + 'a>> {
        let state = self.state.write().await;
        Ok(Box::new(MemoryTransaction {
            state,
            status_updates: Vec::new(),
            punches: Vec::new(),
        }))
    }
}

struct MemoryTransaction<'a> {
    state: RwLockWriteGuard<'a, MemoryState>,
    status_updates: Vec<(String, EmployeeStatus)>,
    punches: Vec<PunchEvent>,
}

impl MemoryTransaction<'_> {
    fn staged_row(&self, employee_id: &str) -> Option<EmployeeRow> {
        let mut row = self.state.row(employee_id)?.clone();
        if let Some((_, status)) = self
            .status_updates
            .iter()
            .rev()
            .find(|(id, _)| id == employee_id)
        {
            row.status = status.as_str().to_string();
        }
        Some(row)
    }
}

#[async_trait]
impl<'a> ClockTransaction for MemoryTransaction<'a> {
    async fn get_employee(&mut self, employee_id: &str) -> EngineResult<Option<Employee>> {
        self.staged_row(employee_id)
            .map(Employee::try_from)
            .transpose()
    }

    async fn last_punch(&mut self, employee_id: &str) -> EngineResult<Option<PunchEvent>> {
        let staged = self
            .punches
            .iter()
            .filter(|p| p.employee_id == employee_id)
            .max_by_key(|p| p.timestamp);
        let stored = self.state.last_punch(employee_id);

        Ok(match (staged, stored) {
            (Some(s), Some(p)) if p.timestamp > s.timestamp => Some(p.clone()),
            (Some(s), _) => Some(s.clone()),
            (None, p) => p.cloned(),
        })
    }

    async fn update_employee_status(
        &mut self,
        employee_id: &str,
        status: EmployeeStatus,
    ) -> EngineResult<Employee> {
        let mut row = self
            .staged_row(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;
        row.status = status.as_str().to_string();
        self.status_updates.push((employee_id.to_string(), status));
        Employee::try_from(row)
    }

    async fn append_punch(&mut self, punch: PunchEvent) -> EngineResult<()> {
        self.punches.push(punch);
        Ok(())
    }

    async fn commit(&mut self) -> EngineResult<()> {
        for (employee_id, status) in self.status_updates.drain(..) {
            if let Some(row) = self
                .state
                .employees
                .iter_mut()
                .find(|row| row.id == employee_id)
            {
                row.status = status.as_str().to_string();
            }
        }
        for punch in std::mem::take(&mut self.punches) {
            self.state.append(punch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PunchType;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, h, 0, 0).unwrap()
    }

    async fn store_with_employee() -> MemoryClockStore {
        let store = MemoryClockStore::new();
        store
            .insert_employee(&Employee::new("emp_001", "Dana Reyes", Decimal::new(2500, 2)))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_and_get_employee() {
        let store = store_with_employee().await;
        let employee = store.get_employee("emp_001").await.unwrap().unwrap();
        assert_eq!(employee.status, EmployeeStatus::Inactive);
        assert!(store.get_employee("emp_404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let store = store_with_employee().await;
        let result = store
            .insert_employee(&Employee::new("emp_001", "Other", Decimal::ONE))
            .await;
        assert!(matches!(result, Err(EngineError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_delete_keeps_punches() {
        let store = store_with_employee().await;
        store
            .import_punch(PunchEvent::new("emp_001", PunchType::ClockIn, at(9), None))
            .await;

        assert!(store.delete_employee("emp_001").await.unwrap());
        assert!(!store.delete_employee("emp_001").await.unwrap());
        assert_eq!(store.punch_count("emp_001").await, 1);
    }

    #[tokio::test]
    async fn test_list_punches_is_inclusive_and_sorted() {
        let store = store_with_employee().await;
        for (t, h) in [
            (PunchType::ClockOut, 17),
            (PunchType::ClockIn, 9),
            (PunchType::LunchOut, 12),
        ] {
            store.import_punch(PunchEvent::new("emp_001", t, at(h), None)).await;
        }

        let punches = store.list_punches("emp_001", at(9), at(12)).await.unwrap();
        let types: Vec<PunchType> = punches.iter().map(|p| p.punch_type).collect();
        assert_eq!(types, vec![PunchType::ClockIn, PunchType::LunchOut]);

        let last = store.last_punch("emp_001").await.unwrap().unwrap();
        assert_eq!(last.punch_type, PunchType::ClockOut);
    }

    #[tokio::test]
    async fn test_commit_applies_status_and_punch_together() {
        let store = store_with_employee().await;
        {
            let mut tx = store.begin().await.unwrap();
            let updated = tx
                .update_employee_status("emp_001", EmployeeStatus::Working)
                .await
                .unwrap();
            assert_eq!(updated.status, EmployeeStatus::Working);
            tx.append_punch(PunchEvent::new("emp_001", PunchType::ClockIn, at(9), None))
                .await
                .unwrap();

            let staged = tx.last_punch("emp_001").await.unwrap().unwrap();
            assert_eq!(staged.punch_type, PunchType::ClockIn);
            tx.commit().await.unwrap();
        }

        let employee = store.get_employee("emp_001").await.unwrap().unwrap();
        assert_eq!(employee.status, EmployeeStatus::Working);
        assert_eq!(store.punch_count("emp_001").await, 1);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let store = store_with_employee().await;
        {
            let mut tx = store.begin().await.unwrap();
            tx.update_employee_status("emp_001", EmployeeStatus::Working)
                .await
                .unwrap();
            tx.append_punch(PunchEvent::new("emp_001", PunchType::ClockIn, at(9), None))
                .await
                .unwrap();
        }

        let employee = store.get_employee("emp_001").await.unwrap().unwrap();
        assert_eq!(employee.status, EmployeeStatus::Inactive);
        assert_eq!(store.punch_count("emp_001").await, 0);
    }

    #[tokio::test]
    async fn test_update_unknown_employee_is_not_found() {
        let store = MemoryClockStore::new();
        let mut tx = store.begin().await.unwrap();
        let result = tx
            .update_employee_status("emp_404", EmployeeStatus::Working)
            .await;
        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }

    #[tokio::test]
    async fn test_corrupt_row_surfaces_invalid_state() {
        let store = MemoryClockStore::new();
        store
            .insert_row(EmployeeRow {
                id: "emp_009".to_string(),
                name: "Legacy".to_string(),
                pay_rate: Decimal::ONE,
                status: "paused".to_string(),
            })
            .await;

        assert!(matches!(
            store.get_employee("emp_009").await,
            Err(EngineError::InvalidState { .. })
        ));
        assert!(matches!(
            store.list_all_employees().await,
            Err(EngineError::InvalidState { .. })
        ));
        assert_eq!(store.list_employee_rows().await.unwrap().len(), 1);
    }
}
