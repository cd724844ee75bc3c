//! Clock, timecard, payroll and employee administration operations.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_payroll_report, calculate_timecard, failed_payroll_entry, needs_lookback,
    next_transition, payroll_entry_from_timecard,
};
use crate::config::{ConfigLoader, PayrollFailurePolicy, SeedEmployee, UnterminatedShiftPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Employee, PayrollReport, PunchEvent, PunchType, Timecard};
use crate::store::ClockStore;

use super::employee_locks::EmployeeLocks;
use super::time_source::{SystemTimeSource, TimeSource};

/// The outcome of a clock action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockActionResult {
    /// The employee after the status change.
    pub employee: Employee,
    /// Human-readable label for the new status, e.g. "Started Lunch".
    pub status_label: String,
    /// The punch that was recorded.
    pub punch_event: PunchEvent,
}

/// Entry point for every time-clock operation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rust_decimal::Decimal;
/// use timeclock_engine::models::EmployeeStatus;
/// use timeclock_engine::service::ClockService;
/// use timeclock_engine::store::MemoryClockStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let service = ClockService::new(Arc::new(MemoryClockStore::new()));
/// let employee = service.create_employee("Dana Reyes", Decimal::new(2500, 2)).await.unwrap();
///
/// let result = service.perform_clock_action(&employee.id, None).await.unwrap();
/// assert_eq!(result.status_label, "Clocked In");
/// assert_eq!(result.employee.status, EmployeeStatus::Working);
/// # }
/// ```
pub struct ClockService {
    store: Arc<dyn ClockStore>,
    locks: EmployeeLocks,
    clock: Arc<dyn TimeSource>,
    shift_policy: UnterminatedShiftPolicy,
    failure_policy: PayrollFailurePolicy,
}

impl ClockService {
    /// Creates a service on the system clock with default policies.
    pub fn new(store: Arc<dyn ClockStore>) -> Self {
        Self {
            store,
            locks: EmployeeLocks::new(),
            clock: Arc::new(SystemTimeSource),
            shift_policy: UnterminatedShiftPolicy::default(),
            failure_policy: PayrollFailurePolicy::default(),
        }
    }

    /// Creates a service with the policies from the loaded configuration.
    pub fn from_config(store: Arc<dyn ClockStore>, config: &ConfigLoader) -> Self {
        Self::new(store)
            .with_shift_policy(config.unterminated_shift_policy())
            .with_failure_policy(config.payroll_failure_policy())
    }

    /// Replaces the time source.
    pub fn with_time_source(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets how open segments are credited.
    pub fn with_shift_policy(mut self, policy: UnterminatedShiftPolicy) -> Self {
        self.shift_policy = policy;
        self
    }

    /// Sets how per-employee payroll failures are handled.
    pub fn with_failure_policy(mut self, policy: PayrollFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Advances the employee one step through the clock cycle.
    ///
    /// The status update and the punch are committed together. On any error
    /// nothing is written. Unknown ids never get a lock entry.
    pub async fn perform_clock_action(
        &self,
        employee_id: &str,
        device_id: Option<String>,
    ) -> EngineResult<ClockActionResult> {
        if self.store.get_employee_row(employee_id).await?.is_none() {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }

        let guard = self.locks.acquire(employee_id).await;
        let mut tx = self.store.begin().await?;

        let employee = match tx.get_employee(employee_id).await {
            Ok(Some(employee)) => employee,
            Ok(None) => {
                // Deleted between the existence check and the lock.
                drop(tx);
                drop(guard);
                self.locks.forget(employee_id).await;
                return Err(EngineError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                });
            }
            Err(err @ EngineError::InvalidState { .. }) => {
                error!(employee_id = %employee_id, error = %err, "Corrupt employee status");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let last_punch_type = if needs_lookback(employee.status) {
            tx.last_punch(employee_id).await?.map(|p| p.punch_type)
        } else {
            None
        };
        let transition = next_transition(employee.status, last_punch_type);
        debug!(
            employee_id = %employee_id,
            from = %employee.status,
            to = %transition.next_status,
            "Clock transition decided"
        );

        let updated = tx
            .update_employee_status(employee_id, transition.next_status)
            .await?;
        let punch = PunchEvent::new(
            employee_id,
            transition.punch_type,
            self.clock.now(),
            device_id,
        );
        tx.append_punch(punch.clone()).await?;
        tx.commit().await?;

        info!(
            employee_id = %employee_id,
            punch_type = %punch.punch_type.as_str(),
            status = %updated.status,
            "Clock action recorded"
        );

        Ok(ClockActionResult {
            employee: updated,
            status_label: transition.label.to_string(),
            punch_event: punch,
        })
    }

    /// The type of the employee's most recent punch, if any.
    pub async fn last_punch_type(&self, employee_id: &str) -> EngineResult<Option<PunchType>> {
        Ok(self
            .store
            .last_punch(employee_id)
            .await?
            .map(|p| p.punch_type))
    }

    /// Computes the employee's timecard over `range`.
    pub async fn compute_timecard(
        &self,
        employee_id: &str,
        range: &DateRange,
    ) -> EngineResult<Timecard> {
        let employee = self
            .store
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;
        self.timecard_for(&employee, range).await
    }

    async fn timecard_for(&self, employee: &Employee, range: &DateRange) -> EngineResult<Timecard> {
        let punches = self
            .store
            .list_punches(&employee.id, range.start, range.end)
            .await?;
        Ok(calculate_timecard(
            employee,
            &punches,
            range,
            self.shift_policy,
            self.clock.now(),
        ))
    }

    /// Computes one payroll row per employee over `range`.
    ///
    /// Under [`PayrollFailurePolicy::FailFast`] the first failing employee
    /// aborts the export. Under [`PayrollFailurePolicy::Isolate`] the row
    /// carries the error with zero totals and the export continues.
    pub async fn export_all_hours(&self, range: &DateRange) -> EngineResult<PayrollReport> {
        let start_time = Instant::now();
        let rows = self.store.list_employee_rows().await?;
        let mut entries = Vec::with_capacity(rows.len());

        for row in rows {
            let outcome = match Employee::try_from(row.clone()) {
                Ok(employee) => self.timecard_for(&employee, range).await,
                Err(err) => Err(err),
            };

            match (outcome, self.failure_policy) {
                (Ok(timecard), _) => entries.push(payroll_entry_from_timecard(timecard)),
                (Err(err), PayrollFailurePolicy::FailFast) => {
                    error!(employee_id = %row.id, error = %err, "Payroll export aborted");
                    return Err(err);
                }
                (Err(err), PayrollFailurePolicy::Isolate) => {
                    warn!(employee_id = %row.id, error = %err, "Payroll row failed");
                    entries.push(failed_payroll_entry(
                        &row.id,
                        &row.name,
                        row.pay_rate,
                        err.to_string(),
                    ));
                }
            }
        }

        let report = build_payroll_report(range, entries);
        info!(
            employees = report.entries.len(),
            failed = report.failed_count,
            total_pay = %report.total_pay,
            duration_us = start_time.elapsed().as_micros() as u64,
            "Payroll export completed"
        );
        Ok(report)
    }

    /// Creates an inactive employee with a generated id.
    pub async fn create_employee(&self, name: &str, pay_rate: Decimal) -> EngineResult<Employee> {
        self.register(Uuid::new_v4().to_string(), name, pay_rate)
            .await
    }

    async fn register(&self, id: String, name: &str, pay_rate: Decimal) -> EngineResult<Employee> {
        if name.trim().is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        if pay_rate < Decimal::ZERO {
            return Err(EngineError::validation(
                "pay_rate",
                format!("must not be negative, got {}", pay_rate),
            ));
        }

        let employee = Employee::new(id, name.trim(), pay_rate);
        self.store.insert_employee(&employee).await?;
        info!(employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    /// Creates the configured seed employees. Returns how many were created.
    pub async fn seed_employees(&self, seeds: &[SeedEmployee]) -> EngineResult<usize> {
        for seed in seeds {
            let id = seed
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string());
            self.register(id, &seed.name, seed.pay_rate).await?;
        }
        Ok(seeds.len())
    }

    /// Lists every employee.
    pub async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.store.list_all_employees().await
    }

    /// Fetches one employee.
    pub async fn get_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.store
            .get_employee(employee_id)
            .await?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Removes an employee record. Their punches are kept.
    pub async fn delete_employee(&self, employee_id: &str) -> EngineResult<()> {
        let guard = self.locks.acquire(employee_id).await;
        if !self.store.delete_employee(employee_id).await? {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }
        drop(guard);
        self.locks.forget(employee_id).await;
        info!(employee_id = %employee_id, "Employee deleted");
        Ok(())
    }
}
