//! Per-employee mutual exclusion for clock actions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per employee id.
///
/// Holding the guard serializes the read-decide-write sequence of a clock
/// action for that employee; other employees are not blocked.
#[derive(Debug, Default)]
pub struct EmployeeLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl EmployeeLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and takes the lock for `employee_id`.
    pub async fn acquire(&self, employee_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(employee_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drops the registry entry for a removed employee.
    pub async fn forget(&self, employee_id: &str) {
        self.locks.lock().await.remove(employee_id);
    }

    /// Number of employees with a registered lock.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Whether no lock has been registered yet.
    pub async fn is_empty(&self) -> bool {
        self.locks.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_employee_is_serialized() {
        let locks = Arc::new(EmployeeLocks::new());
        let guard = locks.acquire("emp_001").await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire("emp_001").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_employees_do_not_block() {
        let locks = EmployeeLocks::new();
        let _first = locks.acquire("emp_001").await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire("emp_002")).await;
        assert!(second.is_ok());
        assert_eq!(locks.len().await, 2);
    }

    #[tokio::test]
    async fn test_forget_removes_entry() {
        let locks = EmployeeLocks::new();
        drop(locks.acquire("emp_001").await);
        locks.forget("emp_001").await;
        assert!(locks.is_empty().await);
    }
}
