//! Configuration loading and management for the time-clock engine.
//!
//! This module loads the engine configuration from a YAML file: server
//! address, timecard and payroll policies, and startup seed data.
//!
//! # Example
//!
//! ```no_run
//! use timeclock_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/timeclock.yaml").unwrap();
//! println!("Payroll policy: {:?}", config.payroll_failure_policy());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, PayrollConfig, PayrollFailurePolicy, SeedConfig, SeedEmployee, ServerConfig,
    TimecardConfig, UnterminatedShiftPolicy,
};
