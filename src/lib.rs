//! Time-clock engine for the warehouse inventory backend.
//!
//! This crate tracks employee clock status, records immutable punch events,
//! derives timecards and payroll exports from the punch log, and keeps the
//! item stock ledger the inventory side reserves and consumes against.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod service;
pub mod store;
