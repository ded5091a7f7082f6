//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod employee;
mod payroll;
mod settlement;

pub use audit::{AuditStep, AuditTrace};
pub use employee::{Employee, MAX_DOCUMENT_LEN, MAX_NAME_LEN};
pub use payroll::{PayrollInput, PayrollResult};
pub use settlement::Settlement;
