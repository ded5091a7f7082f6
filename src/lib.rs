//! Payroll settlement engine for Colombian-style payroll rules
//!
//! This crate resolves the payroll parameters (overtime rates, minimum wage,
//! transport subsidy, deduction rates and limits) from a parameter store and
//! computes an employee's monthly net pay from them, with an audit trace of
//! every rule applied.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
