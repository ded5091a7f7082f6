//! Calculation logic for the payroll engine.
//!
//! This module contains the rules a settlement is computed with: input
//! validation, overtime premiums, the transport subsidy, legal deductions
//! and the deduction cap. [`PayrollCalculator`] applies them in order, and
//! [`settle`] turns a calculation into a settlement record.

mod amounts;
mod calculator;
mod deductions;
mod overtime;
mod settlement;
mod transport_subsidy;
mod validation;

pub use calculator::{PayrollCalculation, PayrollCalculator, calculate_net_total};
pub use deductions::{
    DeductionCapCheck, DeductionsResult, calculate_deductions, check_deduction_cap,
    deductions_for,
};
pub use overtime::{OvertimePayResult, calculate_overtime_pay};
pub use settlement::settle;
pub use transport_subsidy::{SubsidyRule, TransportSubsidyResult, calculate_transport_subsidy};
pub use validation::validate_input;
