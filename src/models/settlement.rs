//! Settlement record model.
//!
//! A [`Settlement`] is what gets stored after a successful calculation: the
//! inputs that were used, the transport subsidy that applied, and the net
//! total. It is built by [`settle`](crate::calculation::settle).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayrollInput;

/// One computed payroll result for an employee on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique identifier for the settlement.
    pub id: Uuid,
    /// The employee the settlement belongs to.
    pub employee_id: Uuid,
    /// The date the settlement was made.
    pub settlement_date: NaiveDate,
    /// The monthly base salary used.
    pub base_salary: Decimal,
    /// Daytime overtime hours settled.
    pub day_overtime_hours: i32,
    /// Night overtime hours settled.
    pub night_overtime_hours: i32,
    /// The extra bonus paid.
    pub extra_bonus: Decimal,
    /// The extra deduction withheld.
    pub extra_deduction: Decimal,
    /// The transport subsidy recorded for the settlement.
    pub transport_subsidy: Decimal,
    /// The amount payable.
    pub net_total: Decimal,
}

impl Settlement {
    /// Returns the payroll input this settlement was computed from.
    pub fn input(&self) -> PayrollInput {
        PayrollInput {
            base_salary: self.base_salary,
            day_overtime_hours: self.day_overtime_hours,
            night_overtime_hours: self.night_overtime_hours,
            extra_bonus: self.extra_bonus,
            extra_deduction: self.extra_deduction,
        }
    }
}
