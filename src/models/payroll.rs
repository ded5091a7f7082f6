//! Payroll input and result models.
//!
//! [`PayrollInput`] carries the figures for one settlement request and
//! [`PayrollResult`] the derived amounts. Neither is persisted by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The figures a single payroll calculation is run over.
///
/// Values are not guaranteed to be valid until the calculator has checked
/// them; negative amounts and hours are representable so that they can be
/// rejected with a specific error.
///
/// # Example
///
/// ```
/// use nomina_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(Decimal::from(1_500_000), 2, 1);
/// assert_eq!(input.total_overtime_hours(), 3);
/// assert_eq!(input.extra_bonus, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The monthly base salary.
    pub base_salary: Decimal,
    /// Daytime overtime hours worked.
    pub day_overtime_hours: i32,
    /// Night overtime hours worked.
    pub night_overtime_hours: i32,
    /// Additional bonus paid on top of the transport subsidy.
    #[serde(default)]
    pub extra_bonus: Decimal,
    /// Additional deduction withheld on top of the legal deductions.
    #[serde(default)]
    pub extra_deduction: Decimal,
}

impl PayrollInput {
    /// Creates an input with no extra bonus or deduction.
    pub fn new(base_salary: Decimal, day_overtime_hours: i32, night_overtime_hours: i32) -> Self {
        Self {
            base_salary,
            day_overtime_hours,
            night_overtime_hours,
            extra_bonus: Decimal::ZERO,
            extra_deduction: Decimal::ZERO,
        }
    }

    /// Sets the extra bonus.
    pub fn with_bonus(mut self, extra_bonus: Decimal) -> Self {
        self.extra_bonus = extra_bonus;
        self
    }

    /// Sets the extra deduction.
    pub fn with_deduction(mut self, extra_deduction: Decimal) -> Self {
        self.extra_deduction = extra_deduction;
        self
    }

    /// Day plus night overtime hours, widened so the sum cannot overflow.
    pub fn total_overtime_hours(&self) -> i64 {
        i64::from(self.day_overtime_hours) + i64::from(self.night_overtime_hours)
    }
}

/// The amounts derived from a valid [`PayrollInput`].
///
/// For every result the calculator produces:
/// `net_total = base_salary + overtime_pay + total_bonuses - total_deductions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Day and night overtime premiums.
    pub overtime_pay: Decimal,
    /// Transport subsidy included in the bonuses (zero when not eligible).
    pub transport_subsidy: Decimal,
    /// Transport subsidy plus extra bonus.
    pub total_bonuses: Decimal,
    /// Legal deductions plus extra deduction.
    pub total_deductions: Decimal,
    /// The amount payable.
    pub net_total: Decimal,
}

impl PayrollResult {
    /// Returns a copy with every amount rounded to cents.
    pub fn rounded(&self) -> Self {
        Self {
            overtime_pay: self.overtime_pay.round_dp(2),
            transport_subsidy: self.transport_subsidy.round_dp(2),
            total_bonuses: self.total_bonuses.round_dp(2),
            total_deductions: self.total_deductions.round_dp(2),
            net_total: self.net_total.round_dp(2),
        }
    }
}
