//! Settlement derivation.
//!
//! Turns an employee, a payroll input and a configuration into the
//! [`Settlement`] record a caller persists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{Employee, PayrollInput, Settlement};

use super::calculator::PayrollCalculator;
use super::transport_subsidy::{SubsidyRule, calculate_transport_subsidy};

/// Computes a settlement for an employee.
///
/// The net total always comes from the calculator. The transport subsidy
/// recorded on the settlement is derived with `subsidy_rule`, which may
/// differ from the calculator's strict rule for a salary exactly at the
/// threshold; that case is logged.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEmployee`](crate::error::EngineError::InvalidEmployee)
/// when the employee record is invalid as of `settlement_date`, or
/// [`EngineError::Validation`](crate::error::EngineError::Validation) when the
/// input breaks a settlement rule.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::{settle, SubsidyRule};
/// use nomina_engine::config::PayrollConfig;
/// use nomina_engine::models::{Employee, PayrollInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new(
///     "Ana Restrepo",
///     "1020304050",
///     Decimal::from(2_000_000),
///     NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
/// );
/// let input = PayrollInput::new(employee.base_salary, 0, 0);
/// let settlement = settle(
///     &employee,
///     &input,
///     NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
///     &PayrollConfig::default(),
///     SubsidyRule::BelowThreshold,
/// )
/// .unwrap();
///
/// assert_eq!(settlement.employee_id, employee.id);
/// assert_eq!(settlement.transport_subsidy, Decimal::from(162_000));
/// ```
pub fn settle(
    employee: &Employee,
    input: &PayrollInput,
    settlement_date: NaiveDate,
    config: &PayrollConfig,
    subsidy_rule: SubsidyRule,
) -> EngineResult<Settlement> {
    employee.validate(settlement_date)?;

    let result = PayrollCalculator::new(config.clone()).compute(input)?;

    let recorded = calculate_transport_subsidy(input.base_salary, config, subsidy_rule, 1);
    if recorded.transport_subsidy != result.transport_subsidy {
        tracing::warn!(
            employee_id = %employee.id,
            base_salary = %input.base_salary,
            threshold = %config.subsidy_threshold(),
            rule = ?subsidy_rule,
            recorded = %recorded.transport_subsidy,
            calculated = %result.transport_subsidy,
            "Recorded transport subsidy differs from the one in the net total"
        );
    }

    let settlement = Settlement {
        id: Uuid::new_v4(),
        employee_id: employee.id,
        settlement_date,
        base_salary: input.base_salary,
        day_overtime_hours: input.day_overtime_hours,
        night_overtime_hours: input.night_overtime_hours,
        extra_bonus: input.extra_bonus,
        extra_deduction: input.extra_deduction,
        transport_subsidy: recorded.transport_subsidy,
        net_total: result.net_total,
    };

    tracing::info!(
        settlement_id = %settlement.id,
        employee_id = %employee.id,
        net_total = %settlement.net_total,
        "Settlement computed"
    );

    Ok(settlement)
}
