//! Input validation rules.
//!
//! The rules run in a fixed order and the first one broken is reported:
//!
//! 1. negative extra bonus
//! 2. negative day or night overtime hours
//! 3. overtime hours reaching the configured limit
//! 4. negative base salary
//! 5. negative extra deduction
//!
//! The deduction cap is checked afterwards, once overtime and the subsidy
//! are known (see [`check_deduction_cap`](super::check_deduction_cap)).

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::error::ValidationError;
use crate::models::{AuditStep, PayrollInput};

/// Checks a payroll input against the field rules.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first rule the input breaks.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::validate_input;
/// use nomina_engine::config::PayrollConfig;
/// use nomina_engine::error::ValidationError;
/// use nomina_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput::new(Decimal::from(1_300_000), 36, 55);
/// let result = validate_input(&input, &PayrollConfig::default(), 1);
/// assert!(matches!(result, Err(ValidationError::OvertimeLimitExceeded { .. })));
/// ```
pub fn validate_input(
    input: &PayrollInput,
    config: &PayrollConfig,
    step_number: u32,
) -> Result<AuditStep, ValidationError> {
    if input.extra_bonus < Decimal::ZERO {
        return Err(ValidationError::NegativeBonus);
    }
    if input.day_overtime_hours < 0 || input.night_overtime_hours < 0 {
        return Err(ValidationError::NegativeHours);
    }

    let total_hours = input.total_overtime_hours();
    if total_hours >= i64::from(config.max_overtime_hours) {
        return Err(ValidationError::OvertimeLimitExceeded {
            total_hours,
            limit: config.max_overtime_hours,
        });
    }

    if input.base_salary < Decimal::ZERO {
        return Err(ValidationError::NegativeSalary);
    }
    if input.extra_deduction < Decimal::ZERO {
        return Err(ValidationError::NegativeDeduction);
    }

    Ok(AuditStep {
        step_number,
        rule_id: "input_validation".to_string(),
        rule_name: "Input Validation".to_string(),
        input: serde_json::json!({
            "base_salary": input.base_salary.normalize().to_string(),
            "total_overtime_hours": total_hours,
            "max_overtime_hours": config.max_overtime_hours,
            "extra_bonus": input.extra_bonus.normalize().to_string(),
            "extra_deduction": input.extra_deduction.normalize().to_string()
        }),
        output: serde_json::json!({ "valid": true }),
        reasoning: format!(
            "No negative amounts or hours; {} overtime hours below limit of {}",
            total_hours, config.max_overtime_hours
        ),
    })
}
