//! Legal deductions and the deduction cap.
//!
//! Deductions are the configured rate applied to base salary plus overtime
//! plus bonuses, plus any extra deduction. Before a settlement is accepted
//! the deductions are checked against a cap expressed as a share of the
//! base salary.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::error::ValidationError;
use crate::models::AuditStep;

use super::amounts::{add, mul};

/// Applies the deduction formula.
///
/// `(base_salary + overtime_pay + bonuses) * deduction_rate + extra_deduction`
///
/// # Errors
///
/// Returns [`ValidationError::AmountOutOfRange`] when an intermediate amount
/// overflows.
pub fn deductions_for(
    base_salary: Decimal,
    overtime_pay: Decimal,
    bonuses: Decimal,
    extra_deduction: Decimal,
    config: &PayrollConfig,
) -> Result<Decimal, ValidationError> {
    let income = income_for(base_salary, overtime_pay, bonuses)?;
    add(
        mul(income, config.deduction_rate, "deductions")?,
        extra_deduction,
        "deductions",
    )
}

fn income_for(
    base_salary: Decimal,
    overtime_pay: Decimal,
    bonuses: Decimal,
) -> Result<Decimal, ValidationError> {
    add(add(base_salary, overtime_pay, "income")?, bonuses, "income")
}

/// The result of a deduction cap check that passed.
#[derive(Debug, Clone)]
pub struct DeductionCapCheck {
    /// The deductions that were checked.
    pub provisional_deductions: Decimal,
    /// The largest deduction allowed.
    pub cap: Decimal,
    /// The audit step recording the check.
    pub audit_step: AuditStep,
}

/// Checks provisional deductions against the cap.
///
/// The provisional deductions count the transport subsidy but not the extra
/// bonus; the final deductions include both.
///
/// # Errors
///
/// Returns [`ValidationError::DeductionCapExceeded`] when the provisional
/// deductions are strictly greater than `base_salary * max_deduction_rate`.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::check_deduction_cap;
/// use nomina_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// let check = check_deduction_cap(
///     Decimal::from(2_000_000),
///     Decimal::ZERO,
///     Decimal::from(162_000),
///     Decimal::ZERO,
///     &config,
///     1,
/// )
/// .unwrap();
/// assert_eq!(check.cap, Decimal::from(800_000));
/// ```
pub fn check_deduction_cap(
    base_salary: Decimal,
    overtime_pay: Decimal,
    transport_subsidy: Decimal,
    extra_deduction: Decimal,
    config: &PayrollConfig,
    step_number: u32,
) -> Result<DeductionCapCheck, ValidationError> {
    let provisional_deductions = deductions_for(
        base_salary,
        overtime_pay,
        transport_subsidy,
        extra_deduction,
        config,
    )?;
    let cap = mul(base_salary, config.max_deduction_rate, "deduction cap")?;

    if provisional_deductions > cap {
        return Err(ValidationError::DeductionCapExceeded {
            deductions: provisional_deductions,
            cap,
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "deduction_cap".to_string(),
        rule_name: "Deduction Cap".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "transport_subsidy": transport_subsidy.normalize().to_string(),
            "extra_deduction": extra_deduction.normalize().to_string(),
            "max_deduction_rate": config.max_deduction_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "provisional_deductions": provisional_deductions.normalize().to_string(),
            "cap": cap.normalize().to_string()
        }),
        reasoning: format!(
            "${} <= ${} x {} = ${}",
            provisional_deductions.normalize(),
            base_salary.normalize(),
            config.max_deduction_rate.normalize(),
            cap.normalize()
        ),
    };

    Ok(DeductionCapCheck {
        provisional_deductions,
        cap,
        audit_step,
    })
}

/// The result of calculating the final deductions.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// Legal deductions plus extra deduction.
    pub total_deductions: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the final deductions over base salary, overtime and all bonuses.
///
/// # Errors
///
/// Returns [`ValidationError::AmountOutOfRange`] when an amount overflows.
pub fn calculate_deductions(
    base_salary: Decimal,
    overtime_pay: Decimal,
    total_bonuses: Decimal,
    extra_deduction: Decimal,
    config: &PayrollConfig,
    step_number: u32,
) -> Result<DeductionsResult, ValidationError> {
    let total_deductions = deductions_for(
        base_salary,
        overtime_pay,
        total_bonuses,
        extra_deduction,
        config,
    )?;
    let income = income_for(base_salary, overtime_pay, total_bonuses)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Legal Deductions".to_string(),
        input: serde_json::json!({
            "income": income.normalize().to_string(),
            "deduction_rate": config.deduction_rate.normalize().to_string(),
            "extra_deduction": extra_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} + ${} = ${}",
            income.normalize(),
            config.deduction_rate.normalize(),
            extra_deduction.normalize(),
            total_deductions.normalize()
        ),
    };

    Ok(DeductionsResult {
        total_deductions,
        audit_step,
    })
}
