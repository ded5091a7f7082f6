//! The payroll calculator.
//!
//! [`PayrollCalculator`] validates a [`PayrollInput`] and computes the
//! settlement amounts over one [`PayrollConfig`] snapshot. It holds no
//! state besides the configuration, so a calculator can be shared freely
//! between threads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;
use crate::error::ValidationError;
use crate::models::{AuditStep, AuditTrace, PayrollInput, PayrollResult};

use super::amounts::{add, sub};
use super::deductions::{calculate_deductions, check_deduction_cap};
use super::overtime::calculate_overtime_pay;
use super::transport_subsidy::{SubsidyRule, calculate_transport_subsidy};
use super::validation::validate_input;

/// A payroll result together with the audit trace that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The computed amounts.
    pub result: PayrollResult,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}

/// Validates payroll inputs and computes settlement totals.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::PayrollCalculator;
/// use nomina_engine::config::PayrollConfig;
/// use nomina_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let calculator = PayrollCalculator::new(PayrollConfig::default());
/// let input = PayrollInput::new(Decimal::from(2_000_000), 0, 0);
///
/// let result = calculator.compute(&input).unwrap();
/// assert_eq!(result.net_total, Decimal::from_str("1989040.00").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollCalculator {
    config: PayrollConfig,
}

impl PayrollCalculator {
    /// Creates a calculator over a configuration snapshot.
    pub fn new(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the calculator uses.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Runs every validation rule, including the deduction cap, without
    /// producing a result.
    pub fn validate(&self, input: &PayrollInput) -> Result<(), ValidationError> {
        self.compute_with_audit(input).map(|_| ())
    }

    /// Validates the input and computes the settlement amounts.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the input triggers; nothing is
    /// computed past a failing rule.
    pub fn compute(&self, input: &PayrollInput) -> Result<PayrollResult, ValidationError> {
        self.compute_with_audit(input).map(|calculation| calculation.result)
    }

    /// Like [`compute`](Self::compute) but also returns the audit trace.
    pub fn compute_with_audit(
        &self,
        input: &PayrollInput,
    ) -> Result<PayrollCalculation, ValidationError> {
        let config = &self.config;
        let mut trace = AuditTrace::default();

        trace.push(validate_input(input, config, trace.next_step_number())?);

        let overtime = calculate_overtime_pay(
            input.day_overtime_hours,
            input.night_overtime_hours,
            config,
            trace.next_step_number(),
        )?;
        trace.push(overtime.audit_step);

        let subsidy = calculate_transport_subsidy(
            input.base_salary,
            config,
            SubsidyRule::BelowThreshold,
            trace.next_step_number(),
        );
        trace.push(subsidy.audit_step);

        // The cap is checked on the subsidy alone; the extra bonus is left out.
        let cap_check = check_deduction_cap(
            input.base_salary,
            overtime.overtime_pay,
            subsidy.transport_subsidy,
            input.extra_deduction,
            config,
            trace.next_step_number(),
        )?;
        trace.push(cap_check.audit_step);

        let total_bonuses = add(subsidy.transport_subsidy, input.extra_bonus, "total bonuses")?;
        let deductions = calculate_deductions(
            input.base_salary,
            overtime.overtime_pay,
            total_bonuses,
            input.extra_deduction,
            config,
            trace.next_step_number(),
        )?;
        trace.push(deductions.audit_step);

        let gross = add(
            add(input.base_salary, overtime.overtime_pay, "net total")?,
            total_bonuses,
            "net total",
        )?;
        let net_total = sub(gross, deductions.total_deductions, "net total")?;
        trace.push(net_total_step(
            input.base_salary,
            overtime.overtime_pay,
            total_bonuses,
            deductions.total_deductions,
            net_total,
            trace.next_step_number(),
        ));

        Ok(PayrollCalculation {
            result: PayrollResult {
                overtime_pay: overtime.overtime_pay,
                transport_subsidy: subsidy.transport_subsidy,
                total_bonuses,
                total_deductions: deductions.total_deductions,
                net_total,
            },
            audit_trace: trace,
        })
    }
}

fn net_total_step(
    base_salary: Decimal,
    overtime_pay: Decimal,
    total_bonuses: Decimal,
    total_deductions: Decimal,
    net_total: Decimal,
    step_number: u32,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "net_total".to_string(),
        rule_name: "Net Total".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string(),
            "total_bonuses": total_bonuses.normalize().to_string(),
            "total_deductions": total_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_total": net_total.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} - ${} = ${}",
            base_salary.normalize(),
            overtime_pay.normalize(),
            total_bonuses.normalize(),
            total_deductions.normalize(),
            net_total.normalize()
        ),
    }
}

/// Computes the net total for a set of raw figures.
///
/// This is the single-call entry point used by front-ends that only need the
/// amount payable.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_net_total;
/// use nomina_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let total = calculate_net_total(
///     Decimal::from(1_500_000),
///     2,
///     1,
///     Decimal::ZERO,
///     Decimal::ZERO,
///     &PayrollConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(total, Decimal::from_str("1536157.35").unwrap());
/// ```
pub fn calculate_net_total(
    base_salary: Decimal,
    day_overtime_hours: i32,
    night_overtime_hours: i32,
    extra_bonus: Decimal,
    extra_deduction: Decimal,
    config: &PayrollConfig,
) -> Result<Decimal, ValidationError> {
    let input = PayrollInput {
        base_salary,
        day_overtime_hours,
        night_overtime_hours,
        extra_bonus,
        extra_deduction,
    };
    PayrollCalculator::new(config.clone())
        .compute(&input)
        .map(|result| result.net_total)
}
