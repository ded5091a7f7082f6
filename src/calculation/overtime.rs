//! Overtime premium calculation.
//!
//! Overtime is paid as a premium over the configured hourly overtime value:
//! daytime hours at the day multiplier and night hours at the night
//! multiplier.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::error::ValidationError;
use crate::models::AuditStep;

use super::amounts::{add, mul};

/// The result of calculating overtime premiums.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// Premium for daytime overtime hours.
    pub day_pay: Decimal,
    /// Premium for night overtime hours.
    pub night_pay: Decimal,
    /// Day plus night premium.
    pub overtime_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the overtime premium for day and night hours.
///
/// `hours * overtime_hour_value * multiplier` for each kind of hour. The
/// hours are expected to have been validated as non-negative.
///
/// # Errors
///
/// Returns [`ValidationError::AmountOutOfRange`] when a premium overflows.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::calculate_overtime_pay;
/// use nomina_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let result = calculate_overtime_pay(2, 1, &PayrollConfig::default(), 1).unwrap();
/// assert_eq!(result.overtime_pay, Decimal::from_str("7736.25").unwrap());
/// ```
pub fn calculate_overtime_pay(
    day_hours: i32,
    night_hours: i32,
    config: &PayrollConfig,
    step_number: u32,
) -> Result<OvertimePayResult, ValidationError> {
    let day_pay = mul(
        mul(Decimal::from(day_hours), config.overtime_hour_value, "day overtime pay")?,
        config.day_overtime_multiplier,
        "day overtime pay",
    )?;
    let night_pay = mul(
        mul(Decimal::from(night_hours), config.overtime_hour_value, "night overtime pay")?,
        config.night_overtime_multiplier,
        "night overtime pay",
    )?;
    let overtime_pay = add(day_pay, night_pay, "overtime pay")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Premium".to_string(),
        input: serde_json::json!({
            "day_overtime_hours": day_hours,
            "night_overtime_hours": night_hours,
            "overtime_hour_value": config.overtime_hour_value.normalize().to_string(),
            "day_overtime_multiplier": config.day_overtime_multiplier.normalize().to_string(),
            "night_overtime_multiplier": config.night_overtime_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "day_pay": day_pay.normalize().to_string(),
            "night_pay": night_pay.normalize().to_string(),
            "overtime_pay": overtime_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{}h x ${} x {} + {}h x ${} x {} = ${}",
            day_hours,
            config.overtime_hour_value.normalize(),
            config.day_overtime_multiplier.normalize(),
            night_hours,
            config.overtime_hour_value.normalize(),
            config.night_overtime_multiplier.normalize(),
            overtime_pay.normalize()
        ),
    };

    Ok(OvertimePayResult {
        day_pay,
        night_pay,
        overtime_pay,
        audit_step,
    })
}
