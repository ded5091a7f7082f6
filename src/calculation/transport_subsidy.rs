//! Transport subsidy eligibility and amount.
//!
//! The subsidy is paid to employees whose base salary sits below a multiple
//! of the minimum wage. Two comparison rules exist at the threshold: the
//! calculator pays strictly below it, while the console settlement flow
//! also pays at exactly the threshold. Both are kept as explicit
//! [`SubsidyRule`]s.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollConfig;
use crate::models::AuditStep;

/// How the base salary is compared against the subsidy threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsidyRule {
    /// Eligible when `base_salary < threshold`. Used by the calculator.
    #[default]
    BelowThreshold,
    /// Eligible when `base_salary <= threshold`.
    AtOrBelowThreshold,
}

impl SubsidyRule {
    /// Returns true if a salary qualifies under this rule.
    pub fn is_eligible(&self, base_salary: Decimal, threshold: Decimal) -> bool {
        match self {
            SubsidyRule::BelowThreshold => base_salary < threshold,
            SubsidyRule::AtOrBelowThreshold => base_salary <= threshold,
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            SubsidyRule::BelowThreshold => "<",
            SubsidyRule::AtOrBelowThreshold => "<=",
        }
    }
}

/// The result of determining the transport subsidy.
#[derive(Debug, Clone)]
pub struct TransportSubsidyResult {
    /// Whether the salary qualifies.
    pub eligible: bool,
    /// The subsidy amount (zero when not eligible).
    pub transport_subsidy: Decimal,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Determines the transport subsidy for a base salary.
///
/// The threshold is [`PayrollConfig::subsidy_threshold`].
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::{calculate_transport_subsidy, SubsidyRule};
/// use nomina_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// let result = calculate_transport_subsidy(
///     Decimal::from(2_000_000),
///     &config,
///     SubsidyRule::BelowThreshold,
///     1,
/// );
/// assert_eq!(result.transport_subsidy, Decimal::from(162_000));
/// ```
pub fn calculate_transport_subsidy(
    base_salary: Decimal,
    config: &PayrollConfig,
    rule: SubsidyRule,
    step_number: u32,
) -> TransportSubsidyResult {
    let threshold = config.subsidy_threshold();
    let eligible = rule.is_eligible(base_salary, threshold);
    let transport_subsidy = if eligible {
        config.transport_subsidy_amount
    } else {
        Decimal::ZERO
    };

    let reasoning = if eligible {
        format!(
            "${} {} ${}: subsidy of ${} applies",
            base_salary.normalize(),
            rule.operator(),
            threshold.normalize(),
            transport_subsidy.normalize()
        )
    } else {
        format!(
            "No transport subsidy - ${} is not {} ${}",
            base_salary.normalize(),
            rule.operator(),
            threshold.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "transport_subsidy".to_string(),
        rule_name: "Transport Subsidy".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "threshold": threshold.normalize().to_string(),
            "rule": rule
        }),
        output: serde_json::json!({
            "eligible": eligible,
            "transport_subsidy": transport_subsidy.normalize().to_string()
        }),
        reasoning,
    };

    TransportSubsidyResult {
        eligible,
        transport_subsidy,
        audit_step,
    }
}
