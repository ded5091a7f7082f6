//! Configuration types for payroll calculation.
//!
//! This module contains the parameter names the engine understands, the
//! resolved [`PayrollConfig`] snapshot, and the YAML structures the
//! parameter file is deserialized from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// A named payroll parameter held in the parameter store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterName {
    /// Base value of one overtime hour.
    OvertimeHourValue,
    /// Premium multiplier for daytime overtime hours.
    DayOvertimeMultiplier,
    /// Premium multiplier for night overtime hours.
    NightOvertimeMultiplier,
    /// Legal monthly minimum wage.
    MinimumWage,
    /// Multiple of the minimum wage under which the transport subsidy is paid.
    SubsidyWageMultiple,
    /// Monthly transport subsidy amount.
    TransportSubsidyAmount,
    /// Share of income withheld as legal deductions.
    DeductionRate,
    /// Overtime hours limit (exclusive).
    MaxOvertimeHours,
    /// Largest share of the base salary deductions may reach.
    MaxDeductionRate,
}

impl ParameterName {
    /// Every parameter, in resolution order.
    pub const ALL: [ParameterName; 9] = [
        ParameterName::OvertimeHourValue,
        ParameterName::DayOvertimeMultiplier,
        ParameterName::NightOvertimeMultiplier,
        ParameterName::MinimumWage,
        ParameterName::SubsidyWageMultiple,
        ParameterName::TransportSubsidyAmount,
        ParameterName::DeductionRate,
        ParameterName::MaxOvertimeHours,
        ParameterName::MaxDeductionRate,
    ];

    /// The key this parameter is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::OvertimeHourValue => "overtime_hour_value",
            ParameterName::DayOvertimeMultiplier => "day_overtime_multiplier",
            ParameterName::NightOvertimeMultiplier => "night_overtime_multiplier",
            ParameterName::MinimumWage => "minimum_wage",
            ParameterName::SubsidyWageMultiple => "subsidy_wage_multiple",
            ParameterName::TransportSubsidyAmount => "transport_subsidy_amount",
            ParameterName::DeductionRate => "deduction_rate",
            ParameterName::MaxOvertimeHours => "max_overtime_hours",
            ParameterName::MaxDeductionRate => "max_deduction_rate",
        }
    }

    /// A human-readable description of the parameter.
    pub fn description(&self) -> &'static str {
        match self {
            ParameterName::OvertimeHourValue => "Current value of one overtime hour",
            ParameterName::DayOvertimeMultiplier => "Multiplier for daytime overtime hours",
            ParameterName::NightOvertimeMultiplier => "Multiplier for night overtime hours",
            ParameterName::MinimumWage => "Legal monthly minimum wage",
            ParameterName::SubsidyWageMultiple => {
                "Minimum wages under which the transport subsidy is paid"
            }
            ParameterName::TransportSubsidyAmount => "Transport subsidy amount",
            ParameterName::DeductionRate => "Base deduction percentage",
            ParameterName::MaxOvertimeHours => "Maximum overtime hours allowed",
            ParameterName::MaxDeductionRate => "Maximum deduction percentage allowed",
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EngineError::InvalidParameter {
                name: s.to_string(),
                message: "unknown parameter name".to_string(),
            })
    }
}

/// Largest value a stored parameter may take.
///
/// Bigger values are treated as unusable by the resolver.
pub const MAX_PARAMETER_VALUE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// Salary threshold for the transport subsidy when neither the minimum wage
/// nor its multiple comes from the parameter store: twice the 2025 minimum
/// wage of 1,423,500.
pub const DEFAULT_SUBSIDY_THRESHOLD: Decimal = Decimal::from_parts(2_847_000, 0, 0, false, 0);

/// An immutable snapshot of the parameters a calculation needs.
///
/// `Default` yields the built-in values used whenever the parameter store
/// cannot supply one.
///
/// The subsidy threshold is held separately from the minimum wage. It keeps
/// [`DEFAULT_SUBSIDY_THRESHOLD`] until the resolver reads a minimum wage or
/// multiple from the store, and then becomes their product.
///
/// # Example
///
/// ```
/// use nomina_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::default();
/// assert_eq!(config.max_overtime_hours, 90);
/// assert_eq!(config.subsidy_threshold(), Decimal::from(2_847_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Base value of one overtime hour.
    pub overtime_hour_value: Decimal,
    /// Premium multiplier for daytime overtime hours.
    pub day_overtime_multiplier: Decimal,
    /// Premium multiplier for night overtime hours.
    pub night_overtime_multiplier: Decimal,
    /// Legal monthly minimum wage.
    pub minimum_wage: Decimal,
    /// Multiple of the minimum wage under which the transport subsidy is paid.
    pub subsidy_wage_multiple: Decimal,
    /// Monthly transport subsidy amount.
    pub transport_subsidy_amount: Decimal,
    /// Share of income withheld as legal deductions.
    pub deduction_rate: Decimal,
    /// Overtime hours limit; day plus night hours must stay below it.
    pub max_overtime_hours: u32,
    /// Largest share of the base salary deductions may reach.
    pub max_deduction_rate: Decimal,
    /// Salary at or above which no transport subsidy is paid.
    pub subsidy_salary_threshold: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            overtime_hour_value: Decimal::from(6189),
            day_overtime_multiplier: Decimal::new(25, 2),
            night_overtime_multiplier: Decimal::new(75, 2),
            minimum_wage: Decimal::from(1_300_000),
            subsidy_wage_multiple: Decimal::from(2),
            transport_subsidy_amount: Decimal::from(162_000),
            deduction_rate: Decimal::new(8, 2),
            max_overtime_hours: 90,
            max_deduction_rate: Decimal::new(40, 2),
            subsidy_salary_threshold: DEFAULT_SUBSIDY_THRESHOLD,
        }
    }
}

impl PayrollConfig {
    /// The salary at or above which no transport subsidy is paid.
    pub fn subsidy_threshold(&self) -> Decimal {
        self.subsidy_salary_threshold
    }

    /// Sets the subsidy threshold to `minimum_wage * subsidy_wage_multiple`.
    ///
    /// Returns `None`, leaving the threshold unchanged, if the product
    /// overflows.
    pub fn derive_subsidy_threshold(&mut self) -> Option<Decimal> {
        let threshold = self.minimum_wage.checked_mul(self.subsidy_wage_multiple)?;
        self.subsidy_salary_threshold = threshold;
        Some(threshold)
    }

    /// Returns the value this snapshot holds for a parameter.
    pub fn value_of(&self, name: ParameterName) -> Decimal {
        match name {
            ParameterName::OvertimeHourValue => self.overtime_hour_value,
            ParameterName::DayOvertimeMultiplier => self.day_overtime_multiplier,
            ParameterName::NightOvertimeMultiplier => self.night_overtime_multiplier,
            ParameterName::MinimumWage => self.minimum_wage,
            ParameterName::SubsidyWageMultiple => self.subsidy_wage_multiple,
            ParameterName::TransportSubsidyAmount => self.transport_subsidy_amount,
            ParameterName::DeductionRate => self.deduction_rate,
            ParameterName::MaxOvertimeHours => Decimal::from(self.max_overtime_hours),
            ParameterName::MaxDeductionRate => self.max_deduction_rate,
        }
    }
}

/// A single parameter as written in the parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// The parameter key (e.g. "minimum_wage").
    pub name: String,
    /// The parameter value.
    pub value: Decimal,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// The date the value was last changed.
    #[serde(default)]
    pub updated_on: Option<NaiveDate>,
}

/// Parameter file structure (`parameters.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ParametersFile {
    /// All parameters defined in the file.
    pub parameters: Vec<ParameterEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_defaults_match_legal_values() {
        let config = PayrollConfig::default();

        assert_eq!(config.overtime_hour_value, dec("6189"));
        assert_eq!(config.day_overtime_multiplier, dec("0.25"));
        assert_eq!(config.night_overtime_multiplier, dec("0.75"));
        assert_eq!(config.minimum_wage, dec("1300000"));
        assert_eq!(config.subsidy_wage_multiple, dec("2"));
        assert_eq!(config.transport_subsidy_amount, dec("162000"));
        assert_eq!(config.deduction_rate, dec("0.08"));
        assert_eq!(config.max_overtime_hours, 90);
        assert_eq!(config.max_deduction_rate, dec("0.40"));
        assert_eq!(config.subsidy_threshold(), dec("2847000"));
    }

    #[test]
    fn test_limits_have_expected_values() {
        assert_eq!(MAX_PARAMETER_VALUE, dec("1000000000000"));
        assert_eq!(DEFAULT_SUBSIDY_THRESHOLD, dec("2847000"));
    }

    #[test]
    fn test_derived_threshold_follows_minimum_wage() {
        let mut config = PayrollConfig {
            minimum_wage: dec("1300000"),
            ..PayrollConfig::default()
        };

        assert_eq!(config.derive_subsidy_threshold(), Some(dec("2600000")));
        assert_eq!(config.subsidy_threshold(), dec("2600000"));
    }

    #[test]
    fn test_overflowing_threshold_is_left_unchanged() {
        let mut config = PayrollConfig {
            minimum_wage: Decimal::MAX,
            ..PayrollConfig::default()
        };

        assert_eq!(config.derive_subsidy_threshold(), None);
        assert_eq!(config.subsidy_threshold(), dec("2847000"));
    }

    #[test]
    fn test_parameter_names_round_trip_through_keys() {
        for name in ParameterName::ALL {
            assert_eq!(ParameterName::from_str(name.as_str()).unwrap(), name);
        }
    }

    #[test]
    fn test_unknown_parameter_name_is_rejected() {
        match ParameterName::from_str("bonus_rate") {
            Err(EngineError::InvalidParameter { name, .. }) => assert_eq!(name, "bonus_rate"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_value_of_reports_max_overtime_as_decimal() {
        let config = PayrollConfig::default();
        assert_eq!(config.value_of(ParameterName::MaxOvertimeHours), dec("90"));
        assert_eq!(config.value_of(ParameterName::DeductionRate), dec("0.08"));
    }

    #[test]
    fn test_deserialize_parameter_entry_without_optional_fields() {
        let yaml = "name: minimum_wage\nvalue: \"1423500\"\n";
        let entry: ParameterEntry = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(entry.name, "minimum_wage");
        assert_eq!(entry.value, dec("1423500"));
        assert!(entry.description.is_none());
        assert!(entry.updated_on.is_none());
    }
}
