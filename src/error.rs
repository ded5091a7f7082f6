//! Error types for the payroll engine.
//!
//! Two layers of errors live here. [`ValidationError`] covers the business
//! rules a payroll input can break; each variant is a distinct condition with
//! a message meant to be shown to the end user as-is. [`EngineError`] covers
//! everything else (configuration files, parameter stores, record fields) and
//! wraps validation failures so callers can use a single `?` chain.

use rust_decimal::Decimal;
use thiserror::Error;

/// A payroll input that breaks one of the settlement rules.
///
/// The calculator reports the first rule broken, in the order the rules are
/// checked, and performs no computation once a rule fails.
///
/// # Example
///
/// ```
/// use nomina_engine::error::ValidationError;
///
/// let error = ValidationError::NegativeSalary;
/// assert_eq!(error.code(), "NEGATIVE_SALARY");
/// assert_eq!(error.to_string(), "Negative salary: the base salary cannot be negative");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The base salary is below zero.
    #[error("Negative salary: the base salary cannot be negative")]
    NegativeSalary,

    /// Day or night overtime hours are below zero.
    #[error("Negative hours: overtime hours cannot be negative")]
    NegativeHours,

    /// Day plus night overtime hours reach or exceed the configured limit.
    #[error(
        "Overtime limit exceeded: {total_hours} overtime hours reach the limit of {limit}, \
         overtime must stay below the limit"
    )]
    OvertimeLimitExceeded {
        /// Day plus night overtime hours requested.
        total_hours: i64,
        /// The configured maximum (exclusive).
        limit: u32,
    },

    /// The extra bonus is below zero.
    #[error("Negative bonus: the extra bonus cannot be negative")]
    NegativeBonus,

    /// The extra deduction is below zero.
    #[error("Negative deduction: the extra deduction cannot be negative")]
    NegativeDeduction,

    /// Deductions are larger than the share of base salary allowed.
    #[error("Deduction cap exceeded: deductions of {deductions} are above the cap of {cap}")]
    DeductionCapExceeded {
        /// The provisional deductions that were checked.
        deductions: Decimal,
        /// The largest deduction allowed for the base salary.
        cap: Decimal,
    },

    /// An amount derived from the input is too large to represent.
    #[error("Amount out of range: the {quantity} is too large to compute")]
    AmountOutOfRange {
        /// The quantity whose computation overflowed.
        quantity: &'static str,
    },
}

impl ValidationError {
    /// Returns a stable, machine-readable code for the error.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::NegativeSalary => "NEGATIVE_SALARY",
            ValidationError::NegativeHours => "NEGATIVE_HOURS",
            ValidationError::OvertimeLimitExceeded { .. } => "OVERTIME_LIMIT_EXCEEDED",
            ValidationError::NegativeBonus => "NEGATIVE_BONUS",
            ValidationError::NegativeDeduction => "NEGATIVE_DEDUCTION",
            ValidationError::DeductionCapExceeded { .. } => "DEDUCTION_CAP_EXCEEDED",
            ValidationError::AmountOutOfRange { .. } => "AMOUNT_OUT_OF_RANGE",
        }
    }
}

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use nomina_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/parameters.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/parameters.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The parameter store could not answer a lookup.
    #[error("Parameter store lookup for '{name}' failed: {message}")]
    ParameterStore {
        /// The parameter being looked up.
        name: String,
        /// A description of the failure.
        message: String,
    },

    /// A parameter name or value was rejected.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// The offending parameter name.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The payroll input broke a settlement rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
