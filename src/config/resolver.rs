//! Configuration resolution.
//!
//! [`ConfigurationResolver`] turns a [`ParameterStore`] into a complete
//! [`PayrollConfig`]. Resolution never fails: missing parameters take their
//! default, and lookup failures are handled according to a
//! [`FallbackPolicy`].

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{EngineError, EngineResult};

use super::store::ParameterStore;
use super::types::{MAX_PARAMETER_VALUE, ParameterName, PayrollConfig};

/// What the resolver does when a parameter lookup fails.
///
/// A missing parameter is not a failure; it always takes its own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Any failure discards every looked-up value and returns the full
    /// default configuration.
    #[default]
    AllOrNothing,
    /// A failure only replaces the failing parameter with its default.
    PerParameter,
}

/// Resolves payroll parameters from a store, falling back to defaults.
///
/// # Example
///
/// ```
/// use nomina_engine::config::{ConfigurationResolver, InMemoryParameterStore, PayrollConfig};
/// use std::sync::Arc;
///
/// let resolver = ConfigurationResolver::new(Arc::new(InMemoryParameterStore::new()));
/// assert_eq!(resolver.resolve(), PayrollConfig::default());
/// ```
#[derive(Clone)]
pub struct ConfigurationResolver {
    store: Arc<dyn ParameterStore>,
    defaults: PayrollConfig,
    policy: FallbackPolicy,
}

impl std::fmt::Debug for ConfigurationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationResolver")
            .field("defaults", &self.defaults)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ConfigurationResolver {
    /// Creates a resolver with the built-in defaults and the all-or-nothing policy.
    pub fn new(store: Arc<dyn ParameterStore>) -> Self {
        Self::with_defaults(store, PayrollConfig::default())
    }

    /// Creates a resolver with an injected default configuration.
    pub fn with_defaults(store: Arc<dyn ParameterStore>, defaults: PayrollConfig) -> Self {
        Self {
            store,
            defaults,
            policy: FallbackPolicy::default(),
        }
    }

    /// Sets the fallback policy.
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the default configuration used for fallbacks.
    pub fn defaults(&self) -> &PayrollConfig {
        &self.defaults
    }

    /// Returns the active fallback policy.
    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Resolves a complete configuration snapshot.
    ///
    /// A stored value that is negative or above [`MAX_PARAMETER_VALUE`] is
    /// unusable and handled like a failed lookup. When the minimum wage or
    /// its multiple comes from the store, the subsidy threshold becomes their
    /// product; otherwise the default threshold stands.
    pub fn resolve(&self) -> PayrollConfig {
        let mut config = self.defaults.clone();
        let mut wage_from_store = false;

        for name in ParameterName::ALL {
            match self.lookup(name) {
                Ok(Some(value)) => match apply(&mut config, name, value) {
                    Ok(()) => {
                        wage_from_store |= matches!(
                            name,
                            ParameterName::MinimumWage | ParameterName::SubsidyWageMultiple
                        );
                    }
                    Err(err) => {
                        if let Some(config) = self.on_failure(name, &err) {
                            return config;
                        }
                    }
                },
                Ok(None) => {
                    tracing::debug!(parameter = %name, "Parameter not set, using default");
                }
                Err(err) => {
                    if let Some(config) = self.on_failure(name, &err) {
                        return config;
                    }
                }
            }
        }

        if wage_from_store && config.derive_subsidy_threshold().is_none() {
            let err = EngineError::InvalidParameter {
                name: ParameterName::MinimumWage.as_str().to_string(),
                message: "minimum wage times its multiple is out of range".to_string(),
            };
            if let Some(config) = self.on_failure(ParameterName::MinimumWage, &err) {
                return config;
            }
        }

        config
    }

    fn lookup(&self, name: ParameterName) -> EngineResult<Option<Decimal>> {
        self.store.get(name.as_str())
    }

    /// Logs a failure and, under the all-or-nothing policy, returns the
    /// configuration to short-circuit with.
    fn on_failure(&self, name: ParameterName, err: &EngineError) -> Option<PayrollConfig> {
        match self.policy {
            FallbackPolicy::AllOrNothing => {
                tracing::warn!(
                    parameter = %name,
                    error = %err,
                    "Parameter lookup failed, using the full default configuration"
                );
                Some(self.defaults.clone())
            }
            FallbackPolicy::PerParameter => {
                tracing::warn!(
                    parameter = %name,
                    error = %err,
                    "Parameter lookup failed, using its default"
                );
                None
            }
        }
    }
}

fn apply(config: &mut PayrollConfig, name: ParameterName, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > MAX_PARAMETER_VALUE {
        return Err(EngineError::InvalidParameter {
            name: name.as_str().to_string(),
            message: format!("{} is outside 0..={}", value, MAX_PARAMETER_VALUE),
        });
    }

    match name {
        ParameterName::OvertimeHourValue => config.overtime_hour_value = value,
        ParameterName::DayOvertimeMultiplier => config.day_overtime_multiplier = value,
        ParameterName::NightOvertimeMultiplier => config.night_overtime_multiplier = value,
        ParameterName::MinimumWage => config.minimum_wage = value,
        ParameterName::SubsidyWageMultiple => config.subsidy_wage_multiple = value,
        ParameterName::TransportSubsidyAmount => config.transport_subsidy_amount = value,
        ParameterName::DeductionRate => config.deduction_rate = value,
        ParameterName::MaxOvertimeHours => {
            config.max_overtime_hours = whole_hours(value).ok_or_else(|| {
                EngineError::InvalidParameter {
                    name: name.as_str().to_string(),
                    message: format!("{} is not a whole, non-negative number of hours", value),
                }
            })?;
        }
        ParameterName::MaxDeductionRate => config.max_deduction_rate = value,
    }
    Ok(())
}

fn whole_hours(value: Decimal) -> Option<u32> {
    if value.fract().is_zero() {
        value.to_u32()
    } else {
        None
    }
}
