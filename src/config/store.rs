//! Parameter store abstraction.
//!
//! The calculator never reads parameters directly; it receives a resolved
//! [`PayrollConfig`](super::PayrollConfig). The store is the collaborator the
//! resolver asks for raw values, one name at a time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};

use super::types::{ParameterEntry, ParameterName};

/// Longest parameter name the store accepts.
pub const MAX_PARAMETER_NAME_LEN: usize = 50;

/// A key-value source of payroll parameters.
///
/// `Ok(None)` means the parameter is not defined; `Err` means the store could
/// not answer at all.
pub trait ParameterStore: Send + Sync {
    /// Looks up a parameter value by name.
    fn get(&self, name: &str) -> EngineResult<Option<Decimal>>;
}

/// A parameter store held in memory.
///
/// Used as the backing store for parameters loaded from YAML and for
/// parameters edited at runtime through the API.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    entries: RwLock<BTreeMap<String, ParameterEntry>>,
}

impl InMemoryParameterStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    ///
    /// Later entries with the same name replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = ParameterEntry>) -> Self {
        let map = entries
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Sets a parameter value, stamping it with `updated_on`.
    ///
    /// The name must be non-empty, at most [`MAX_PARAMETER_NAME_LEN`]
    /// characters, and one of the known [`ParameterName`] keys.
    pub fn set(&self, name: &str, value: Decimal, updated_on: NaiveDate) -> EngineResult<()> {
        validate_parameter_name(name)?;

        let mut entries = self.write_entries(name)?;
        let entry = entries
            .entry(name.to_string())
            .or_insert_with(|| ParameterEntry {
                name: name.to_string(),
                value,
                description: None,
                updated_on: None,
            });
        entry.value = value;
        entry.updated_on = Some(updated_on);

        tracing::info!(parameter = name, value = %value, "Parameter updated");
        Ok(())
    }

    /// Removes a parameter, returning its previous entry if there was one.
    pub fn remove(&self, name: &str) -> EngineResult<Option<ParameterEntry>> {
        Ok(self.write_entries(name)?.remove(name))
    }

    /// Returns every entry, sorted by name.
    pub fn entries(&self) -> EngineResult<Vec<ParameterEntry>> {
        let entries = self.entries.read().map_err(|_| EngineError::ParameterStore {
            name: "*".to_string(),
            message: "parameter store lock poisoned".to_string(),
        })?;
        Ok(entries.values().cloned().collect())
    }

    fn write_entries(
        &self,
        name: &str,
    ) -> EngineResult<std::sync::RwLockWriteGuard<'_, BTreeMap<String, ParameterEntry>>> {
        self.entries.write().map_err(|_| EngineError::ParameterStore {
            name: name.to_string(),
            message: "parameter store lock poisoned".to_string(),
        })
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn get(&self, name: &str) -> EngineResult<Option<Decimal>> {
        let entries = self.entries.read().map_err(|_| EngineError::ParameterStore {
            name: name.to_string(),
            message: "parameter store lock poisoned".to_string(),
        })?;
        Ok(entries.get(name).map(|entry| entry.value))
    }
}

fn validate_parameter_name(name: &str) -> EngineResult<()> {
    if name.trim().is_empty() {
        return Err(EngineError::InvalidParameter {
            name: name.to_string(),
            message: "parameter name is required".to_string(),
        });
    }
    if name.chars().count() > MAX_PARAMETER_NAME_LEN {
        return Err(EngineError::InvalidParameter {
            name: name.to_string(),
            message: format!(
                "parameter name cannot exceed {} characters",
                MAX_PARAMETER_NAME_LEN
            ),
        });
    }
    name.parse::<ParameterName>().map(|_| ())
}
