//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! parameters from a YAML file into an [`InMemoryParameterStore`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::store::InMemoryParameterStore;
use super::types::{ParameterEntry, ParameterName, ParametersFile};

/// File name of the parameter file inside a configuration directory.
pub const PARAMETERS_FILE: &str = "parameters.yaml";

/// Loads payroll parameters from a configuration directory.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── parameters.yaml   # Named payroll parameters
/// ```
///
/// Each entry names one of the known parameters. A file does not have to
/// define every parameter; missing ones are filled from defaults at
/// resolution time.
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::{ConfigLoader, ParameterStore};
///
/// let loader = ConfigLoader::load("./config")?;
/// let store = loader.into_store();
/// println!("Minimum wage: {:?}", store.get("minimum_wage")?);
/// # Ok::<(), nomina_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    entries: Vec<ParameterEntry>,
}

impl ConfigLoader {
    /// Loads the parameter file from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `parameters.yaml` is missing
    /// - the file contains invalid YAML
    /// - an entry names an unknown parameter, or a parameter appears twice
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file_path = path.as_ref().join(PARAMETERS_FILE);
        let file = Self::load_yaml::<ParametersFile>(&file_path)?;
        Self::check_entries(&file_path, &file.parameters)?;

        tracing::debug!(
            path = %file_path.display(),
            parameters = file.parameters.len(),
            "Loaded payroll parameters"
        );

        Ok(Self {
            entries: file.parameters,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_entries(path: &Path, entries: &[ParameterEntry]) -> EngineResult<()> {
        let mut seen = HashSet::new();
        for entry in entries {
            if entry.name.parse::<ParameterName>().is_err() {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("unknown parameter '{}'", entry.name),
                });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("parameter '{}' is defined more than once", entry.name),
                });
            }
        }
        Ok(())
    }

    /// Returns the loaded entries in file order.
    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    /// Consumes the loader, producing a store holding the loaded entries.
    pub fn into_store(self) -> InMemoryParameterStore {
        InMemoryParameterStore::from_entries(self.entries)
    }
}
