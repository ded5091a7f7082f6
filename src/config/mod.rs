//! Configuration loading and resolution for the payroll engine.
//!
//! Parameters live in a [`ParameterStore`] (usually an
//! [`InMemoryParameterStore`] filled by [`ConfigLoader`] from YAML). The
//! [`ConfigurationResolver`] turns the store into a [`PayrollConfig`]
//! snapshot, substituting defaults where needed.
//!
//! # Example
//!
//! ```no_run
//! use nomina_engine::config::{ConfigLoader, ConfigurationResolver};
//! use std::sync::Arc;
//!
//! let store = ConfigLoader::load("./config").unwrap().into_store();
//! let config = ConfigurationResolver::new(Arc::new(store)).resolve();
//! println!("Minimum wage: {}", config.minimum_wage);
//! ```

mod loader;
mod resolver;
mod store;
mod types;

pub use loader::{ConfigLoader, PARAMETERS_FILE};
pub use resolver::{ConfigurationResolver, FallbackPolicy};
pub use store::{InMemoryParameterStore, MAX_PARAMETER_NAME_LEN, ParameterStore};
pub use types::{
    DEFAULT_SUBSIDY_THRESHOLD, MAX_PARAMETER_VALUE, ParameterEntry, ParameterName, ParametersFile,
    PayrollConfig,
};
