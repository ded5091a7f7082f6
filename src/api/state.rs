//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::SubsidyRule;
use crate::config::{ConfigurationResolver, InMemoryParameterStore, PayrollConfig};

/// Shared application state.
///
/// Holds the parameter store the API edits and the resolver every request
/// reads its configuration snapshot from.
#[derive(Clone)]
pub struct AppState {
    store: Arc<InMemoryParameterStore>,
    resolver: Arc<ConfigurationResolver>,
    settlement_subsidy_rule: SubsidyRule,
}

impl AppState {
    /// Creates a new application state over a parameter store.
    pub fn new(store: InMemoryParameterStore) -> Self {
        let store = Arc::new(store);
        let resolver = ConfigurationResolver::new(store.clone());
        Self::with_resolver(store, resolver)
    }

    /// Creates a state with a custom resolver reading from `store`.
    pub fn with_resolver(
        store: Arc<InMemoryParameterStore>,
        resolver: ConfigurationResolver,
    ) -> Self {
        Self {
            store,
            resolver: Arc::new(resolver),
            settlement_subsidy_rule: SubsidyRule::default(),
        }
    }

    /// Sets the rule used to record the transport subsidy on settlements.
    pub fn with_settlement_subsidy_rule(mut self, rule: SubsidyRule) -> Self {
        self.settlement_subsidy_rule = rule;
        self
    }

    /// Returns the parameter store.
    pub fn store(&self) -> &InMemoryParameterStore {
        &self.store
    }

    /// Resolves the current configuration snapshot.
    pub fn resolve_config(&self) -> PayrollConfig {
        self.resolver.resolve()
    }

    /// Returns the rule used to record the transport subsidy on settlements.
    pub fn settlement_subsidy_rule(&self) -> SubsidyRule {
        self.settlement_subsidy_rule
    }
}
