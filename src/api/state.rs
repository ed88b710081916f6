//! Application state for the Tip Distribution Engine API.

use std::sync::Arc;

use crate::config::TipRules;

/// Shared application state.
///
/// Holds the server's tip rules. Requests that carry a rules override are
/// computed against the override merged over these rules.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<TipRules>,
}

impl AppState {
    /// Creates a new application state with the given rules.
    pub fn new(rules: TipRules) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns the server's rules.
    pub fn rules(&self) -> &TipRules {
        &self.rules
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TipRules::default())
    }
}
