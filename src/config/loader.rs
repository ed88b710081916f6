//! Rules loading functionality.
//!
//! This module provides the [`RulesLoader`] type for loading tip rules from
//! YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::TipRules;

/// Loads and validates tip rules.
///
/// # File Format
///
/// ```text
/// # rules.yaml, every field optional
/// kitchen_rate_bp: 500
/// bartender_rate_one_bp: 100
/// bartender_rate_two_bp: 200
/// eligibility_threshold_cents: 15000
/// ```
///
/// # Example
///
/// ```no_run
/// use tip_engine::config::RulesLoader;
///
/// let loader = RulesLoader::load("./config/rules.yaml").unwrap();
/// println!("Kitchen rate: {} bp", loader.rules().kitchen_rate_bp);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RulesLoader {
    rules: TipRules,
}

impl RulesLoader {
    /// Loads rules from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `RulesLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML or names an unknown field (`ConfigParseError`)
    /// - A rate or threshold is out of range (`InvalidRules`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let rules = Self::parse(&content).map_err(|e| match e {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path_str, ?rules, "Loaded tip rules");
        Ok(Self { rules })
    }

    /// Parses and validates rules from a YAML string.
    pub fn parse(content: &str) -> EngineResult<TipRules> {
        let rules: TipRules =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &TipRules {
        &self.rules
    }

    /// Consumes the loader and returns the rules.
    pub fn into_rules(self) -> TipRules {
        self.rules
    }
}
