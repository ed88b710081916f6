//! Rules configuration for the Tip Distribution Engine.
//!
//! The default house policy (5% kitchen, 1%/2% bartender by headcount, $150
//! eligibility threshold) is the only configuration. Callers may override it
//! with an explicit [`TipRules`] value, built in code, deserialized from a
//! request, or loaded from YAML.
//!
//! # Example
//!
//! ```no_run
//! use tip_engine::config::RulesLoader;
//!
//! let rules = RulesLoader::load("./config/rules.yaml").unwrap().into_rules();
//! println!("Threshold: {} cents", rules.eligibility_threshold_cents);
//! ```

mod loader;
mod types;

pub use loader::RulesLoader;
pub use types::{
    DEFAULT_BARTENDER_RATE_ONE_BP, DEFAULT_BARTENDER_RATE_TWO_BP,
    DEFAULT_ELIGIBILITY_THRESHOLD_CENTS, DEFAULT_KITCHEN_RATE_BP, TipRules,
};
