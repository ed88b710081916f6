//! Rules types for tip distribution.
//!
//! This module contains the strongly-typed policy constants that drive the
//! tip-out calculation. They are deserialized from YAML rules files or JSON
//! request overrides; any field left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::money::BASIS_POINTS_SCALE;

/// Default kitchen tip-out rate: 5.00% of sales.
pub const DEFAULT_KITCHEN_RATE_BP: u32 = 500;

/// Default server tip-out rate when one bartender is on shift: 1.00% of sales.
pub const DEFAULT_BARTENDER_RATE_ONE_BP: u32 = 100;

/// Default server tip-out rate when two bartenders are on shift: 2.00% of sales.
pub const DEFAULT_BARTENDER_RATE_TWO_BP: u32 = 200;

/// Default minimum sales for tip-out eligibility: $150.00.
pub const DEFAULT_ELIGIBILITY_THRESHOLD_CENTS: i64 = 15_000;

/// The policy applied to every tip-out calculation.
///
/// Rules are an explicit immutable value passed into each call, so one
/// process can serve several rule sets at once.
///
/// # Example
///
/// ```
/// use tip_engine::config::TipRules;
///
/// let rules: TipRules = serde_yaml::from_str("kitchen_rate_bp: 400").unwrap();
/// assert_eq!(rules.kitchen_rate_bp, 400);
/// assert_eq!(rules.eligibility_threshold_cents, 15_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TipRules {
    /// Kitchen tip-out rate in basis points of sales.
    pub kitchen_rate_bp: u32,
    /// Server bartender tip-out rate with exactly one bartender on shift.
    pub bartender_rate_one_bp: u32,
    /// Server bartender tip-out rate with exactly two bartenders on shift.
    pub bartender_rate_two_bp: u32,
    /// Minimum sales, in cents, for a worker to owe any tip-out.
    pub eligibility_threshold_cents: i64,
}

impl Default for TipRules {
    fn default() -> Self {
        Self {
            kitchen_rate_bp: DEFAULT_KITCHEN_RATE_BP,
            bartender_rate_one_bp: DEFAULT_BARTENDER_RATE_ONE_BP,
            bartender_rate_two_bp: DEFAULT_BARTENDER_RATE_TWO_BP,
            eligibility_threshold_cents: DEFAULT_ELIGIBILITY_THRESHOLD_CENTS,
        }
    }
}

impl TipRules {
    /// Checks that every rate is at most 100% and the threshold is not negative.
    pub fn validate(&self) -> EngineResult<()> {
        let rates = [
            ("kitchen_rate_bp", self.kitchen_rate_bp),
            ("bartender_rate_one_bp", self.bartender_rate_one_bp),
            ("bartender_rate_two_bp", self.bartender_rate_two_bp),
        ];
        for (field, bp) in rates {
            if i64::from(bp) > BASIS_POINTS_SCALE {
                return Err(EngineError::InvalidRules {
                    field: field.to_string(),
                    message: format!("{} bp exceeds {} bp", bp, BASIS_POINTS_SCALE),
                });
            }
        }

        let combined = i64::from(self.kitchen_rate_bp)
            + i64::from(self.bartender_rate_one_bp.max(self.bartender_rate_two_bp));
        if combined > BASIS_POINTS_SCALE {
            return Err(EngineError::InvalidRules {
                field: "kitchen_rate_bp".to_string(),
                message: format!(
                    "kitchen plus bartender rates total {} bp, more than {} bp",
                    combined, BASIS_POINTS_SCALE
                ),
            });
        }

        if self.eligibility_threshold_cents < 0 {
            return Err(EngineError::InvalidRules {
                field: "eligibility_threshold_cents".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the server bartender tip-out rate for a bartender headcount.
    ///
    /// Only headcounts of one or two have a rate; anything else is `None`.
    pub fn bartender_rate_bp(&self, bartender_count: u32) -> Option<u32> {
        match bartender_count {
            1 => Some(self.bartender_rate_one_bp),
            2 => Some(self.bartender_rate_two_bp),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_house_policy() {
        let rules = TipRules::default();
        assert_eq!(rules.kitchen_rate_bp, 500);
        assert_eq!(rules.bartender_rate_one_bp, 100);
        assert_eq!(rules.bartender_rate_two_bp, 200);
        assert_eq!(rules.eligibility_threshold_cents, 15_000);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_partial_override_merges_with_defaults() {
        let rules: TipRules =
            serde_json::from_str(r#"{"eligibility_threshold_cents": 10000}"#).unwrap();
        assert_eq!(rules.eligibility_threshold_cents, 10_000);
        assert_eq!(rules.kitchen_rate_bp, DEFAULT_KITCHEN_RATE_BP);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: Result<TipRules, _> = serde_json::from_str(r#"{"kitchen_rate": 500}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rate_above_100_percent_is_invalid() {
        let rules = TipRules {
            kitchen_rate_bp: 10_001,
            ..TipRules::default()
        };
        match rules.validate() {
            Err(EngineError::InvalidRules { field, .. }) => assert_eq!(field, "kitchen_rate_bp"),
            other => panic!("Expected InvalidRules, got {:?}", other),
        }
    }

    #[test]
    fn test_combined_rates_above_100_percent_are_invalid() {
        let rules = TipRules {
            kitchen_rate_bp: 9_000,
            bartender_rate_two_bp: 2_000,
            ..TipRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_negative_threshold_is_invalid() {
        let rules = TipRules {
            eligibility_threshold_cents: -1,
            ..TipRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_bartender_rate_by_headcount() {
        let rules = TipRules::default();
        assert_eq!(rules.bartender_rate_bp(0), None);
        assert_eq!(rules.bartender_rate_bp(1), Some(100));
        assert_eq!(rules.bartender_rate_bp(2), Some(200));
        assert_eq!(rules.bartender_rate_bp(3), None);
    }
}
