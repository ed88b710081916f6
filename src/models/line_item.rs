//! Audit line items.
//!
//! Line items are the load-bearing audit trail behind every payout. Each
//! entry keeps the authoritative cents value as a structured field next to
//! the human-readable text, so no consumer ever has to parse an amount back
//! out of the text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a line item records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// The service period a shift payout belongs to.
    ServicePeriod,
    /// The worker's role on shift.
    Role,
    /// Sales recorded by the worker.
    Sales,
    /// Tips collected by the worker.
    Tips,
    /// The worker's sales were below the eligibility threshold.
    ThresholdNotMet,
    /// Contribution into the kitchen pool.
    KitchenContribution,
    /// Contribution into the bartender pool.
    BartenderContribution,
    /// Share of the bartender pool received.
    BartenderShare,
    /// Net tips after all contributions and credits.
    NetTips,
    /// Liability owed back to the house.
    OwedToHouse,
    /// A weekly kitchen allocation from one service period.
    KitchenAllocation,
}

/// A single entry in an audit trail.
///
/// # Example
///
/// ```
/// use tip_engine::models::{LineItem, LineItemKind};
///
/// let item = LineItem::amount(LineItemKind::Tips, 20_000, "Tips collected: $200.00");
/// assert_eq!(item.amount_cents, Some(20_000));
/// assert_eq!(item.to_string(), "Tips collected: $200.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// What this line records.
    pub kind: LineItemKind,
    /// The authoritative amount in cents, when the line carries one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub amount_cents: Option<i64>,
    /// Human-readable text derived from the structured fields.
    pub text: String,
}

impl LineItem {
    /// Creates a line item carrying an amount.
    pub fn amount(kind: LineItemKind, amount_cents: i64, text: impl Into<String>) -> Self {
        Self {
            kind,
            amount_cents: Some(amount_cents),
            text: text.into(),
        }
    }

    /// Creates a text-only line item.
    pub fn note(kind: LineItemKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            amount_cents: None,
            text: text.into(),
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_has_no_amount() {
        let item = LineItem::note(LineItemKind::Role, "Role: server");
        assert_eq!(item.amount_cents, None);
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("amount_cents"));
    }

    #[test]
    fn test_amount_serializes_kind_and_cents() {
        let item = LineItem::amount(LineItemKind::KitchenContribution, 5_000, "Kitchen");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"kind\":\"kitchen_contribution\""));
        assert!(json.contains("\"amount_cents\":5000"));
    }
}
