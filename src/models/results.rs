//! Result models produced by the calculators.
//!
//! All results are immutable values built fresh per call. They carry no
//! timestamps or random identifiers, so identical inputs always produce
//! identical results, audit text included.

use serde::{Deserialize, Serialize};

use super::{LineItem, Role};

/// One worker's tip-out obligations for a single service period.
///
/// `amount_owed_to_house_cents` is `max(0, -net_after_contributions_cents)`;
/// the net is never capped at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationResult {
    /// Whether sales met the eligibility threshold.
    pub eligible: bool,
    /// Contribution into the kitchen pool.
    pub kitchen_contribution_cents: i64,
    /// Contribution into the bartender pool (servers only).
    pub bartender_contribution_cents: i64,
    /// Tips left after contributions; may be negative.
    pub net_after_contributions_cents: i64,
    /// Shortfall owed back to the house.
    pub amount_owed_to_house_cents: i64,
    /// Ordered audit trail.
    pub line_items: Vec<LineItem>,
}

/// One worker's final payout for a service period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPayout {
    /// The employee's identifier.
    pub employee_id: String,
    /// The role held on this shift.
    pub role: Role,
    /// Contribution into the kitchen pool.
    pub kitchen_contribution_cents: i64,
    /// Contribution into the bartender pool (servers only).
    pub bartender_contribution_cents: i64,
    /// Bartender pool share received (bartenders only).
    pub bartender_share_received_cents: i64,
    /// Net tips after contributions and credits; may be negative.
    pub net_tips_cents: i64,
    /// Shortfall owed back to the house.
    pub amount_owed_to_house_cents: i64,
    /// Ordered audit trail.
    pub line_items: Vec<LineItem>,
}

/// The outcome of distributing one service period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftResult {
    /// The service period that was distributed.
    pub service_period_id: String,
    /// Sum of all kitchen contributions.
    pub kitchen_pool_total_cents: i64,
    /// Sum of all server bartender contributions.
    pub bartender_pool_total_cents: i64,
    /// Per-worker payouts, sorted by employee id.
    pub payouts: Vec<ShiftPayout>,
}

impl ShiftResult {
    /// Returns the payout for an employee, if present.
    pub fn payout(&self, employee_id: &str) -> Option<&ShiftPayout> {
        self.payouts.iter().find(|p| p.employee_id == employee_id)
    }
}

/// One kitchen employee's payout for the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyKitchenPayout {
    /// The employee's identifier.
    pub employee_id: String,
    /// Total kitchen payout across the week.
    pub weekly_kitchen_payout_cents: i64,
    /// One line per contributing service period.
    pub line_items: Vec<LineItem>,
}

/// The outcome of allocating a week's kitchen pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyResult {
    /// The week that was allocated.
    pub week_id: String,
    /// Sum of all period kitchen pools allocated.
    pub total_kitchen_pool_cents: i64,
    /// Per-employee payouts, sorted by employee id.
    pub payouts: Vec<WeeklyKitchenPayout>,
}

impl WeeklyResult {
    /// Returns the payout for an employee, if present.
    pub fn payout(&self, employee_id: &str) -> Option<&WeeklyKitchenPayout> {
        self.payouts.iter().find(|p| p.employee_id == employee_id)
    }
}
