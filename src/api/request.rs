//! Request types for the Tip Distribution Engine API.
//!
//! Front-of-house figures arrive in dollars and are converted to cents before
//! any calculation. Kitchen pools arrive already in cents, as recorded by a
//! prior shift distribution.

use serde::{Deserialize, Serialize};

use crate::config::TipRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{KitchenWorkLog, PeriodKitchenPool, Role, WorkerEntry};
use crate::money::dollars_to_cents;

/// Per-request rules override.
///
/// Each field that is present replaces the matching field of the server's
/// rules; absent fields keep the server's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesOverride {
    /// Kitchen tip-out rate in basis points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kitchen_rate_bp: Option<u32>,
    /// Bartender tip-out rate with one bartender on shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bartender_rate_one_bp: Option<u32>,
    /// Bartender tip-out rate with two bartenders on shift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bartender_rate_two_bp: Option<u32>,
    /// Eligibility threshold in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility_threshold_cents: Option<i64>,
}

impl RulesOverride {
    /// Merges this override over `base`.
    pub fn apply(&self, base: &TipRules) -> TipRules {
        TipRules {
            kitchen_rate_bp: self.kitchen_rate_bp.unwrap_or(base.kitchen_rate_bp),
            bartender_rate_one_bp: self
                .bartender_rate_one_bp
                .unwrap_or(base.bartender_rate_one_bp),
            bartender_rate_two_bp: self
                .bartender_rate_two_bp
                .unwrap_or(base.bartender_rate_two_bp),
            eligibility_threshold_cents: self
                .eligibility_threshold_cents
                .unwrap_or(base.eligibility_threshold_cents),
        }
    }
}

/// Resolves the rules for one request.
pub(crate) fn effective_rules(base: &TipRules, rules: Option<&RulesOverride>) -> TipRules {
    rules.map_or(*base, |o| o.apply(base))
}

/// Request body for the `/obligations` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationRequest {
    /// The worker's role (`server` or `bartender`).
    pub role: String,
    /// Sales total in dollars.
    pub sales_total: f64,
    /// Tips collected in dollars.
    pub tips_collected: f64,
    /// Bartenders on shift; required for servers who meet the threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bartender_count: Option<u32>,
    /// Optional rules override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesOverride>,
}

/// Validated inputs of an [`ObligationRequest`], in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObligationInputs {
    /// The parsed role.
    pub role: Role,
    /// Sales in cents.
    pub sales_cents: i64,
    /// Tips in cents.
    pub tips_cents: i64,
    /// Bartenders on shift.
    pub bartender_count: Option<u32>,
}

impl TryFrom<&ObligationRequest> for ObligationInputs {
    type Error = EngineError;

    fn try_from(req: &ObligationRequest) -> EngineResult<Self> {
        Ok(Self {
            role: req.role.parse()?,
            sales_cents: dollars_to_cents(req.sales_total)?,
            tips_cents: dollars_to_cents(req.tips_collected)?,
            bartender_count: req.bartender_count,
        })
    }
}

/// Request body for the `/shifts/distribute` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// The service period being distributed.
    pub service_period_id: String,
    /// Every front-of-house worker on shift.
    pub workers: Vec<WorkerRequest>,
    /// Optional rules override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RulesOverride>,
}

/// One worker in a [`ShiftRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    /// The employee's identifier.
    pub employee_id: String,
    /// The worker's role (`server` or `bartender`).
    pub role: String,
    /// Sales total in dollars.
    pub sales_total: f64,
    /// Tips collected in dollars.
    pub tips_collected: f64,
}

impl TryFrom<&WorkerRequest> for WorkerEntry {
    type Error = EngineError;

    fn try_from(req: &WorkerRequest) -> EngineResult<Self> {
        let role: Role = req.role.parse()?;
        WorkerEntry::from_dollars(
            req.employee_id.clone(),
            role,
            req.sales_total,
            req.tips_collected,
        )
    }
}

impl ShiftRequest {
    /// Converts every worker to a [`WorkerEntry`], stopping at the first failure.
    pub fn worker_entries(&self) -> EngineResult<Vec<WorkerEntry>> {
        self.workers
            .iter()
            .map(|w| {
                WorkerEntry::try_from(w).map_err(|source| EngineError::InvalidWorker {
                    service_period_id: self.service_period_id.clone(),
                    employee_id: w.employee_id.clone(),
                    source: Box::new(source),
                })
            })
            .collect()
    }
}

/// Request body for the `/kitchen/weekly` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyKitchenRequest {
    /// The week being allocated.
    pub week_id: String,
    /// Kitchen pool totals per service period, in cents.
    #[serde(default)]
    pub period_kitchen_pools: Vec<PeriodKitchenPool>,
    /// Kitchen hours per employee per service period.
    #[serde(default)]
    pub kitchen_work_logs: Vec<KitchenWorkLog>,
}
