//! Shift-level tip distribution.
//!
//! This module runs the obligation calculation for every worker in one
//! service period, totals the kitchen and bartender pools, splits the
//! bartender pool among the bartenders on shift, and produces a final
//! auditable payout per worker.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::TipRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{LineItem, LineItemKind, Role, ShiftPayout, ShiftResult, WorkerEntry};
use crate::money::format_money;

use super::obligations::calculate_obligations;

/// Splits `pool_cents` into `ways` shares that differ by at most one cent.
///
/// Every share starts at `pool / ways`; the leftover cents go one each to
/// the first shares in order. The shares always sum to the pool exactly.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::split_evenly;
///
/// assert_eq!(split_evenly(7, 3), vec![3, 2, 2]);
/// assert_eq!(split_evenly(3_000, 2), vec![1_500, 1_500]);
/// assert!(split_evenly(100, 0).is_empty());
/// ```
pub fn split_evenly(pool_cents: i64, ways: usize) -> Vec<i64> {
    let Ok(n) = i64::try_from(ways) else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let base = pool_cents.div_euclid(n);
    let remainder = pool_cents.rem_euclid(n);
    (0..n).map(|i| if i < remainder { base + 1 } else { base }).collect()
}

/// Distributes tips for every worker in one service period.
///
/// The computation is all-or-nothing: any invalid worker, a bartender
/// headcount other than one or two, or a duplicate employee aborts the whole
/// shift and no payouts are returned.
///
/// # Arguments
///
/// * `service_period_id` - The shift being distributed; must not be empty
/// * `workers` - Every front-of-house worker on the shift
/// * `rules` - The tip-out policy
///
/// # Returns
///
/// A [`ShiftResult`] with pool totals and one [`ShiftPayout`] per worker,
/// sorted by employee id.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::distribute_shift;
/// use tip_engine::config::TipRules;
/// use tip_engine::models::{Role, WorkerEntry};
///
/// let workers = vec![
///     WorkerEntry::new("server_a", Role::Server, 100_000, 20_000),
///     WorkerEntry::new("bar_a", Role::Bartender, 40_000, 8_000),
/// ];
/// let result = distribute_shift("dinner_0113", &workers, &TipRules::default()).unwrap();
///
/// assert_eq!(result.kitchen_pool_total_cents, 5_000 + 2_000);
/// assert_eq!(result.bartender_pool_total_cents, 1_000);
/// assert_eq!(result.payout("bar_a").unwrap().net_tips_cents, 8_000 - 2_000 + 1_000);
/// ```
pub fn distribute_shift(
    service_period_id: &str,
    workers: &[WorkerEntry],
    rules: &TipRules,
) -> EngineResult<ShiftResult> {
    let result = distribute(service_period_id, workers, rules);
    match &result {
        Ok(shift) => debug!(
            service_period_id,
            workers = workers.len(),
            kitchen_pool_cents = shift.kitchen_pool_total_cents,
            bartender_pool_cents = shift.bartender_pool_total_cents,
            "Shift distributed"
        ),
        Err(err) => warn!(service_period_id, error = %err, "Shift distribution rejected"),
    }
    result
}

fn distribute(
    service_period_id: &str,
    workers: &[WorkerEntry],
    rules: &TipRules,
) -> EngineResult<ShiftResult> {
    if service_period_id.trim().is_empty() {
        return Err(EngineError::MissingIdentifier {
            field: "service_period_id".to_string(),
        });
    }
    if workers.is_empty() {
        return Err(EngineError::EmptyInput {
            field: "workers".to_string(),
        });
    }
    rules.validate()?;

    let mut seen = BTreeSet::new();
    for worker in workers {
        if worker.employee_id.trim().is_empty() {
            return Err(EngineError::MissingIdentifier {
                field: "employee_id".to_string(),
            });
        }
        if !seen.insert(worker.employee_id.as_str()) {
            return Err(EngineError::DuplicateEmployee {
                service_period_id: service_period_id.to_string(),
                employee_id: worker.employee_id.clone(),
            });
        }
    }

    let bartender_count = workers
        .iter()
        .filter(|w| w.role == Role::Bartender)
        .count();
    let bartender_count = u32::try_from(bartender_count).unwrap_or(u32::MAX);
    if rules.bartender_rate_bp(bartender_count).is_none() {
        return Err(EngineError::InvalidBartenderCount {
            context: format!("service period '{}'", service_period_id),
            count: bartender_count,
        });
    }

    let mut sorted: Vec<&WorkerEntry> = workers.iter().collect();
    sorted.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

    let obligations = sorted
        .iter()
        .map(|w| {
            calculate_obligations(
                w.role,
                w.sales_cents,
                w.tips_cents,
                Some(bartender_count),
                rules,
            )
            .map_err(|e| EngineError::InvalidWorker {
                service_period_id: service_period_id.to_string(),
                employee_id: w.employee_id.clone(),
                source: Box::new(e),
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let mut kitchen_pool_total_cents: i64 = 0;
    let mut bartender_pool_total_cents: i64 = 0;
    for (worker, obligation) in sorted.iter().zip(&obligations) {
        kitchen_pool_total_cents = kitchen_pool_total_cents
            .checked_add(obligation.kitchen_contribution_cents)
            .ok_or_else(|| EngineError::overflow("kitchen pool total"))?;
        if worker.role == Role::Server {
            bartender_pool_total_cents = bartender_pool_total_cents
                .checked_add(obligation.bartender_contribution_cents)
                .ok_or_else(|| EngineError::overflow("bartender pool total"))?;
        }
    }

    // Workers are already sorted by id, so shares follow that order.
    let mut shares =
        split_evenly(bartender_pool_total_cents, bartender_count as usize).into_iter();

    let mut payouts = Vec::with_capacity(sorted.len());
    for (worker, obligation) in sorted.into_iter().zip(obligations) {
        let mut line_items = vec![LineItem::note(
            LineItemKind::ServicePeriod,
            format!("Service period: {}", service_period_id),
        )];
        line_items.extend(
            obligation
                .line_items
                .into_iter()
                .filter(|li| !matches!(li.kind, LineItemKind::NetTips | LineItemKind::OwedToHouse)),
        );

        let (bartender_share_received_cents, net_tips_cents) = match worker.role {
            Role::Server => (0, obligation.net_after_contributions_cents),
            Role::Bartender => {
                let share = shares.next().unwrap_or(0);
                line_items.push(LineItem::amount(
                    LineItemKind::BartenderShare,
                    share,
                    format!(
                        "Bartender pool share: {} of {} pool split {} way{}",
                        format_money(share),
                        format_money(bartender_pool_total_cents),
                        bartender_count,
                        if bartender_count == 1 { "" } else { "s" }
                    ),
                ));
                let net = worker
                    .tips_cents
                    .checked_sub(obligation.kitchen_contribution_cents)
                    .and_then(|n| n.checked_add(share))
                    .ok_or_else(|| EngineError::overflow("bartender net tips"))?;
                (share, net)
            }
        };
        let amount_owed_to_house_cents = net_tips_cents.saturating_neg().max(0);

        line_items.push(LineItem::amount(
            LineItemKind::NetTips,
            net_tips_cents,
            format!("Net tips: {}", format_money(net_tips_cents)),
        ));
        if amount_owed_to_house_cents > 0 {
            line_items.push(LineItem::amount(
                LineItemKind::OwedToHouse,
                amount_owed_to_house_cents,
                format!(
                    "Amount owed to house: {}",
                    format_money(amount_owed_to_house_cents)
                ),
            ));
        }

        payouts.push(ShiftPayout {
            employee_id: worker.employee_id.clone(),
            role: worker.role,
            kitchen_contribution_cents: obligation.kitchen_contribution_cents,
            bartender_contribution_cents: obligation.bartender_contribution_cents,
            bartender_share_received_cents,
            net_tips_cents,
            amount_owed_to_house_cents,
            line_items,
        });
    }

    Ok(ShiftResult {
        service_period_id: service_period_id.to_string(),
        kitchen_pool_total_cents,
        bartender_pool_total_cents,
        payouts,
    })
}
