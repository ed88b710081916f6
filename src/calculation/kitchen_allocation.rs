//! Weekly kitchen pool allocation.
//!
//! Each service period's kitchen pool is apportioned among the kitchen staff
//! who worked that period, in proportion to their weighted hours, using the
//! largest-remainder method. Periods are allocated independently and the
//! results are then summed per employee across the week.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    KitchenWorkLog, LineItem, LineItemKind, PeriodKitchenPool, WeeklyKitchenPayout, WeeklyResult,
};
use crate::money::format_money;

/// Fixed-point scale for weighted units (four decimal places).
pub const WEIGHTED_UNIT_SCALE: u32 = 10_000;

/// Converts hours × weight into fixed-point weighted units.
///
/// The product is scaled by [`WEIGHTED_UNIT_SCALE`] and rounded half away
/// from zero, so all allocation arithmetic after this point is integral.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use tip_engine::calculation::weighted_units;
///
/// let hours = Decimal::from_str("6.5").unwrap();
/// let weight = Decimal::from_str("1.25").unwrap();
/// assert_eq!(weighted_units(hours, weight).unwrap(), 81_250);
/// ```
pub fn weighted_units(hours_worked: Decimal, role_weight: Decimal) -> EngineResult<i64> {
    hours_worked
        .checked_mul(role_weight)
        .and_then(|w| w.checked_mul(Decimal::from(WEIGHTED_UNIT_SCALE)))
        .map(|w| w.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|w| w.to_i64())
        .ok_or_else(|| {
            EngineError::overflow(format!(
                "{} hours at weight {} exceeds weighted unit range",
                hours_worked, role_weight
            ))
        })
}

/// Apportions `pool_cents` across `units` with the largest-remainder method.
///
/// Each entry first gets `floor(pool × units / total)`. The cents left over
/// go one at a time to the entries with the largest remainders, ties going
/// to the entry that comes first in `units` order. The returned allocations
/// line up with `units` and sum to `pool_cents` exactly.
///
/// Callers must pass `units` sorted by employee id for the tie-break to be
/// by ascending employee id.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if `pool_cents` or any unit count
/// is negative, and [`EngineError::ZeroWeightedUnits`] for
/// `service_period_id` if the units total is zero.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::apportion_largest_remainder;
///
/// // $1.00 across three equal workers: 34 + 33 + 33
/// assert_eq!(
///     apportion_largest_remainder("dinner_0113", 100, &[1, 1, 1]).unwrap(),
///     vec![34, 33, 33]
/// );
/// ```
pub fn apportion_largest_remainder(
    service_period_id: &str,
    pool_cents: i64,
    units: &[i64],
) -> EngineResult<Vec<i64>> {
    if pool_cents < 0 {
        return Err(EngineError::invalid_amount(
            "kitchen_pool_cents",
            "must not be negative",
        ));
    }
    if units.iter().any(|u| *u < 0) {
        return Err(EngineError::invalid_amount(
            "weighted_units",
            "must not be negative",
        ));
    }

    let total: i128 = units.iter().map(|u| i128::from(*u)).sum();
    if total == 0 {
        return Err(EngineError::ZeroWeightedUnits {
            service_period_id: service_period_id.to_string(),
        });
    }

    let pool = i128::from(pool_cents);
    let mut allocations = Vec::with_capacity(units.len());
    let mut remainders = Vec::with_capacity(units.len());
    for u in units {
        let exact = pool * i128::from(*u);
        allocations.push(exact / total);
        remainders.push(exact % total);
    }

    let allocated: i128 = allocations.iter().sum();
    let leftover = usize::try_from(pool - allocated)
        .map_err(|_| EngineError::overflow("largest-remainder leftover"))?;

    let mut order: Vec<usize> = (0..units.len()).collect();
    order.sort_by(|a, b| remainders[*b].cmp(&remainders[*a]).then(a.cmp(b)));
    for idx in order.into_iter().take(leftover) {
        allocations[idx] += 1;
    }

    allocations
        .into_iter()
        .map(|a| i64::try_from(a).map_err(|_| EngineError::overflow("allocation")))
        .collect()
}

/// Allocates a week's kitchen pools to kitchen staff by weighted hours.
///
/// # Arguments
///
/// * `week_id` - The week being allocated; must not be empty
/// * `period_pools` - Kitchen pool totals per service period; duplicate
///   entries for one period are summed
/// * `work_logs` - Kitchen hours per employee per service period
///
/// # Returns
///
/// A [`WeeklyResult`] with one [`WeeklyKitchenPayout`] per employee with
/// non-zero weighted hours in an allocated period, sorted by employee id.
/// Periods with a zero pool allocate nothing, and staff whose hours weigh
/// nothing in a period get no line for it.
///
/// # Errors
///
/// The computation is all-or-nothing. Any invalid pool or log, a non-zero
/// pool with no logs ([`EngineError::UnallocatablePool`]), or a non-zero pool
/// whose logs carry zero weighted units ([`EngineError::ZeroWeightedUnits`])
/// fails the whole week.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tip_engine::calculation::allocate_weekly_kitchen;
/// use tip_engine::models::{KitchenWorkLog, PeriodKitchenPool};
///
/// let pools = vec![PeriodKitchenPool {
///     service_period_id: "dinner_0113".to_string(),
///     kitchen_pool_cents: 10_000,
/// }];
/// let logs = vec![
///     KitchenWorkLog {
///         employee_id: "cook_a".to_string(),
///         service_period_id: "dinner_0113".to_string(),
///         hours_worked: Decimal::from(6),
///         role_weight: Decimal::ONE,
///     },
///     KitchenWorkLog {
///         employee_id: "cook_b".to_string(),
///         service_period_id: "dinner_0113".to_string(),
///         hours_worked: Decimal::from(2),
///         role_weight: Decimal::ONE,
///     },
/// ];
///
/// let result = allocate_weekly_kitchen("2026-W03", &pools, &logs).unwrap();
/// assert_eq!(result.payout("cook_a").unwrap().weekly_kitchen_payout_cents, 7_500);
/// assert_eq!(result.payout("cook_b").unwrap().weekly_kitchen_payout_cents, 2_500);
/// ```
pub fn allocate_weekly_kitchen(
    week_id: &str,
    period_pools: &[PeriodKitchenPool],
    work_logs: &[KitchenWorkLog],
) -> EngineResult<WeeklyResult> {
    let result = allocate(week_id, period_pools, work_logs);
    match &result {
        Ok(week) => debug!(
            week_id,
            periods = period_pools.len(),
            work_logs = work_logs.len(),
            total_kitchen_pool_cents = week.total_kitchen_pool_cents,
            employees = week.payouts.len(),
            "Weekly kitchen pool allocated"
        ),
        Err(err) => warn!(week_id, error = %err, "Weekly kitchen allocation rejected"),
    }
    result
}

/// Running weekly total for one employee.
#[derive(Default)]
struct WeeklyAccumulator {
    total_cents: i64,
    line_items: Vec<LineItem>,
}

fn allocate(
    week_id: &str,
    period_pools: &[PeriodKitchenPool],
    work_logs: &[KitchenWorkLog],
) -> EngineResult<WeeklyResult> {
    if week_id.trim().is_empty() {
        return Err(EngineError::MissingIdentifier {
            field: "week_id".to_string(),
        });
    }

    let pools = collect_pools(period_pools)?;
    let units_by_period = collect_units(work_logs)?;

    let mut total_kitchen_pool_cents: i64 = 0;
    let mut weekly: BTreeMap<&str, WeeklyAccumulator> = BTreeMap::new();

    for (period_id, pool_cents) in pools {
        if pool_cents == 0 {
            continue;
        }
        let staff = units_by_period
            .get(period_id)
            .ok_or_else(|| EngineError::UnallocatablePool {
                service_period_id: period_id.to_string(),
                pool_cents,
            })?;

        // Staff with no weighted hours take no share and get no line.
        let contributors: Vec<(&str, i64)> = staff
            .iter()
            .filter(|(_, units)| **units > 0)
            .map(|(employee_id, units)| (*employee_id, *units))
            .collect();
        let total_units = contributors
            .iter()
            .try_fold(0i64, |acc, (_, units)| acc.checked_add(*units))
            .ok_or_else(|| EngineError::overflow("period weighted units"))?;
        if total_units == 0 {
            return Err(EngineError::ZeroWeightedUnits {
                service_period_id: period_id.to_string(),
            });
        }

        let units: Vec<i64> = contributors.iter().map(|(_, units)| *units).collect();
        let allocations = apportion_largest_remainder(period_id, pool_cents, &units)?;
        for ((employee_id, employee_units), cents) in contributors.into_iter().zip(allocations) {
            let entry = weekly.entry(employee_id).or_default();
            entry.total_cents = entry
                .total_cents
                .checked_add(cents)
                .ok_or_else(|| EngineError::overflow("weekly kitchen payout"))?;
            entry.line_items.push(LineItem::amount(
                LineItemKind::KitchenAllocation,
                cents,
                format!(
                    "Service period {}: {} of {} weighted hours, {} of {} kitchen pool",
                    period_id,
                    format_units(employee_units),
                    format_units(total_units),
                    format_money(cents),
                    format_money(pool_cents)
                ),
            ));
        }

        total_kitchen_pool_cents = total_kitchen_pool_cents
            .checked_add(pool_cents)
            .ok_or_else(|| EngineError::overflow("weekly kitchen pool total"))?;
    }

    let payouts = weekly
        .into_iter()
        .map(|(employee_id, acc)| WeeklyKitchenPayout {
            employee_id: employee_id.to_string(),
            weekly_kitchen_payout_cents: acc.total_cents,
            line_items: acc.line_items,
        })
        .collect();

    Ok(WeeklyResult {
        week_id: week_id.to_string(),
        total_kitchen_pool_cents,
        payouts,
    })
}

/// Validates pool entries and sums duplicates per period.
fn collect_pools(period_pools: &[PeriodKitchenPool]) -> EngineResult<BTreeMap<&str, i64>> {
    let mut pools: BTreeMap<&str, i64> = BTreeMap::new();
    for pool in period_pools {
        if pool.service_period_id.trim().is_empty() {
            return Err(EngineError::MissingIdentifier {
                field: "service_period_id".to_string(),
            });
        }
        if pool.kitchen_pool_cents < 0 {
            return Err(EngineError::invalid_amount(
                "kitchen_pool_cents",
                format!(
                    "service period '{}' has negative pool {}",
                    pool.service_period_id, pool.kitchen_pool_cents
                ),
            ));
        }
        let total = pools.entry(pool.service_period_id.as_str()).or_insert(0);
        *total = total
            .checked_add(pool.kitchen_pool_cents)
            .ok_or_else(|| EngineError::overflow("period kitchen pool"))?;
    }
    Ok(pools)
}

/// Validates work logs and aggregates weighted units per period and employee.
fn collect_units(
    work_logs: &[KitchenWorkLog],
) -> EngineResult<BTreeMap<&str, BTreeMap<&str, i64>>> {
    let mut by_period: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
    for log in work_logs {
        if log.employee_id.trim().is_empty() {
            return Err(EngineError::MissingIdentifier {
                field: "employee_id".to_string(),
            });
        }
        if log.service_period_id.trim().is_empty() {
            return Err(EngineError::MissingIdentifier {
                field: "service_period_id".to_string(),
            });
        }
        if log.hours_worked < Decimal::ZERO {
            return Err(EngineError::invalid_amount(
                "hours_worked",
                format!(
                    "employee '{}' has negative hours {}",
                    log.employee_id, log.hours_worked
                ),
            ));
        }
        if log.role_weight <= Decimal::ZERO {
            return Err(EngineError::invalid_amount(
                "role_weight",
                format!(
                    "employee '{}' has non-positive weight {}",
                    log.employee_id, log.role_weight
                ),
            ));
        }

        let units = weighted_units(log.hours_worked, log.role_weight)?;
        let total = by_period
            .entry(log.service_period_id.as_str())
            .or_default()
            .entry(log.employee_id.as_str())
            .or_insert(0);
        *total = total
            .checked_add(units)
            .ok_or_else(|| EngineError::overflow("employee weighted units"))?;
    }
    Ok(by_period)
}

fn format_units(units: i64) -> String {
    Decimal::new(units, 4).normalize().to_string()
}
