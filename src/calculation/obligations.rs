//! Per-worker tip-out obligation calculation.
//!
//! This module computes how much one worker owes into the kitchen pool and,
//! for servers, the bartender pool, and what is left over as net tips.

use crate::config::TipRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{LineItem, LineItemKind, ObligationResult, Role};
use crate::money::{format_basis_points, format_money, mul_basis_points_round_half_up};

/// Calculates one worker's tip-out obligations for a service period.
///
/// Rules are applied in order:
/// 1. Sales and tips must not be negative.
/// 2. Workers whose sales are below `rules.eligibility_threshold_cents` owe
///    nothing.
/// 3. Eligible workers of either role owe `rules.kitchen_rate_bp` of sales to
///    the kitchen pool.
/// 4. Eligible servers also owe the bartender rate for the headcount on shift
///    (one or two bartenders); any other headcount is an error. Bartenders
///    never pay into their own pool.
/// 5. Net is tips minus contributions and may go negative; the shortfall is
///    reported separately as the amount owed to the house.
///
/// # Arguments
///
/// * `role` - The worker's role on shift
/// * `sales_cents` - Sales rung in, in cents
/// * `tips_cents` - Tips collected, in cents
/// * `bartender_count` - Bartenders on shift; required for eligible servers
/// * `rules` - The tip-out policy
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::calculate_obligations;
/// use tip_engine::config::TipRules;
/// use tip_engine::models::Role;
///
/// let result =
///     calculate_obligations(Role::Server, 100_000, 20_000, Some(1), &TipRules::default()).unwrap();
///
/// assert!(result.eligible);
/// assert_eq!(result.kitchen_contribution_cents, 5_000);
/// assert_eq!(result.bartender_contribution_cents, 1_000);
/// assert_eq!(result.net_after_contributions_cents, 14_000);
/// assert_eq!(result.amount_owed_to_house_cents, 0);
/// ```
pub fn calculate_obligations(
    role: Role,
    sales_cents: i64,
    tips_cents: i64,
    bartender_count: Option<u32>,
    rules: &TipRules,
) -> EngineResult<ObligationResult> {
    rules.validate()?;
    if sales_cents < 0 {
        return Err(EngineError::invalid_amount(
            "sales_cents",
            format!("must not be negative, got {}", sales_cents),
        ));
    }
    if tips_cents < 0 {
        return Err(EngineError::invalid_amount(
            "tips_cents",
            format!("must not be negative, got {}", tips_cents),
        ));
    }

    let mut line_items = vec![
        LineItem::note(LineItemKind::Role, format!("Role: {}", role)),
        LineItem::amount(
            LineItemKind::Sales,
            sales_cents,
            format!("Sales: {}", format_money(sales_cents)),
        ),
        LineItem::amount(
            LineItemKind::Tips,
            tips_cents,
            format!("Tips collected: {}", format_money(tips_cents)),
        ),
    ];

    let eligible = sales_cents >= rules.eligibility_threshold_cents;
    let mut kitchen_contribution_cents = 0;
    let mut bartender_contribution_cents = 0;

    if !eligible {
        line_items.push(LineItem::note(
            LineItemKind::ThresholdNotMet,
            format!(
                "Sales {} below eligibility threshold {}: no tip-out owed",
                format_money(sales_cents),
                format_money(rules.eligibility_threshold_cents)
            ),
        ));
    } else {
        kitchen_contribution_cents =
            mul_basis_points_round_half_up(sales_cents, rules.kitchen_rate_bp)?;
        line_items.push(LineItem::amount(
            LineItemKind::KitchenContribution,
            kitchen_contribution_cents,
            format!(
                "Kitchen tip-out: {} of {} sales = {}",
                format_basis_points(rules.kitchen_rate_bp),
                format_money(sales_cents),
                format_money(kitchen_contribution_cents)
            ),
        ));

        match role {
            Role::Server => {
                let count = bartender_count.unwrap_or(0);
                let bp = rules.bartender_rate_bp(count).ok_or_else(|| {
                    EngineError::InvalidBartenderCount {
                        context: "server tip-out".to_string(),
                        count,
                    }
                })?;
                bartender_contribution_cents = mul_basis_points_round_half_up(sales_cents, bp)?;
                line_items.push(LineItem::amount(
                    LineItemKind::BartenderContribution,
                    bartender_contribution_cents,
                    format!(
                        "Bartender tip-out ({} bartender{}): {} of {} sales = {}",
                        count,
                        if count == 1 { "" } else { "s" },
                        format_basis_points(bp),
                        format_money(sales_cents),
                        format_money(bartender_contribution_cents)
                    ),
                ));
            }
            Role::Bartender => {}
        }
    }

    let net_after_contributions_cents = tips_cents
        .checked_sub(kitchen_contribution_cents)
        .and_then(|n| n.checked_sub(bartender_contribution_cents))
        .ok_or_else(|| EngineError::overflow("net after contributions"))?;
    let amount_owed_to_house_cents = net_after_contributions_cents.saturating_neg().max(0);

    line_items.push(LineItem::amount(
        LineItemKind::NetTips,
        net_after_contributions_cents,
        format!(
            "Net after contributions: {}",
            format_money(net_after_contributions_cents)
        ),
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

    Ok(ObligationResult {
        eligible,
        kitchen_contribution_cents,
        bartender_contribution_cents,
        net_after_contributions_cents,
        amount_owed_to_house_cents,
        line_items,
    })
}
