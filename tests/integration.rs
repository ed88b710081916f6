//! Integration tests for the Tip Distribution Engine.
//!
//! This test suite covers:
//! - Worker obligations for the documented house-policy scenarios
//! - The eligibility threshold boundary
//! - Shift distribution of the kitchen and bartender pools
//! - A full week: shifts distributed, kitchen pools allocated by hours
//! - The HTTP endpoints end to end

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use tip_engine::api::{AppState, create_router};
use tip_engine::calculation::{
    allocate_weekly_kitchen, calculate_obligations, distribute_shift, split_evenly,
};
use tip_engine::config::{RulesLoader, TipRules};
use tip_engine::error::EngineError;
use tip_engine::models::{
    KitchenWorkLog, LineItemKind, ObligationResult, PeriodKitchenPool, Role, WorkerEntry,
};
use tip_engine::money::dollars_to_cents;

// =============================================================================
// Test Helpers
// =============================================================================

fn cents(dollars: f64) -> i64 {
    dollars_to_cents(dollars).unwrap()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn server_obligation(sales: f64, tips: f64, bartenders: u32) -> ObligationResult {
    calculate_obligations(
        Role::Server,
        cents(sales),
        cents(tips),
        Some(bartenders),
        &TipRules::default(),
    )
    .unwrap()
}

fn work_log(employee: &str, period: &str, hours: &str, weight: &str) -> KitchenWorkLog {
    KitchenWorkLog {
        employee_id: employee.to_string(),
        service_period_id: period.to_string(),
        hours_worked: decimal(hours),
        role_weight: decimal(weight),
    }
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

// =============================================================================
// SECTION 1: Worker obligations
// =============================================================================

#[test]
fn test_scenario_1_server_one_bartender() {
    let result = server_obligation(1000.00, 200.00, 1);

    assert!(result.eligible);
    assert_eq!(result.kitchen_contribution_cents, 5_000);
    assert_eq!(result.bartender_contribution_cents, 1_000);
    assert_eq!(result.net_after_contributions_cents, 14_000);
    assert_eq!(result.amount_owed_to_house_cents, 0);
    assert!(
        result
            .line_items
            .iter()
            .any(|item| item.text == "Kitchen tip-out: 5.00% of $1000.00 sales = $50.00")
    );
}

#[test]
fn test_scenario_2_server_two_bartenders() {
    let result = server_obligation(1500.00, 250.00, 2);

    assert_eq!(result.kitchen_contribution_cents, 7_500);
    assert_eq!(result.bartender_contribution_cents, 3_000);
    assert_eq!(result.net_after_contributions_cents, 14_500);
}

#[test]
fn test_scenario_3_below_threshold_owes_nothing() {
    for bartenders in [1, 2] {
        let result = server_obligation(100.00, 50.00, bartenders);
        assert!(!result.eligible);
        assert_eq!(result.kitchen_contribution_cents, 0);
        assert_eq!(result.bartender_contribution_cents, 0);
        assert_eq!(result.net_after_contributions_cents, 5_000);
    }
}

#[test]
fn test_scenario_4_deductions_exceed_tips() {
    let result = server_obligation(2000.00, 50.00, 2);

    assert_eq!(result.kitchen_contribution_cents, 10_000);
    assert_eq!(result.bartender_contribution_cents, 4_000);
    assert_eq!(result.net_after_contributions_cents, -9_000);
    assert_eq!(result.amount_owed_to_house_cents, 9_000);
    let last = result.line_items.last().unwrap();
    assert_eq!(last.kind, LineItemKind::OwedToHouse);
    assert_eq!(last.text, "Amount owed to house: $90.00");
}

#[test]
fn test_scenario_5_seven_cents_among_three() {
    assert_eq!(split_evenly(7, 3), vec![3, 2, 2]);
}

#[test]
fn test_threshold_boundary() {
    let rules = TipRules::default();
    let at = calculate_obligations(Role::Bartender, 15_000, 1_000, None, &rules).unwrap();
    let below = calculate_obligations(Role::Bartender, 14_999, 1_000, None, &rules).unwrap();

    assert!(at.eligible);
    assert_eq!(at.kitchen_contribution_cents, 750);
    assert!(!below.eligible);
    assert_eq!(below.kitchen_contribution_cents, 0);
}

#[test]
fn test_dollar_conversion_rounds_half_cent_up() {
    assert_eq!(cents(1.005), 101);
    assert_eq!(cents(19.99), 1_999);
    assert!(dollars_to_cents(f64::INFINITY).is_err());

    // Negative amounts convert; the calculators reject them.
    let negative = calculate_obligations(
        Role::Server,
        cents(-0.01),
        0,
        Some(1),
        &TipRules::default(),
    );
    assert!(matches!(negative, Err(EngineError::InvalidAmount { .. })));
}

#[test]
fn test_shipped_rules_file_is_house_policy() {
    let loader = RulesLoader::load("./config/rules.yaml").expect("Failed to load rules");
    assert_eq!(*loader.rules(), TipRules::default());
}

// =============================================================================
// SECTION 2: Shift distribution
// =============================================================================

#[test]
fn test_shift_pools_flow_to_bartenders() {
    let workers = vec![
        WorkerEntry::from_dollars("s1", Role::Server, 1000.00, 200.00).unwrap(),
        WorkerEntry::from_dollars("s2", Role::Server, 2000.00, 50.00).unwrap(),
        WorkerEntry::from_dollars("b1", Role::Bartender, 0.00, 80.00).unwrap(),
    ];
    let shift = distribute_shift("dinner_0113", &workers, &TipRules::default()).unwrap();

    // Servers: kitchen 50 + 100, bartender 10 + 20
    assert_eq!(shift.kitchen_pool_total_cents, 15_000);
    assert_eq!(shift.bartender_pool_total_cents, 3_000);

    let b1 = shift.payout("b1").unwrap();
    assert_eq!(b1.bartender_share_received_cents, 3_000);
    assert_eq!(b1.net_tips_cents, 11_000);

    let s2 = shift.payout("s2").unwrap();
    assert_eq!(s2.net_tips_cents, -7_000);
    assert_eq!(s2.amount_owed_to_house_cents, 7_000);
}

#[test]
fn test_shift_rejects_three_bartenders() {
    let workers = vec![
        WorkerEntry::new("s1", Role::Server, 50_000, 8_000),
        WorkerEntry::new("b1", Role::Bartender, 0, 0),
        WorkerEntry::new("b2", Role::Bartender, 0, 0),
        WorkerEntry::new("b3", Role::Bartender, 0, 0),
    ];
    assert!(matches!(
        distribute_shift("dinner_0113", &workers, &TipRules::default()),
        Err(EngineError::InvalidBartenderCount { count: 3, .. })
    ));
}

#[test]
fn test_shift_recomputation_is_identical() {
    let workers = vec![
        WorkerEntry::new("s1", Role::Server, 123_457, 20_000),
        WorkerEntry::new("b2", Role::Bartender, 40_000, 3_000),
        WorkerEntry::new("b1", Role::Bartender, 0, 1_500),
    ];
    let rules = TipRules::default();
    let first = distribute_shift("brunch_0118", &workers, &rules).unwrap();
    let second = distribute_shift("brunch_0118", &workers, &rules).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// SECTION 3: A full week
// =============================================================================

#[test]
fn test_week_of_shifts_allocates_every_kitchen_cent() {
    let rules = TipRules::default();
    let monday = distribute_shift(
        "dinner_mon",
        &[
            WorkerEntry::new("s1", Role::Server, 123_456, 25_000),
            WorkerEntry::new("b1", Role::Bartender, 30_000, 6_000),
        ],
        &rules,
    )
    .unwrap();
    let tuesday = distribute_shift(
        "dinner_tue",
        &[
            WorkerEntry::new("s1", Role::Server, 87_654, 15_000),
            WorkerEntry::new("s2", Role::Server, 45_678, 9_000),
            WorkerEntry::new("b1", Role::Bartender, 0, 2_000),
            WorkerEntry::new("b2", Role::Bartender, 0, 2_000),
        ],
        &rules,
    )
    .unwrap();

    let pools: Vec<PeriodKitchenPool> = [&monday, &tuesday]
        .iter()
        .map(|shift| PeriodKitchenPool {
            service_period_id: shift.service_period_id.clone(),
            kitchen_pool_cents: shift.kitchen_pool_total_cents,
        })
        .collect();
    let logs = vec![
        work_log("chef", "dinner_mon", "7", "1.5"),
        work_log("line", "dinner_mon", "6.25", "1"),
        work_log("dish", "dinner_mon", "5", "0.75"),
        work_log("chef", "dinner_tue", "8", "1.5"),
        work_log("dish", "dinner_tue", "4.5", "0.75"),
    ];

    let week = allocate_weekly_kitchen("2026-W03", &pools, &logs).unwrap();
    let expected_total = monday.kitchen_pool_total_cents + tuesday.kitchen_pool_total_cents;
    let paid: i64 = week
        .payouts
        .iter()
        .map(|p| p.weekly_kitchen_payout_cents)
        .sum();

    assert_eq!(week.total_kitchen_pool_cents, expected_total);
    assert_eq!(paid, expected_total);
    assert_eq!(week.payouts.len(), 3);
    assert_eq!(week.payout("chef").unwrap().line_items.len(), 2);
    assert_eq!(week.payout("line").unwrap().line_items.len(), 1);
}

#[test]
fn test_week_fails_whole_when_a_period_has_no_staff() {
    let pools = vec![
        PeriodKitchenPool {
            service_period_id: "dinner_mon".to_string(),
            kitchen_pool_cents: 5_000,
        },
        PeriodKitchenPool {
            service_period_id: "dinner_tue".to_string(),
            kitchen_pool_cents: 2_500,
        },
    ];
    let logs = vec![work_log("chef", "dinner_mon", "8", "1")];

    assert!(matches!(
        allocate_weekly_kitchen("2026-W03", &pools, &logs),
        Err(EngineError::UnallocatablePool { .. })
    ));
}

// =============================================================================
// SECTION 4: HTTP endpoints
// =============================================================================

#[tokio::test]
async fn test_http_obligation_scenario_4() {
    let (status, body) = post(
        create_router(AppState::default()),
        "/obligations",
        json!({
            "role": "server",
            "sales_total": 2000.00,
            "tips_collected": 50.00,
            "bartender_count": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["calculation_id"].is_string());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["result"]["amount_owed_to_house_cents"], 9_000);
    assert_eq!(body["result"]["net_after_contributions_cents"], -9_000);
}

#[tokio::test]
async fn test_http_server_rules_apply() {
    let rules = TipRules {
        eligibility_threshold_cents: 0,
        ..TipRules::default()
    };
    let (status, body) = post(
        create_router(AppState::new(rules)),
        "/obligations",
        json!({"role": "bartender", "sales_total": 10.00, "tips_collected": 5.00}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["eligible"], true);
    assert_eq!(body["result"]["kitchen_contribution_cents"], 50);
}

#[tokio::test]
async fn test_http_invalid_rules_override_rejected() {
    let (status, body) = post(
        create_router(AppState::default()),
        "/obligations",
        json!({
            "role": "server",
            "sales_total": 200.00,
            "tips_collected": 30.00,
            "bartender_count": 1,
            "rules": {"kitchen_rate_bp": 20000}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RULES");
}

#[tokio::test]
async fn test_http_duplicate_worker_rejected() {
    let (status, body) = post(
        create_router(AppState::default()),
        "/shifts/distribute",
        json!({
            "service_period_id": "dinner_0113",
            "workers": [
                {"employee_id": "s1", "role": "server", "sales_total": 100.0, "tips_collected": 10.0},
                {"employee_id": "s1", "role": "server", "sales_total": 200.0, "tips_collected": 20.0},
                {"employee_id": "b1", "role": "bartender", "sales_total": 0.0, "tips_collected": 0.0}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DUPLICATE_EMPLOYEE");
}

#[tokio::test]
async fn test_http_negative_tips_rejected_with_worker_context() {
    let (status, body) = post(
        create_router(AppState::default()),
        "/shifts/distribute",
        json!({
            "service_period_id": "dinner_0113",
            "workers": [
                {"employee_id": "s1", "role": "server", "sales_total": 100.0, "tips_collected": -10.0},
                {"employee_id": "b1", "role": "bartender", "sales_total": 0.0, "tips_collected": 0.0}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_WORKER");
    assert!(body["message"].as_str().unwrap().contains("s1"));
}

#[tokio::test]
async fn test_http_weekly_zero_weighted_units() {
    let (status, body) = post(
        create_router(AppState::default()),
        "/kitchen/weekly",
        json!({
            "week_id": "2026-W03",
            "period_kitchen_pools": [
                {"service_period_id": "dinner_mon", "kitchen_pool_cents": 4000}
            ],
            "kitchen_work_logs": [
                {"employee_id": "chef", "service_period_id": "dinner_mon",
                 "hours_worked": "0", "role_weight": "1.5"}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "ZERO_WEIGHTED_UNITS");
}
