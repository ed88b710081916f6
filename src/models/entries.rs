//! Input records supplied by the manager-entry workflow.
//!
//! These are plain values owned by the caller for the duration of one
//! computation. Money is carried in cents; hours and weights are exact
//! decimals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::money::dollars_to_cents;

use super::Role;

/// One front-of-house worker's figures for a single service period.
///
/// # Example
///
/// ```
/// use tip_engine::models::{Role, WorkerEntry};
///
/// let entry = WorkerEntry::from_dollars("emp_001", Role::Server, 1000.0, 200.0).unwrap();
/// assert_eq!(entry.sales_cents, 100_000);
/// assert_eq!(entry.tips_cents, 20_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEntry {
    /// The employee's identifier; must not be empty.
    pub employee_id: String,
    /// The role held on this shift.
    pub role: Role,
    /// Sales rung in by the worker, in cents.
    pub sales_cents: i64,
    /// Tips collected by the worker, in cents.
    pub tips_cents: i64,
}

impl WorkerEntry {
    /// Creates an entry from cent amounts.
    pub fn new(
        employee_id: impl Into<String>,
        role: Role,
        sales_cents: i64,
        tips_cents: i64,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            role,
            sales_cents,
            tips_cents,
        }
    }

    /// Creates an entry from dollar amounts, converting them to cents at once.
    pub fn from_dollars(
        employee_id: impl Into<String>,
        role: Role,
        sales_total: f64,
        tips_collected: f64,
    ) -> EngineResult<Self> {
        Ok(Self::new(
            employee_id,
            role,
            dollars_to_cents(sales_total)?,
            dollars_to_cents(tips_collected)?,
        ))
    }
}

/// Hours a kitchen employee worked in one service period.
///
/// Several logs for the same employee and period are aggregated before the
/// kitchen pool is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenWorkLog {
    /// The employee's identifier; must not be empty.
    pub employee_id: String,
    /// The service period worked; must not be empty.
    pub service_period_id: String,
    /// Hours worked; must not be negative.
    pub hours_worked: Decimal,
    /// Role-specific weight applied to the hours; must be strictly positive.
    pub role_weight: Decimal,
}

/// The kitchen pool collected in one service period.
///
/// Produced by a prior shift distribution and read back from persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodKitchenPool {
    /// The service period the pool was collected in.
    pub service_period_id: String,
    /// The pool total in cents; must not be negative.
    pub kitchen_pool_cents: i64,
}
