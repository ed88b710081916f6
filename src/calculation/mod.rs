//! Calculation logic for the Tip Distribution Engine.
//!
//! This module contains the per-worker obligation calculator, the shift
//! distributor that builds the kitchen and bartender pools for a service
//! period, and the weekly kitchen allocator that apportions the kitchen
//! pools across kitchen staff by weighted hours.

mod kitchen_allocation;
mod obligations;
mod shift_distribution;

pub use kitchen_allocation::{
    WEIGHTED_UNIT_SCALE, allocate_weekly_kitchen, apportion_largest_remainder, weighted_units,
};
pub use obligations::calculate_obligations;
pub use shift_distribution::{distribute_shift, split_evenly};
