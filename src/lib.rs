//! Tip Distribution Engine for restaurant service periods
//!
//! This crate computes what each front-of-house worker owes in tip-outs for a
//! service period, redistributes the bartender pool among the bartenders on
//! shift, and allocates each week's kitchen pools to kitchen staff by
//! weighted hours. All money is carried as integer cents.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod money;
