//! Core data models for the Tip Distribution Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod entries;
mod line_item;
mod results;
mod role;

pub use entries::{KitchenWorkLog, PeriodKitchenPool, WorkerEntry};
pub use line_item::{LineItem, LineItemKind};
pub use results::{ObligationResult, ShiftPayout, ShiftResult, WeeklyKitchenPayout, WeeklyResult};
pub use role::Role;
