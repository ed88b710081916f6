//! HTTP API module for the Tip Distribution Engine.
//!
//! This module provides the REST endpoints that wrap the obligation
//! calculator, the shift distributor and the weekly kitchen allocator.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ObligationInputs, ObligationRequest, RulesOverride, ShiftRequest, WeeklyKitchenRequest,
    WorkerRequest,
};
pub use response::{ApiError, CalculationEnvelope};
pub use state::AppState;
