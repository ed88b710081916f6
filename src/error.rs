//! Error types for the Tip Distribution Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing tip-outs and
//! payouts. Every computation is all-or-nothing: a single error aborts the
//! whole call and no partial payouts are returned.

use thiserror::Error;

/// The main error type for the Tip Distribution Engine.
///
/// # Example
///
/// ```
/// use tip_engine::error::EngineError;
///
/// let error = EngineError::InvalidBartenderCount {
///     context: "shift 'dinner_0113'".to_string(),
///     count: 3,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid bartender count for shift 'dinner_0113': 3 (expected 1 or 2)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Rules file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rules file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rules value was outside its allowed range.
    #[error("Invalid rules field '{field}': {message}")]
    InvalidRules {
        /// The rules field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A role string was not one of the supported roles.
    #[error("Invalid role '{role}': expected 'server' or 'bartender'")]
    InvalidRole {
        /// The rejected role string.
        role: String,
    },

    /// A money, hours or weight value was negative, non-finite or out of range.
    #[error("Invalid amount for '{field}': {message}")]
    InvalidAmount {
        /// The field carrying the invalid value.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A required identifier was empty.
    #[error("Missing identifier: {field} must not be empty")]
    MissingIdentifier {
        /// The identifier field that was empty.
        field: String,
    },

    /// A required collection was empty.
    #[error("Empty input: {field} must contain at least one entry")]
    EmptyInput {
        /// The collection that was empty.
        field: String,
    },

    /// The same employee appeared more than once in a shift.
    #[error("Duplicate employee '{employee_id}' in service period '{service_period_id}'")]
    DuplicateEmployee {
        /// The service period being distributed.
        service_period_id: String,
        /// The repeated employee id.
        employee_id: String,
    },

    /// The number of bartenders on shift was not 1 or 2.
    #[error("Invalid bartender count for {context}: {count} (expected 1 or 2)")]
    InvalidBartenderCount {
        /// Where the count was observed (a shift or a single worker).
        context: String,
        /// The rejected count.
        count: u32,
    },

    /// A worker failed validation inside a shift computation.
    #[error("Invalid worker '{employee_id}' in service period '{service_period_id}': {source}")]
    InvalidWorker {
        /// The service period being distributed.
        service_period_id: String,
        /// The worker that failed.
        employee_id: String,
        /// The underlying validation failure.
        #[source]
        source: Box<EngineError>,
    },

    /// A period has a non-zero kitchen pool but no work logs to allocate it by.
    #[error(
        "Kitchen pool of {pool_cents} cents for service period '{service_period_id}' has no work logs"
    )]
    UnallocatablePool {
        /// The period whose pool cannot be allocated.
        service_period_id: String,
        /// The pool amount in cents.
        pool_cents: i64,
    },

    /// A period's work logs sum to zero weighted units.
    #[error("Service period '{service_period_id}' has zero weighted units to allocate against")]
    ZeroWeightedUnits {
        /// The period with no weighted units.
        service_period_id: String,
    },

    /// An intermediate value overflowed the supported range.
    #[error("Arithmetic overflow: {message}")]
    Overflow {
        /// A description of the overflowing computation.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidAmount`] for a field.
    pub fn invalid_amount(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidAmount {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Builds an [`EngineError::Overflow`].
    pub fn overflow(message: impl Into<String>) -> Self {
        EngineError::Overflow {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
