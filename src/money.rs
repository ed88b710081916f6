//! Money and rounding primitives.
//!
//! Every monetary value inside the engine is an `i64` count of cents.
//! Dollar-denominated `f64` values are accepted only at the boundary and
//! converted immediately with [`dollars_to_cents`]; nothing downstream ever
//! mixes cents with decimal dollars.
//!
//! ## Rounding at the boundary
//!
//! A binary `f64` cannot represent most two-decimal amounts exactly, so a
//! naive `(x * 100.0 + 0.5).floor()` turns `1.005` into `100` cents. The
//! engine instead renders the `f64` with Rust's shortest round-trip
//! representation (the digits a person typed), parses that into a
//! [`Decimal`], and rounds half away from zero in exact decimal arithmetic.
//!
//! ```text
//!   input      naive float    this module
//!   1.005      100            101
//!  -1.005     -100           -101
//!   0.125      13             13
//! ```

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Denominator for basis-point rates (10,000 bp = 100%).
pub const BASIS_POINTS_SCALE: i64 = 10_000;

/// Largest absolute dollar amount accepted at the boundary ($10 trillion).
pub const MAX_DOLLAR_AMOUNT: f64 = 10_000_000_000_000.0;

/// Converts a dollar amount to integer cents, rounding half away from zero.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] for NaN, infinities, and
/// magnitudes above [`MAX_DOLLAR_AMOUNT`].
///
/// # Examples
///
/// ```
/// use tip_engine::money::dollars_to_cents;
///
/// assert_eq!(dollars_to_cents(1000.0).unwrap(), 100_000);
/// assert_eq!(dollars_to_cents(1.005).unwrap(), 101);
/// assert_eq!(dollars_to_cents(-1.005).unwrap(), -101);
/// assert!(dollars_to_cents(f64::NAN).is_err());
/// ```
pub fn dollars_to_cents(dollars: f64) -> EngineResult<i64> {
    if !dollars.is_finite() {
        return Err(EngineError::invalid_amount(
            "dollars",
            format!("{} is not a finite number", dollars),
        ));
    }
    if dollars.abs() > MAX_DOLLAR_AMOUNT {
        return Err(EngineError::invalid_amount(
            "dollars",
            format!("{} exceeds the supported maximum", dollars),
        ));
    }

    let exact = Decimal::from_str(&dollars.to_string())
        .map_err(|e| EngineError::invalid_amount("dollars", e.to_string()))?;

    exact
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_i64())
        .ok_or_else(|| EngineError::overflow(format!("{} dollars does not fit in cents", dollars)))
}

/// Computes `cents × bp / 10000`, rounding the remainder half up.
///
/// The product is formed in 128-bit arithmetic before dividing, so no
/// realistic sales figure can overflow.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAmount`] if `cents` is negative and
/// [`EngineError::Overflow`] if the result does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use tip_engine::money::mul_basis_points_round_half_up;
///
/// // 5.00% of $1000.00
/// assert_eq!(mul_basis_points_round_half_up(100_000, 500).unwrap(), 5_000);
/// // 1.00% of $0.50 is exactly half a cent, which rounds up
/// assert_eq!(mul_basis_points_round_half_up(50, 100).unwrap(), 1);
/// ```
pub fn mul_basis_points_round_half_up(cents: i64, bp: u32) -> EngineResult<i64> {
    if cents < 0 {
        return Err(EngineError::invalid_amount(
            "cents",
            format!("basis-point base must not be negative, got {}", cents),
        ));
    }

    let scale = i128::from(BASIS_POINTS_SCALE);
    let product = i128::from(cents) * i128::from(bp);
    let quotient = product / scale;
    let remainder = product % scale;
    let rounded = if remainder * 2 >= scale {
        quotient + 1
    } else {
        quotient
    };

    i64::try_from(rounded).map_err(|_| {
        EngineError::overflow(format!("{} cents at {} bp does not fit in cents", cents, bp))
    })
}

/// Formats cents as `$D.DD` or `-$D.DD` for audit text.
///
/// # Examples
///
/// ```
/// use tip_engine::money::format_money;
///
/// assert_eq!(format_money(14_000), "$140.00");
/// assert_eq!(format_money(-9_000), "-$90.00");
/// assert_eq!(format_money(7), "$0.07");
/// ```
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, magnitude / 100, magnitude % 100)
}

/// Formats a basis-point rate as a percentage, e.g. `500` as `5.00%`.
pub fn format_basis_points(bp: u32) -> String {
    format!("{}.{:02}%", bp / 100, bp % 100)
}
