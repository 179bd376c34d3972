//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary values are `f64` at the row boundary; arithmetic goes through
//! `Decimal` and is rounded to 2 places (half-up) before leaving this module.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 amount to Decimal for calculation
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert a Decimal back to f64, rounded to 2 places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Sum of unit amount × quantity over (amount, number) pairs
pub fn line_total(lines: impl IntoIterator<Item = (f64, i64)>) -> f64 {
    let mut total = Decimal::ZERO;
    for (amount, number) in lines {
        total += to_decimal(amount) * Decimal::from(number);
    }
    to_f64(total)
}

/// amount / count, 0.0 on a zero denominator
pub fn safe_average(amount: f64, count: i64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    to_f64(to_decimal(amount) / Decimal::from(count))
}
