// 📈 Delta Calculator - Period-over-period percentage change

use crate::money::{round_half_up, Money};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Signed percentage change from `previous` to `current`, e.g. "+50 %".
///
/// Returns None when either value is zero or both are equal: there is
/// nothing meaningful to show, and when the ratio does not fit a Decimal.
/// Rounds half up to a whole percent.
pub fn percent_delta(previous: Decimal, current: Decimal) -> Option<String> {
    if previous.is_zero() || current.is_zero() || previous == current {
        return None;
    }

    let ratio = current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    let rounded = round_half_up(ratio)?.to_i64()?;

    let sign = if rounded > 0 && current.abs() > previous.abs() {
        "+"
    } else {
        ""
    };

    Some(format!("{}{} %", sign, rounded))
}

/// Same as `percent_delta`, for two Money values of the same currency
pub fn money_delta(previous: &Money, current: &Money) -> Option<String> {
    if !previous.same_currency(current) {
        return None;
    }
    percent_delta(previous.amount, current.amount)
}

// ============================================================================
// TESTS
// ============================================================================
