// 💵 Money - Decimal amount paired with a currency code
// Amounts are never converted between currencies

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency used when the upstream omits one
pub const DEFAULT_CURRENCY: &str = "USD";

// ============================================================================
// MONEY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Magnitude in major units (e.g. 12.50 dollars)
    pub amount: Decimal,

    /// ISO 4217 code: USD, EUR, GBP, etc.
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Money {
            amount,
            currency: currency.into(),
        }
    }

    /// Zero amount in the given currency
    pub fn zero(currency: impl Into<String>) -> Self {
        Money::new(Decimal::ZERO, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency.eq_ignore_ascii_case(&other.currency)
    }

    /// Add another amount of the same currency, None on mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if !self.same_currency(other) {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Money::new(amount, self.currency.clone()))
    }
}

/// Round to a whole number, halves towards positive infinity: 2.5 -> 3, -2.5 -> -2
pub fn round_half_up(value: Decimal) -> Option<Decimal> {
    value.checked_add(Decimal::new(5, 1)).map(|v| v.floor())
}

// ============================================================================
// FORMATTING
// ============================================================================

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" | "CAD" | "AUD" | "NZD" | "MXN" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        _ => None,
    }
}

/// Group the integer part with commas: 1234567 -> "1,234,567"
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a Money value for display: "$1,234.50", "€12.00", "CHF 3.00"
pub fn format_amount(money: &Money) -> String {
    let rounded = money
        .amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let number = format!("{}.{}", group_thousands(int_part), frac_part);
    let sign = if negative { "-" } else { "" };

    match currency_symbol(&money.currency) {
        Some(symbol) => format!("{}{}{}", sign, symbol, number),
        None => format!("{}{} {}", sign, money.currency.to_ascii_uppercase(), number),
    }
}

// ============================================================================
// TESTS
// ============================================================================
