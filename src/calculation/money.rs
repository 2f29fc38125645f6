//! Rounding and percentage helpers shared by every rule.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{LineItem, LineItemCode};

/// Rounds a monetary amount to `scale` decimal places, midpoint away from zero.
///
/// The result always carries exactly `scale` decimal places, so amounts
/// serialize uniformly (`"200000.00"` rather than `"200000"`).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let arl = Decimal::from_str("22837.5").unwrap();
/// assert_eq!(round_amount(arl, 2), Decimal::from_str("22837.50").unwrap());
/// assert_eq!(round_amount(arl, 0), Decimal::from_str("22838").unwrap());
/// ```
pub fn round_amount(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

/// Applies a percentage (e.g. `4` for 4%) to a base amount, unrounded.
pub fn percentage_of(base: Decimal, percentage: Decimal) -> Decimal {
    base * percentage / Decimal::ONE_HUNDRED
}

/// Builds a rate-based line item with its rounded amount.
pub(crate) fn percentage_item(
    code: LineItemCode,
    description: &str,
    base: Decimal,
    percentage: Decimal,
    scale: u32,
) -> LineItem {
    LineItem {
        category: code.category(),
        code,
        description: description.to_string(),
        amount: round_amount(percentage_of(base, percentage), scale),
        rate_applied: Some(percentage),
        base_amount: Some(base),
    }
}

/// Builds a fixed-amount line item.
pub(crate) fn fixed_item(
    code: LineItemCode,
    description: &str,
    amount: Decimal,
    scale: u32,
) -> LineItem {
    LineItem {
        category: code.category(),
        code,
        description: description.to_string(),
        amount: round_amount(amount, scale),
        rate_applied: None,
        base_amount: None,
    }
}
