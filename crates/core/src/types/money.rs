//! Decimal money helpers shared by the engine and the wire models.
//!
//! All monetary amounts in the document store are decimals with two
//! fractional digits. The store rounds half away from zero, and the client
//! must match it bit-for-bit (the `/recalc` endpoint recomputes the same
//! derived fields server-side), so the rounding rule lives here in one
//! place.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a decimal amount to 2 places, half away from zero.
///
/// `12.345 * 3 == 37.035` rounds to `37.04`, matching the store's
/// server-side recalculation.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalize an optional numeric input to a concrete amount.
///
/// Blank or missing numeric fields on a form are treated as zero before any
/// computation, never as an error. This is the single named coercion step;
/// callers must not scatter their own `unwrap_or` defaults.
#[must_use]
pub fn coerce_numeric(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(dec!(37.035)), dec!(37.04));
        assert_eq!(round2(dec!(37.034)), dec!(37.03));
        assert_eq!(round2(dec!(-37.035)), dec!(-37.04));
    }

    #[test]
    fn round2_keeps_exact_amounts() {
        assert_eq!(round2(dec!(80)), dec!(80));
        assert_eq!(round2(dec!(22.00)), dec!(22.00));
    }

    #[test]
    fn coerce_numeric_defaults_missing_to_zero() {
        assert_eq!(coerce_numeric(None), Decimal::ZERO);
        assert_eq!(coerce_numeric(Some(dec!(4.5))), dec!(4.5));
    }
}
