//! Derived monetary fields.
//!
//! Both functions are pure and cheap; the form calls them continuously
//! while the user edits, and the save pipeline calls them once more,
//! authoritatively, with the final input values. The store's `/recalc`
//! endpoint applies the same formulas server-side, so any change here must
//! stay bit-for-bit compatible.

use rust_decimal::Decimal;

use offerdesk_core::{coerce_numeric, round2};

/// `round2(unitPrice * quantity)`.
///
/// Missing inputs count as zero. Negative inputs are not rejected; credit
/// lines carry negative amounts through unchanged.
#[must_use]
pub fn compute_line_value(unit_price: Option<Decimal>, quantity: Option<Decimal>) -> Decimal {
    round2(coerce_numeric(unit_price) * coerce_numeric(quantity))
}

/// `round2((toll + driver + vehicle + additional) * (1 + margin/100))`.
///
/// `cost_margin_percent` is a percentage (10 means +10%). Missing inputs
/// count as zero, so a line with no cost inputs has transport cost 0.00
/// regardless of margin.
#[must_use]
pub fn compute_transport_cost(
    toll_cost: Option<Decimal>,
    driver_cost: Option<Decimal>,
    vehicle_cost: Option<Decimal>,
    additional_costs: Option<Decimal>,
    cost_margin_percent: Option<Decimal>,
) -> Decimal {
    let base = coerce_numeric(toll_cost)
        + coerce_numeric(driver_cost)
        + coerce_numeric(vehicle_cost)
        + coerce_numeric(additional_costs);
    let factor = Decimal::ONE + coerce_numeric(cost_margin_percent) / Decimal::ONE_HUNDRED;
    round2(base * factor)
}
