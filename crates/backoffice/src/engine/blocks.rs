//! Transport block decomposition.
//!
//! A purchase line's quantity is represented downstream as one or more
//! blocks, none larger than the configured maximum. Costs are prorated by
//! quantity share, each field rounded independently to 2 decimals, so the
//! per-line sum of a prorated field may drift from the parent value by a
//! cent. That drift is accepted; nothing downstream compensates for it.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use offerdesk_core::{coerce_numeric, round2, BlockNo, LineKey};

use crate::models::{OfferLine, OfferLineBlock};

use super::pricing::{compute_line_value, compute_transport_cost};

/// Default maximum block quantity, in the line's unit of measure.
///
/// Overridable via `OFFERDESK_MAX_BLOCK_QUANTITY`.
pub const DEFAULT_MAX_BLOCK_QUANTITY: u32 = 25;

/// Split a total quantity into block quantities of at most `max` each.
///
/// Produces `floor(total / max)` blocks of `max` plus one remainder block
/// when the remainder is positive. A zero total still produces exactly one
/// zero-quantity block, never an empty split. Totals that are negative, or
/// a non-positive `max`, fall back to a single block carrying the whole
/// total unchanged.
#[must_use]
pub fn split_quantity(total: Decimal, max: Decimal) -> Vec<Decimal> {
    if total <= Decimal::ZERO || max <= Decimal::ZERO {
        return vec![total];
    }

    let full = (total / max).floor();
    let remainder = total - full * max;

    let full_count = full.to_u64().unwrap_or(0) as usize;
    let mut quantities = vec![max; full_count];
    if remainder > Decimal::ZERO {
        quantities.push(remainder);
    }
    quantities
}

/// Prorate a line-level cost onto one block's quantity share.
fn prorate(cost: Decimal, block_quantity: Decimal, total_quantity: Decimal) -> Decimal {
    if total_quantity == Decimal::ZERO {
        return Decimal::ZERO;
    }
    round2(cost * block_quantity / total_quantity)
}

/// Decompose a saved purchase line into its block records.
///
/// Every block carries a full denormalized snapshot of the line's
/// identity, classification, dates, and party/location fields, plus its
/// own quantity, line value, and prorated costs. `costMargin` is a
/// percentage and is copied to every block unchanged.
#[must_use]
pub fn build_blocks(key: &LineKey, line: &OfferLine, max: Decimal) -> Vec<OfferLineBlock> {
    let total = coerce_numeric(line.quantity);
    let toll = coerce_numeric(line.toll_cost);
    let driver = coerce_numeric(line.driver_cost);
    let vehicle = coerce_numeric(line.vehicle_cost);
    let additional = coerce_numeric(line.additional_costs);
    let margin = coerce_numeric(line.cost_margin);

    split_quantity(total, max)
        .into_iter()
        .enumerate()
        .map(|(index, quantity)| {
            let toll_cost = prorate(toll, quantity, total);
            let driver_cost = prorate(driver, quantity, total);
            let vehicle_cost = prorate(vehicle, quantity, total);
            let additional_costs = prorate(additional, quantity, total);

            OfferLineBlock {
                id: None,
                document_no: key.document_no.clone(),
                line_no: key.line_no,
                block: BlockNo::new(index as i32 + 1),
                status: line.status,
                line_type: line.line_type,
                priority: line.priority,
                item_no: line.item_no.clone(),
                description: line.description.clone(),
                unit_of_measure: line.unit_of_measure,
                quantity,
                unit_price: coerce_numeric(line.unit_price),
                line_value: compute_line_value(line.unit_price, Some(quantity)),
                toll_cost,
                driver_cost,
                vehicle_cost,
                additional_costs,
                cost_margin: margin,
                transport_cost: compute_transport_cost(
                    Some(toll_cost),
                    Some(driver_cost),
                    Some(vehicle_cost),
                    Some(additional_costs),
                    Some(margin),
                ),
                service_date: line.service_date,
                requested_delivery_date: line.requested_delivery_date,
                promised_delivery_date: line.promised_delivery_date,
                shipment_date: line.shipment_date,
                document_validity_date: line.document_validity_date,
                document_validity_hour: line.document_validity_hour,
                buy_vendor_no: line.buy_vendor_no.clone(),
                pay_vendor_no: line.pay_vendor_no.clone(),
                location_no: line.location_no.clone(),
                location_snapshot: line.location_snapshot.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn max() -> Decimal {
        Decimal::from(DEFAULT_MAX_BLOCK_QUANTITY)
    }

    fn line_with(quantity: Decimal, toll: Decimal) -> OfferLine {
        let mut line = OfferLine::draft("ZO/2024/0001");
        line.line_no = Some(offerdesk_core::LineNo::new(10_000));
        line.quantity = Some(quantity);
        line.toll_cost = Some(toll);
        line
    }

    fn key() -> LineKey {
        LineKey::new("ZO/2024/0001", 10_000)
    }

    #[test]
    fn split_of_zero_is_a_single_zero_block() {
        assert_eq!(split_quantity(dec!(0), max()), vec![dec!(0)]);
    }

    #[test]
    fn split_at_the_boundary_stays_whole() {
        assert_eq!(split_quantity(dec!(25), max()), vec![dec!(25)]);
    }

    #[test]
    fn split_just_over_the_boundary_adds_a_remainder() {
        assert_eq!(split_quantity(dec!(26), max()), vec![dec!(25), dec!(1)]);
    }

    #[test]
    fn split_of_exact_multiples_has_no_remainder_block() {
        assert_eq!(split_quantity(dec!(50), max()), vec![dec!(25), dec!(25)]);
        assert_eq!(
            split_quantity(dec!(51), max()),
            vec![dec!(25), dec!(25), dec!(1)]
        );
    }

    #[test]
    fn split_handles_fractional_quantities() {
        assert_eq!(
            split_quantity(dec!(30.5), max()),
            vec![dec!(25), dec!(5.5)]
        );
    }

    #[test]
    fn block_quantities_sum_back_to_the_total_exactly() {
        for total in [dec!(0.1), dec!(24.99), dec!(25), dec!(77.77), dec!(250)] {
            let sum: Decimal = split_quantity(total, max()).into_iter().sum();
            assert_eq!(sum, total, "drift for total {total}");
        }
    }

    #[test]
    fn proration_rounds_each_block_independently() {
        // 100 over [25, 5]: 83.33 + 16.67
        let blocks = build_blocks(&key(), &line_with(dec!(30), dec!(100)), max());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].toll_cost, dec!(83.33));
        assert_eq!(blocks[1].toll_cost, dec!(16.67));
    }

    #[test]
    fn prorated_costs_sum_within_a_cent_of_the_parent() {
        // 100.01 over [25, 25, 25, 2]: independent rounding may drift,
        // but never by more than a cent in total for one field.
        let blocks = build_blocks(&key(), &line_with(dec!(77), dec!(100.01)), max());
        let sum: Decimal = blocks.iter().map(|b| b.toll_cost).sum();
        assert!((sum - dec!(100.01)).abs() <= dec!(0.01), "sum was {sum}");
    }

    #[test]
    fn zero_quantity_line_gets_one_zero_block_with_zero_costs() {
        let blocks = build_blocks(&key(), &line_with(dec!(0), dec!(50)), max());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].quantity, dec!(0));
        assert_eq!(blocks[0].toll_cost, dec!(0));
        assert_eq!(blocks[0].block.as_i32(), 1);
    }

    #[test]
    fn every_block_carries_the_full_date_snapshot() {
        let mut line = line_with(dec!(30), dec!(0));
        line.service_date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1);
        line.document_validity_date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15);
        line.document_validity_hour = chrono::NaiveTime::from_hms_opt(12, 0, 0);

        let blocks = build_blocks(&key(), &line, max());
        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            assert_eq!(block.service_date, line.service_date);
            assert_eq!(block.document_validity_date, line.document_validity_date);
            assert_eq!(block.document_validity_hour, line.document_validity_hour);
        }
    }

    #[test]
    fn blocks_are_numbered_from_one() {
        let blocks = build_blocks(&key(), &line_with(dec!(51), dec!(0)), max());
        let numbers: Vec<i32> = blocks.iter().map(|b| b.block.as_i32()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn cost_margin_is_copied_not_prorated() {
        let mut line = line_with(dec!(30), dec!(100));
        line.cost_margin = Some(dec!(10));
        let blocks = build_blocks(&key(), &line, max());
        assert!(blocks.iter().all(|b| b.cost_margin == dec!(10)));
    }

    #[test]
    fn block_line_values_follow_block_quantities() {
        // quantity=40, unitPrice=2, tollCost=50 -> blocks [25, 15]
        let mut line = line_with(dec!(40), dec!(50));
        line.unit_price = Some(dec!(2));
        let blocks = build_blocks(&key(), &line, max());

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].line_value, dec!(50.00));
        assert_eq!(blocks[1].line_value, dec!(30.00));
        assert_eq!(blocks[0].toll_cost, dec!(31.25));
        assert_eq!(blocks[1].toll_cost, dec!(18.75));
    }
}
