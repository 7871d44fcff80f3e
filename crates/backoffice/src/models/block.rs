//! Transport block payload.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use offerdesk_core::{
    BlockNo, DocumentNo, ItemNo, LineNo, LineStatus, LineType, LocationNo, PurchasePriority,
    UnitOfMeasure, VendorNo,
};

use super::line::LocationSnapshot;

/// A quantity-bounded fragment of a purchase offer line.
///
/// Blocks are disposable projections: the resync service deletes and
/// regenerates all blocks of a line whenever a financially relevant field
/// changes. Each block carries a full denormalized snapshot of its parent
/// line (copy, not reference) so downstream logistics processing never has
/// to join back to the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferLineBlock {
    /// Store-assigned surrogate key; `None` before create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    // Identity: (documentNo, lineNo, block)
    pub document_no: DocumentNo,
    pub line_no: LineNo,
    /// 1-based sequence number within the line.
    pub block: BlockNo,

    // Classification snapshot
    pub status: LineStatus,
    pub line_type: LineType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PurchasePriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_no: Option<ItemNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit_of_measure: UnitOfMeasure,

    // Block quantity and money
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// `round2(unitPrice * quantity)` for this block's quantity.
    pub line_value: Decimal,

    // Prorated cost fields; costMargin is copied, not prorated.
    pub toll_cost: Decimal,
    pub driver_cost: Decimal,
    pub vehicle_cost: Decimal,
    pub additional_costs: Decimal,
    pub cost_margin: Decimal,
    pub transport_cost: Decimal,

    // Date snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promised_delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_validity_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_validity_hour: Option<NaiveTime>,

    // Party/location snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_vendor_no: Option<VendorNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_vendor_no: Option<VendorNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_no: Option<LocationNo>,
    #[serde(flatten)]
    pub location_snapshot: LocationSnapshot,
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn block_identity_serializes_camel_case() {
        let block = OfferLineBlock {
            id: None,
            document_no: DocumentNo::new("ZO/2024/0001"),
            line_no: LineNo::new(10_000),
            block: BlockNo::new(1),
            status: LineStatus::Draft,
            line_type: LineType::Item,
            priority: None,
            item_no: Some(ItemNo::new("DESKA-25")),
            description: None,
            unit_of_measure: UnitOfMeasure::M3,
            quantity: dec!(25),
            unit_price: dec!(2),
            line_value: dec!(50.00),
            toll_cost: dec!(31.25),
            driver_cost: Decimal::ZERO,
            vehicle_cost: Decimal::ZERO,
            additional_costs: Decimal::ZERO,
            cost_margin: Decimal::ZERO,
            transport_cost: dec!(31.25),
            service_date: None,
            requested_delivery_date: None,
            promised_delivery_date: None,
            shipment_date: None,
            document_validity_date: None,
            document_validity_hour: None,
            buy_vendor_no: None,
            pay_vendor_no: None,
            location_no: None,
            location_snapshot: LocationSnapshot::default(),
        };

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["documentNo"], "ZO/2024/0001");
        assert_eq!(json["lineNo"], 10_000);
        assert_eq!(json["block"], 1);
        assert_eq!(json["tollCost"], "31.25");
    }
}
