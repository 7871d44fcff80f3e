//! Offer line payload.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use offerdesk_core::{
    DocumentNo, ItemNo, LineNo, LineStatus, LineType, LocationNo, PurchasePriority, UnitOfMeasure,
    UserCode, VendorNo,
};

/// Number of parameter slots on an offer line.
pub const PARAM_SLOT_COUNT: usize = 5;

/// One of the up-to-five named parameters attached to a line.
///
/// The code is raw user/catalog input here; it is normalized to uppercase
/// when the synchronization set is built, not before, so the form can echo
/// back exactly what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ParamSlot {
    pub param_code: String,
    pub param_value: String,
}

impl ParamSlot {
    /// Create a slot from raw code and value strings.
    #[must_use]
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            param_code: code.into(),
            param_value: value.into(),
        }
    }
}

/// Denormalized location snapshot carried by purchase lines.
///
/// Copied from the location directory when the location is picked; the
/// store keeps the copy even if the directory entry later changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LocationSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_post_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_country: Option<String>,
}

/// One row of a purchase or sales offer.
///
/// `line_no` is assigned by the store on create and must be `None` until
/// then. `line_value` and `transport_cost` are derived; the save pipeline
/// recomputes them authoritatively before every persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferLine {
    /// Store-assigned surrogate key; `None` before the first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    // Identity
    pub document_no: DocumentNo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_no: Option<LineNo>,

    // Classification
    #[serde(default)]
    pub status: LineStatus,
    #[serde(default)]
    pub line_type: LineType,
    /// Purchase lines only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<PurchasePriority>,

    // Commercial fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_no: Option<ItemNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub unit_of_measure: UnitOfMeasure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    /// Derived: `round2(unitPrice * quantity)` for item lines.
    #[serde(default)]
    pub line_value: Decimal,

    // Cost fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toll_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_costs: Option<Decimal>,
    /// Percentage margin applied on top of the cost inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_margin: Option<Decimal>,
    /// Derived: `round2(sum_of_costs * (1 + costMargin/100))`.
    #[serde(default)]
    pub transport_cost: Decimal,

    // Dates, inherited from the parent document when blank
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

    // Party/location references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_vendor_no: Option<VendorNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_vendor_no: Option<VendorNo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_no: Option<LocationNo>,
    /// Purchase lines only.
    #[serde(flatten)]
    pub location_snapshot: LocationSnapshot,

    // Parameter slots
    #[serde(default)]
    pub parameters: [Option<ParamSlot>; PARAM_SLOT_COUNT],

    // Audit, set by the client at save time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_created: Option<UserCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_modified: Option<UserCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl OfferLine {
    /// Create a minimal draft line for a document.
    #[must_use]
    pub fn draft(document_no: impl Into<DocumentNo>) -> Self {
        Self {
            id: None,
            document_no: document_no.into(),
            line_no: None,
            status: LineStatus::default(),
            line_type: LineType::default(),
            priority: None,
            item_no: None,
            description: None,
            unit_of_measure: UnitOfMeasure::default(),
            unit_price: None,
            quantity: None,
            line_value: Decimal::ZERO,
            toll_cost: None,
            driver_cost: None,
            vehicle_cost: None,
            additional_costs: None,
            cost_margin: None,
            transport_cost: Decimal::ZERO,
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
            parameters: Default::default(),
            user_created: None,
            date_created: None,
            user_modified: None,
            date_modified: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn serializes_camel_case_field_names() {
        let mut line = OfferLine::draft("ZO/2024/0001");
        line.unit_price = Some(dec!(12.50));
        line.line_value = dec!(25.00);

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["documentNo"], "ZO/2024/0001");
        assert_eq!(json["unitPrice"], "12.50");
        assert_eq!(json["lineValue"], "25.00");
        assert!(json.get("unit_price").is_none());
    }

    #[test]
    fn omits_unset_line_no_on_create_payload() {
        let line = OfferLine::draft("ZO/2024/0001");
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("lineNo").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn parameter_slots_round_trip() {
        let mut line = OfferLine::draft("ZO/2024/0001");
        line.parameters[0] = Some(ParamSlot::new("gatunek", "C24"));

        let json = serde_json::to_string(&line).unwrap();
        let back: OfferLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.parameters[0].as_ref().unwrap().param_code, "gatunek");
        assert!(back.parameters[4].is_none());
    }

    #[test]
    fn location_snapshot_flattens_into_the_line() {
        let mut line = OfferLine::draft("ZO/2024/0001");
        line.location_snapshot.location_city = Some("Gdansk".to_owned());

        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["locationCity"], "Gdansk");
        assert!(json.get("locationSnapshot").is_none());
    }
}
