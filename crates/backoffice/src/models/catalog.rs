//! Catalog and directory payloads (read-only collaborators).

use serde::{Deserialize, Serialize};

use offerdesk_core::{ItemNo, LocationNo, ParamType, UnitOfMeasure, VendorNo};

/// A parameter definition from the parameter catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDefinition {
    /// Catalog code, any case on the wire.
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub param_type: ParamType,
    /// Seed value for empty slots, already in string form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// One entry of an item's ordered default parameter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultItemParam {
    pub item_no: ItemNo,
    /// Raw catalog code; may repeat or vary in case, the engine
    /// deduplicates case-insensitively.
    pub param_code: String,
}

/// Item picker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub item_no: ItemNo,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_unit_of_measure: UnitOfMeasure,
}

/// Vendor picker row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorSummary {
    pub vendor_no: VendorNo,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Location picker row; source of the denormalized snapshot on purchase
/// lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub location_no: LocationNo,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}
