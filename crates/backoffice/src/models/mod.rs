//! Wire models for the document store.
//!
//! All payloads use camelCase field names to match the store's REST API
//! exactly; these structs are the single source of truth for that contract.

pub mod block;
pub mod catalog;
pub mod line;
pub mod page;
pub mod parameter;

pub use block::OfferLineBlock;
pub use catalog::{DefaultItemParam, ItemSummary, LocationSummary, ParamDefinition, VendorSummary};
pub use line::{LocationSnapshot, OfferLine, ParamSlot, PARAM_SLOT_COUNT};
pub use page::Page;
pub use parameter::LineParameter;

use serde::{Deserialize, Serialize};

/// Which offer family a line belongs to.
///
/// Purchase and sales lines share the same shape but live behind separate
/// endpoint families; blocks exist for purchase lines only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferSide {
    Purchase,
    Sales,
}

impl OfferSide {
    /// Endpoint for offer line CRUD.
    #[must_use]
    pub const fn lines_path(self) -> &'static str {
        match self {
            Self::Purchase => "/api/purchase-offer-lines",
            Self::Sales => "/api/sales-offer-lines",
        }
    }

    /// Endpoint for the per-line parameter store.
    #[must_use]
    pub const fn parameters_path(self) -> &'static str {
        match self {
            Self::Purchase => "/api/purchase-line-parameters",
            Self::Sales => "/api/sales-line-parameters",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_selects_endpoint_family() {
        assert_eq!(OfferSide::Purchase.lines_path(), "/api/purchase-offer-lines");
        assert_eq!(OfferSide::Sales.parameters_path(), "/api/sales-line-parameters");
    }
}
