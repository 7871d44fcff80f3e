//! Read-only catalog and directory lookups.
//!
//! These feed the item/vendor/location pickers and the parameter default
//! resolution; the core never writes to any of them.

use tracing::instrument;

use offerdesk_core::ItemNo;

use crate::models::{DefaultItemParam, ItemSummary, LocationSummary, ParamDefinition, VendorSummary};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Ordered default parameter codes configured for an item.
    ///
    /// The order is the catalog's; deduplication and the 5-slot cap happen
    /// in the engine, not here.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self), fields(item_no = %item_no))]
    pub async fn default_item_params(
        &self,
        item_no: &ItemNo,
    ) -> Result<Vec<DefaultItemParam>, ApiError> {
        self.get_json(
            "/api/mdefault-item-parameters",
            &[("itemNo", item_no.to_string())],
        )
        .await
    }

    /// Search parameter definitions by code or description fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self))]
    pub async fn search_params(&self, query: &str) -> Result<Vec<ParamDefinition>, ApiError> {
        self.get_json("/api/params", &[("query", query.to_owned())])
            .await
    }

    /// Fetch one parameter definition by exact code, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; an unknown code is
    /// `Ok(None)`.
    #[instrument(skip(self))]
    pub async fn get_param_definition(
        &self,
        code: &str,
    ) -> Result<Option<ParamDefinition>, ApiError> {
        let definitions = self.search_params(code).await?;
        Ok(definitions
            .into_iter()
            .find(|def| def.code.eq_ignore_ascii_case(code)))
    }

    /// Typeahead lookup over the item catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self))]
    pub async fn search_items(&self, query: &str) -> Result<Vec<ItemSummary>, ApiError> {
        self.get_json("/api/mitems", &[("query", query.to_owned())])
            .await
    }

    /// Typeahead lookup over the vendor directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self))]
    pub async fn search_vendors(&self, query: &str) -> Result<Vec<VendorSummary>, ApiError> {
        self.get_json("/api/mvendors", &[("query", query.to_owned())])
            .await
    }

    /// Typeahead lookup over the location directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self))]
    pub async fn search_locations(&self, query: &str) -> Result<Vec<LocationSummary>, ApiError> {
        self.get_json("/api/mlocations", &[("query", query.to_owned())])
            .await
    }
}
