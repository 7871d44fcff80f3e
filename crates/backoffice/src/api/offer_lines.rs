//! Offer line CRUD and recalculation.

use tracing::instrument;

use offerdesk_core::DocumentNo;

use crate::models::{OfferLine, OfferSide, Page};

use super::{ApiClient, ApiError};

/// Query parameters accepted by the line list endpoints.
#[derive(Debug, Clone, Default)]
pub struct LineListQuery {
    /// Restrict to one offer document.
    pub document_no: Option<DocumentNo>,
    /// Free-text search over item number and description.
    pub query: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Server-side sort key (allow-listed by the store).
    pub sort: Option<String>,
    pub descending: bool,
}

impl LineListQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(document_no) = &self.document_no {
            params.push(("documentNo", document_no.to_string()));
        }
        if let Some(query) = &self.query {
            params.push(("query", query.clone()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("pageSize", page_size.to_string()));
        }
        if let Some(sort) = &self.sort {
            params.push(("sort", sort.clone()));
            params.push(("descending", self.descending.to_string()));
        }
        params
    }
}

impl ApiClient {
    /// List offer lines with paging, filtering, and server-side sorting.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self, query))]
    pub async fn list_offer_lines(
        &self,
        side: OfferSide,
        query: &LineListQuery,
    ) -> Result<Page<OfferLine>, ApiError> {
        self.get_json(side.lines_path(), &query.to_params()).await
    }

    /// Fetch one offer line by its store id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; a missing line is `Ok(None)`.
    #[instrument(skip(self), fields(line_id = id))]
    pub async fn get_offer_line(
        &self,
        side: OfferSide,
        id: i64,
    ) -> Result<Option<OfferLine>, ApiError> {
        self.get_json_opt(&format!("{}/{id}", side.lines_path()), &[])
            .await
    }

    /// Create an offer line; the store assigns `id` and `lineNo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the
    /// payload.
    #[instrument(skip(self, line), fields(document_no = %line.document_no))]
    pub async fn create_offer_line(
        &self,
        side: OfferSide,
        line: &OfferLine,
    ) -> Result<OfferLine, ApiError> {
        self.post_json(side.lines_path(), line).await
    }

    /// Update an existing offer line.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the line has no store id yet, or
    /// any transport/store error.
    #[instrument(skip(self, line), fields(document_no = %line.document_no))]
    pub async fn update_offer_line(
        &self,
        side: OfferSide,
        line: &OfferLine,
    ) -> Result<OfferLine, ApiError> {
        let id = line
            .id
            .ok_or_else(|| ApiError::NotFound(format!("offer line {} has no id", line.document_no)))?;
        self.put_json(&format!("{}/{id}", side.lines_path()), line)
            .await
    }

    /// Delete an offer line by store id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self), fields(line_id = id))]
    pub async fn delete_offer_line(&self, side: OfferSide, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}/{id}", side.lines_path()), &[]).await
    }

    /// Ask the store to recompute a line's derived fields server-side.
    ///
    /// The engine's own computation must match this result bit-for-bit;
    /// the integration tests pin that.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self), fields(line_id = id))]
    pub async fn recalc_offer_line(&self, side: OfferSide, id: i64) -> Result<OfferLine, ApiError> {
        self.post_empty(&format!("{}/{id}/recalc", side.lines_path()))
            .await
    }
}
