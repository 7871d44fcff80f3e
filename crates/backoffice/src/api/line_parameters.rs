//! Per-line parameter store CRUD.

use tracing::instrument;

use offerdesk_core::{LineKey, ParamCode};

use crate::models::{LineParameter, OfferSide};

use super::{ApiClient, ApiError};

impl ApiClient {
    /// List every stored parameter row for one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self), fields(line = %key))]
    pub async fn list_line_parameters(
        &self,
        side: OfferSide,
        key: &LineKey,
    ) -> Result<Vec<LineParameter>, ApiError> {
        self.get_json(
            side.parameters_path(),
            &[
                ("documentNo", key.document_no.to_string()),
                ("documentLineNo", key.line_no.to_string()),
            ],
        )
        .await
    }

    /// Look up one parameter row by its natural key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; no row is `Ok(None)`.
    #[instrument(skip(self), fields(line = %key, code = %code))]
    pub async fn find_line_parameter(
        &self,
        side: OfferSide,
        key: &LineKey,
        code: &ParamCode,
    ) -> Result<Option<LineParameter>, ApiError> {
        let rows: Vec<LineParameter> = self
            .get_json(
                side.parameters_path(),
                &[
                    ("documentNo", key.document_no.to_string()),
                    ("documentLineNo", key.line_no.to_string()),
                    ("paramCode", code.to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Create a parameter row.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the row.
    #[instrument(skip(self, row), fields(code = %row.param_code))]
    pub async fn create_line_parameter(
        &self,
        side: OfferSide,
        row: &LineParameter,
    ) -> Result<LineParameter, ApiError> {
        self.post_json(side.parameters_path(), row).await
    }

    /// Update a parameter row by store id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the row has no store id, or any
    /// transport/store error.
    #[instrument(skip(self, row), fields(code = %row.param_code))]
    pub async fn update_line_parameter(
        &self,
        side: OfferSide,
        row: &LineParameter,
    ) -> Result<LineParameter, ApiError> {
        let id = row.id.ok_or_else(|| {
            ApiError::NotFound(format!("parameter {} has no id", row.param_code))
        })?;
        self.put_json(&format!("{}/{id}", side.parameters_path()), row)
            .await
    }

    /// Delete a parameter row by store id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self), fields(row_id = id))]
    pub async fn delete_line_parameter(&self, side: OfferSide, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("{}/{id}", side.parameters_path()), &[])
            .await
    }
}
