//! Purchase transport block store.

use tracing::instrument;

use offerdesk_core::LineKey;

use crate::models::OfferLineBlock;

use super::{ApiClient, ApiError};

/// Endpoint for the purchase block store.
const BLOCKS_PATH: &str = "/api/purchase-offer-lines-blocks";

impl ApiClient {
    /// List the blocks currently stored for one purchase line.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self), fields(line = %key))]
    pub async fn list_blocks(&self, key: &LineKey) -> Result<Vec<OfferLineBlock>, ApiError> {
        self.get_json(
            BLOCKS_PATH,
            &[
                ("documentNo", key.document_no.to_string()),
                ("lineNo", key.line_no.to_string()),
            ],
        )
        .await
    }

    /// Create one block record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store rejects the
    /// block.
    #[instrument(skip(self, block), fields(line = %block.document_no, block_no = %block.block))]
    pub async fn create_block(&self, block: &OfferLineBlock) -> Result<OfferLineBlock, ApiError> {
        self.post_json(BLOCKS_PATH, block).await
    }

    /// Delete every block stored for one line.
    ///
    /// The resync service calls this unconditionally before recreating;
    /// blocks are a full-replace projection, never diffed incrementally.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the store answers non-2xx.
    #[instrument(skip(self), fields(line = %key))]
    pub async fn delete_blocks_for_line(&self, key: &LineKey) -> Result<(), ApiError> {
        self.delete(
            BLOCKS_PATH,
            &[
                ("documentNo", key.document_no.to_string()),
                ("lineNo", key.line_no.to_string()),
            ],
        )
        .await
    }
}
