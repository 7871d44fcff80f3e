//! Transport block resynchronization.

use rust_decimal::Decimal;
use tracing::{info, instrument};

use offerdesk_core::LineKey;

use crate::api::ApiClient;
use crate::engine::build_blocks;
use crate::models::{OfferLine, OfferLineBlock};

use super::SyncError;

/// Replace a purchase line's blocks with a fresh decomposition.
///
/// Existing blocks are deleted unconditionally first (full replace, not an
/// incremental diff), then the new blocks are created one by one in block
/// order. If a create fails, the error names the failed block number;
/// blocks created before it are not rolled back - the store's `recalc`
/// can rebuild the set later.
///
/// # Errors
///
/// [`SyncError::BlockStore`] if the wipe fails, [`SyncError::Blocks`] if a
/// create fails.
#[instrument(skip(api, line), fields(line = %key))]
pub async fn resync_blocks(
    api: &ApiClient,
    key: &LineKey,
    line: &OfferLine,
    max_block_quantity: Decimal,
) -> Result<Vec<OfferLineBlock>, SyncError> {
    api.delete_blocks_for_line(key)
        .await
        .map_err(SyncError::BlockStore)?;

    let blocks = build_blocks(key, line, max_block_quantity);
    let mut created = Vec::with_capacity(blocks.len());

    for block in blocks {
        let block_no = block.block;
        match api.create_block(&block).await {
            Ok(stored) => created.push(stored),
            Err(source) => {
                return Err(SyncError::Blocks {
                    block: block_no,
                    created: created.len(),
                    source,
                });
            }
        }
    }

    info!(line = %key, blocks = created.len(), "recreated purchase blocks");
    Ok(created)
}
