//! Offer line commands.

use offerdesk_backoffice::api::LineListQuery;
use offerdesk_backoffice::models::OfferSide;
use offerdesk_backoffice::services::{resync_blocks, sync_line_parameters};
use offerdesk_core::LineKey;

use super::client_from_env;

/// List offer lines, one row per tracing line.
pub async fn list(
    side: OfferSide,
    document: Option<String>,
    query: Option<String>,
    page: u32,
    page_size: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (client, _config) = client_from_env()?;

    let list_query = LineListQuery {
        document_no: document.map(Into::into),
        query,
        page: Some(page),
        page_size: Some(page_size),
        ..LineListQuery::default()
    };

    let result = client.list_offer_lines(side, &list_query).await?;

    tracing::info!(
        "Found {} line(s) (showing page {page} of {} per page)",
        result.total_count,
        page_size
    );
    for line in &result.items {
        let line_no = line
            .line_no
            .map_or_else(|| "-".to_string(), |n| n.as_i32().to_string());
        tracing::info!(
            "  {} / {line_no}  {:?}  item={}  qty={}  value={}  transport={}",
            line.document_no,
            line.status,
            line.item_no.as_ref().map_or("-", |i| i.as_str()),
            line.quantity.unwrap_or_default(),
            line.line_value,
            line.transport_cost,
        );
    }

    Ok(())
}

/// Recompute a line server-side, then resync its blocks and parameters.
pub async fn recalc(side: OfferSide, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let (client, config) = client_from_env()?;

    let line = client.recalc_offer_line(side, id).await?;
    let line_no = line
        .line_no
        .ok_or("store returned a recalculated line without a line number")?;
    let key = LineKey::new(line.document_no.clone(), line_no);

    tracing::info!(
        "Recalculated {key}: lineValue={} transportCost={}",
        line.line_value,
        line.transport_cost
    );

    if side == OfferSide::Purchase {
        let blocks = resync_blocks(&client, &key, &line, config.max_block_quantity).await?;
        tracing::info!("Recreated {} block(s)", blocks.len());
    }

    let report = sync_line_parameters(&client, side, &key, &line.parameters, true).await?;
    tracing::info!(
        "Parameters synced: {} created, {} updated, {} deleted",
        report.created,
        report.updated,
        report.deleted
    );

    Ok(())
}
