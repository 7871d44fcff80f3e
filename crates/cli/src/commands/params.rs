//! Line parameter commands.

use offerdesk_backoffice::models::OfferSide;
use offerdesk_backoffice::services::sync_line_parameters;
use offerdesk_core::LineKey;

use super::client_from_env;

/// Re-push one line's parameter slots to the parameter store.
pub async fn sync(
    side: OfferSide,
    id: i64,
    remove_missing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (client, _config) = client_from_env()?;

    let line = client
        .get_offer_line(side, id)
        .await?
        .ok_or_else(|| format!("line {id} not found"))?;
    let line_no = line
        .line_no
        .ok_or("store returned a line without a line number")?;
    let key = LineKey::new(line.document_no.clone(), line_no);

    let report = sync_line_parameters(&client, side, &key, &line.parameters, remove_missing).await?;

    tracing::info!(
        "Parameters for {key}: {} created, {} updated, {} deleted",
        report.created,
        report.updated,
        report.deleted
    );

    Ok(())
}
