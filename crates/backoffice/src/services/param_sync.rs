//! Parameter resolution and synchronization.

use tracing::{info, instrument, warn};

use offerdesk_core::{ItemNo, LineKey};

use crate::api::{ApiClient, ApiError};
use crate::engine::params::{dedupe_default_codes, plan_sync, sync_set, ResolvedDefault, SyncAction};
use crate::models::{LineParameter, OfferSide, ParamSlot, PARAM_SLOT_COUNT};

use super::{ParamFailure, SyncError};

/// What the sync actually did, for the success notice.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParamSyncReport {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// Resolve an item's default parameters from the catalogs.
///
/// Fetches the ordered default code list for the item, deduplicates it
/// case-insensitively, caps it at the slot count, and pairs each code with
/// its catalog definition's default value (stringified by the catalog).
/// Codes without a definition resolve with no seed value.
///
/// The caller merges the result into the line's slots with
/// [`crate::engine::seed_defaults`] - typically whenever `itemNo` changes.
///
/// # Errors
///
/// Returns an error if a catalog request fails.
#[instrument(skip(api), fields(item_no = %item_no))]
pub async fn resolve_item_defaults(
    api: &ApiClient,
    item_no: &ItemNo,
) -> Result<Vec<ResolvedDefault>, ApiError> {
    let raw: Vec<String> = api
        .default_item_params(item_no)
        .await?
        .into_iter()
        .map(|entry| entry.param_code)
        .collect();

    let mut defaults = Vec::new();
    for code in dedupe_default_codes(&raw) {
        let default_value = api
            .get_param_definition(code.as_str())
            .await?
            .and_then(|def| def.default_value);
        defaults.push(ResolvedDefault {
            code,
            default_value,
        });
    }
    Ok(defaults)
}

/// Reconcile a line's slots against the external parameter store.
///
/// Upsert-by-natural-key: each non-empty slot code is created or updated;
/// with `remove_missing`, stored rows whose codes left the slot set are
/// deleted. Every action is attempted independently - a failure is
/// recorded and the remaining actions still run, so a partial failure
/// leaves the store partially updated and reports exactly which codes
/// failed.
///
/// # Errors
///
/// [`SyncError::ParameterStore`] if the store cannot be listed,
/// [`SyncError::Parameters`] naming the failed codes otherwise.
#[instrument(skip(api, slots), fields(line = %key, remove_missing))]
pub async fn sync_line_parameters(
    api: &ApiClient,
    side: OfferSide,
    key: &LineKey,
    slots: &[Option<ParamSlot>; PARAM_SLOT_COUNT],
    remove_missing: bool,
) -> Result<ParamSyncReport, SyncError> {
    let desired = sync_set(slots);

    let existing = api
        .list_line_parameters(side, key)
        .await
        .map_err(SyncError::ParameterStore)?;

    let mut report = ParamSyncReport::default();
    let mut failures: Vec<ParamFailure> = Vec::new();

    for action in plan_sync(&existing, &desired, remove_missing) {
        match action {
            SyncAction::Create { code, value } => {
                let row = LineParameter::new(
                    key.document_no.clone(),
                    key.line_no,
                    code.clone(),
                    value,
                );
                match api.create_line_parameter(side, &row).await {
                    Ok(_) => report.created += 1,
                    Err(source) => failures.push(ParamFailure { code, source }),
                }
            }
            SyncAction::Update { id, code, value } => {
                let mut row = LineParameter::new(
                    key.document_no.clone(),
                    key.line_no,
                    code.clone(),
                    value,
                );
                row.id = Some(id);
                match api.update_line_parameter(side, &row).await {
                    Ok(_) => report.updated += 1,
                    Err(source) => failures.push(ParamFailure { code, source }),
                }
            }
            SyncAction::Delete { id, code } => {
                match api.delete_line_parameter(side, id).await {
                    Ok(()) => report.deleted += 1,
                    Err(source) => failures.push(ParamFailure { code, source }),
                }
            }
        }
    }

    if failures.is_empty() {
        info!(
            line = %key,
            created = report.created,
            updated = report.updated,
            deleted = report.deleted,
            "parameters synchronized"
        );
        Ok(report)
    } else {
        warn!(line = %key, failed = failures.len(), "parameter sync incomplete");
        Err(SyncError::Parameters { failures })
    }
}
