//! The line save pipeline.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use offerdesk_core::{coerce_numeric, LineKey, LineType};

use crate::api::{ApiClient, ApiError};
use crate::engine::pricing::{compute_line_value, compute_transport_cost};
use crate::error::AppError;
use crate::models::{OfferLine, OfferSide};

use super::{
    block_resync::resync_blocks, param_sync::sync_line_parameters, CurrentUserProvider, SaveGuard,
    SyncError, ValidationError,
};

/// Result of one best-effort step of the save saga.
#[derive(Debug)]
pub enum StepOutcome {
    /// The step was not required for this save.
    Skipped,
    Succeeded,
    /// The step failed; the line itself is still committed.
    Failed(SyncError),
}

impl StepOutcome {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Record of one completed save.
///
/// The line is always committed when this struct exists; `blocks` and
/// `parameters` may have failed independently and can be retried without
/// re-entering the form.
#[derive(Debug)]
pub struct LineSaveOutcome {
    pub line: OfferLine,
    pub blocks: StepOutcome,
    pub parameters: StepOutcome,
}

impl LineSaveOutcome {
    /// Whether every derived-state step either succeeded or was not
    /// required.
    #[must_use]
    pub const fn fully_synced(&self) -> bool {
        !self.blocks.is_failed() && !self.parameters.is_failed()
    }
}

/// Everything a form needs to run the save pipeline.
pub struct LineSaveContext<'a> {
    pub api: &'a ApiClient,
    pub user: &'a dyn CurrentUserProvider,
    /// The owning form's double-submit guard.
    pub guard: &'a SaveGuard,
    pub max_block_quantity: Decimal,
}

impl LineSaveContext<'_> {
    /// Save one offer line and resynchronize its derived state.
    ///
    /// `previous` is the line's last persisted state (`None` on create);
    /// it drives both the block-resync trigger comparison and the
    /// remove-missing decision for parameters. Steps run strictly
    /// sequentially because block and parameter writes need the `lineNo`
    /// the store assigns on create.
    ///
    /// # Errors
    ///
    /// - [`AppError::Busy`] if a save on the same guard is in flight
    /// - [`AppError::Validation`] before anything is sent
    /// - [`AppError::Api`] if the line upsert itself fails
    ///
    /// Block/parameter failures do NOT error; they come back inside the
    /// outcome as failed steps.
    #[instrument(skip(self, line, previous), fields(document_no = %line.document_no))]
    pub async fn save_line(
        &self,
        side: OfferSide,
        mut line: OfferLine,
        previous: Option<&OfferLine>,
    ) -> Result<LineSaveOutcome, AppError> {
        let _permit = self.guard.begin().ok_or(AppError::Busy)?;

        validate(&line)?;

        // Authoritative recomputation with the final input values; the
        // live per-keystroke computation in the form is advisory only.
        line.line_value = match line.line_type {
            LineType::Item => compute_line_value(line.unit_price, line.quantity),
            LineType::Description => previous.map_or(Decimal::ZERO, |p| p.line_value),
        };
        line.transport_cost = compute_transport_cost(
            line.toll_cost,
            line.driver_cost,
            line.vehicle_cost,
            line.additional_costs,
            line.cost_margin,
        );

        let user = self.user.current_user();
        let now = Utc::now();
        if previous.is_none() {
            line.user_created = Some(user.clone());
            line.date_created = Some(now);
        }
        line.user_modified = Some(user);
        line.date_modified = Some(now);

        let saved = if line.id.is_some() {
            self.api.update_offer_line(side, &line).await?
        } else {
            self.api.create_offer_line(side, &line).await?
        };

        let line_no = saved.line_no.ok_or_else(|| {
            ApiError::NotFound(format!(
                "store did not assign a lineNo for document {}",
                saved.document_no
            ))
        })?;
        let key = LineKey {
            document_no: saved.document_no.clone(),
            line_no,
        };

        let triggered = previous.is_none_or(|prev| resync_triggered(prev, &saved));

        let blocks = if side == OfferSide::Purchase && triggered {
            match resync_blocks(self.api, &key, &saved, self.max_block_quantity).await {
                Ok(_) => StepOutcome::Succeeded,
                Err(err) => StepOutcome::Failed(err),
            }
        } else {
            StepOutcome::Skipped
        };

        // Full resync (remove-missing) only after a structural change;
        // an ordinary edit leaves unrelated stored codes alone.
        let parameters =
            match sync_line_parameters(self.api, side, &key, &saved.parameters, triggered).await {
                Ok(_) => StepOutcome::Succeeded,
                Err(err) => StepOutcome::Failed(err),
            };

        let outcome = LineSaveOutcome {
            line: saved,
            blocks,
            parameters,
        };
        info!(
            line = %key,
            fully_synced = outcome.fully_synced(),
            "offer line saved"
        );
        Ok(outcome)
    }
}

fn validate(line: &OfferLine) -> Result<(), ValidationError> {
    if line.document_no.is_empty() {
        return Err(ValidationError::MissingDocumentNo);
    }
    if line.line_type == LineType::Item
        && line.item_no.as_ref().is_none_or(|item| item.is_empty())
    {
        return Err(ValidationError::MissingItemNo);
    }
    Ok(())
}

/// Whether the financially relevant fields changed, requiring block
/// regeneration and a full parameter resync.
fn resync_triggered(previous: &OfferLine, current: &OfferLine) -> bool {
    coerce_numeric(previous.quantity) != coerce_numeric(current.quantity)
        || coerce_numeric(previous.unit_price) != coerce_numeric(current.unit_price)
        || previous.unit_of_measure != current.unit_of_measure
        || coerce_numeric(previous.toll_cost) != coerce_numeric(current.toll_cost)
        || coerce_numeric(previous.driver_cost) != coerce_numeric(current.driver_cost)
        || coerce_numeric(previous.vehicle_cost) != coerce_numeric(current.vehicle_cost)
        || coerce_numeric(previous.additional_costs) != coerce_numeric(current.additional_costs)
        || coerce_numeric(previous.cost_margin) != coerce_numeric(current.cost_margin)
        || previous.status != current.status
        || previous.item_no != current.item_no
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use offerdesk_core::ItemNo;

    use super::*;

    fn item_line() -> OfferLine {
        let mut line = OfferLine::draft("ZO/2024/0001");
        line.item_no = Some(ItemNo::new("DESKA-25"));
        line
    }

    #[test]
    fn validation_requires_a_document_number() {
        let line = OfferLine::draft("");
        assert_eq!(validate(&line), Err(ValidationError::MissingDocumentNo));
    }

    #[test]
    fn validation_requires_an_item_for_item_lines() {
        let line = OfferLine::draft("ZO/2024/0001");
        assert_eq!(validate(&line), Err(ValidationError::MissingItemNo));
    }

    #[test]
    fn description_lines_need_no_item() {
        let mut line = OfferLine::draft("ZO/2024/0001");
        line.line_type = LineType::Description;
        assert_eq!(validate(&line), Ok(()));
    }

    #[test]
    fn quantity_change_triggers_a_resync() {
        let previous = {
            let mut l = item_line();
            l.quantity = Some(dec!(10));
            l
        };
        let mut current = previous.clone();
        assert!(!resync_triggered(&previous, &current));

        current.quantity = Some(dec!(12));
        assert!(resync_triggered(&previous, &current));
    }

    #[test]
    fn blank_and_zero_cost_inputs_compare_equal() {
        // None -> Some(0) is not a financial change; coercion happens
        // before the comparison just like before the computation.
        let previous = item_line();
        let mut current = previous.clone();
        current.toll_cost = Some(Decimal::ZERO);
        assert!(!resync_triggered(&previous, &current));
    }

    #[test]
    fn date_edits_do_not_trigger_a_resync() {
        let previous = item_line();
        let mut current = previous.clone();
        current.service_date = chrono::NaiveDate::from_ymd_opt(2024, 6, 1);
        assert!(!resync_triggered(&previous, &current));
    }

    #[test]
    fn status_change_triggers_a_resync() {
        let previous = item_line();
        let mut current = previous.clone();
        current.status = offerdesk_core::LineStatus::Published;
        assert!(resync_triggered(&previous, &current));
    }
}
