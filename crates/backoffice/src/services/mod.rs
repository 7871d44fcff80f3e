//! The save pipeline and its collaborators.
//!
//! A line save runs as a strictly sequential, best-effort saga:
//! validate → compute derived fields → persist the line → resync blocks
//! (purchase only) → resync parameters. The line upsert is the unit of
//! truth; later steps report failure without rolling anything back, and
//! [`line_save::LineSaveOutcome`] records which steps succeeded so the
//! caller can offer a retry.

pub mod block_resync;
pub mod line_save;
pub mod param_sync;

pub use block_resync::resync_blocks;
pub use line_save::{LineSaveContext, LineSaveOutcome, StepOutcome};
pub use param_sync::{resolve_item_defaults, sync_line_parameters, ParamSyncReport};

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use offerdesk_core::{BlockNo, ParamCode, UserCode};

use crate::api::ApiError;

/// Local validation failures; reported before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("documentNo is required")]
    MissingDocumentNo,
    #[error("itemNo is required for item lines")]
    MissingItemNo,
}

/// One parameter slot that failed to synchronize.
#[derive(Debug, Error)]
#[error("{code}: {source}")]
pub struct ParamFailure {
    pub code: ParamCode,
    #[source]
    pub source: ApiError,
}

/// Best-effort synchronization failures.
///
/// These surface as a distinct non-fatal notice; the saved line stays
/// committed and the sync can be re-triggered later (e.g. via `recalc`)
/// without re-entering the form.
#[derive(Debug, Error)]
pub enum SyncError {
    /// One or more parameter upserts/deletes failed; the rest went
    /// through.
    #[error("Parameters sync failed for: {}", format_failed_codes(failures))]
    Parameters { failures: Vec<ParamFailure> },

    /// The parameter store could not even be read; nothing was
    /// reconciled.
    #[error("Parameters sync failed: {0}")]
    ParameterStore(#[source] ApiError),

    /// Creating block `block` failed. Blocks `1..block` were already
    /// created and are intentionally left in place.
    #[error("Failed to (re)create purchase blocks: block {block} ({created} created)")]
    Blocks {
        block: BlockNo,
        created: usize,
        #[source]
        source: ApiError,
    },

    /// Wiping the old blocks failed; nothing was recreated.
    #[error("Failed to (re)create purchase blocks: {0}")]
    BlockStore(#[source] ApiError),
}

fn format_failed_codes(failures: &[ParamFailure]) -> String {
    failures
        .iter()
        .map(|f| f.code.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Who is pressing save.
///
/// Injected explicitly into the pipeline instead of read from ambient
/// session storage; audit stamping is the pipeline's job, the engine
/// never sees user identity.
pub trait CurrentUserProvider: Send + Sync {
    fn current_user(&self) -> UserCode;
}

/// Fixed-identity provider for the CLI and tests.
#[derive(Debug, Clone)]
pub struct StaticUser(pub UserCode);

impl CurrentUserProvider for StaticUser {
    fn current_user(&self) -> UserCode {
        self.0.clone()
    }
}

/// Per-form busy flag preventing double submission.
///
/// Every form owns one guard; a save begins only if no other save on the
/// same guard is in flight. The permit releases on drop, including on
/// early error returns.
#[derive(Debug, Default)]
pub struct SaveGuard {
    busy: AtomicBool,
}

impl SaveGuard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Try to begin a save; `None` means one is already in flight.
    #[must_use]
    pub fn begin(&self) -> Option<SavePermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SavePermit { guard: self })
    }

    /// Whether a save is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// RAII permit for one in-flight save.
#[derive(Debug)]
pub struct SavePermit<'a> {
    guard: &'a SaveGuard,
}

impl Drop for SavePermit<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_guard_rejects_reentrant_begin() {
        let guard = SaveGuard::new();
        let permit = guard.begin().expect("first begin succeeds");
        assert!(guard.begin().is_none());
        assert!(guard.is_busy());

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.begin().is_some());
    }

    #[test]
    fn parameters_error_names_the_failed_codes() {
        let err = SyncError::Parameters {
            failures: vec![
                ParamFailure {
                    code: ParamCode::parse("GATUNEK").unwrap(),
                    source: ApiError::NotFound("row".to_owned()),
                },
                ParamFailure {
                    code: ParamCode::parse("KLASA").unwrap(),
                    source: ApiError::NotFound("row".to_owned()),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Parameters sync failed for: GATUNEK, KLASA"
        );
    }

    #[test]
    fn a_param_failure_chains_to_its_store_error() {
        use std::error::Error as _;

        let failure = ParamFailure {
            code: ParamCode::parse("GATUNEK").unwrap(),
            source: ApiError::NotFound("row".to_owned()),
        };
        assert_eq!(failure.to_string(), "GATUNEK: not found: row");
        assert!(failure.source().is_some());
    }

    #[test]
    fn blocks_error_names_the_failed_block_number() {
        let err = SyncError::Blocks {
            block: BlockNo::new(2),
            created: 1,
            source: ApiError::NotFound("store".to_owned()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to (re)create purchase blocks: block 2 (1 created)"
        );
    }
}
