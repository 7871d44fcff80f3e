//! Unified error handling for the backoffice.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::services::{SyncError, ValidationError};

/// Application-level error type for the backoffice core.
///
/// The save pipeline distinguishes validation failures (nothing was sent),
/// request failures (the line save itself failed), and partial
/// synchronization failures (the line is committed, derived state is not);
/// see [`crate::services::LineSaveOutcome`] for the partial case.
#[derive(Debug, Error)]
pub enum AppError {
    /// Local validation failed; no network call was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A store request failed.
    #[error("Store error: {0}")]
    Api(#[from] ApiError),

    /// Best-effort derived-state synchronization failed after the line
    /// itself was committed.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A save for this form is already in flight.
    #[error("A save is already in progress")]
    Busy,
}
