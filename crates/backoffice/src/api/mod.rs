//! Typed REST client for the document store and catalogs.
//!
//! One [`ApiClient`] serves every endpoint family; each resource gets its
//! own module adding methods to the client:
//!
//! - [`offer_lines`] - purchase/sales offer line CRUD and recalculation
//! - [`line_parameters`] - the per-line parameter store
//! - [`blocks`] - the purchase transport block store
//! - [`catalog`] - read-only item/vendor/location/parameter lookups

mod blocks;
mod catalog;
mod client;
mod line_parameters;
mod offer_lines;

pub use client::ApiClient;
pub use offer_lines::LineListQuery;

use thiserror::Error;

/// Errors that can occur when talking to the document store.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status. `message` carries the
    /// server-provided message when the body had one, otherwise a generic
    /// fallback.
    #[error("request failed ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided or fallback message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base.
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}
