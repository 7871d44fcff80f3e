//! OfferDesk Backoffice - the core behind the offer management screens.
//!
//! This crate owns everything the back-office UI delegates to before and
//! after rendering:
//!
//! - [`api`] - typed REST client for the external document store and the
//!   item/vendor/location/parameter catalogs
//! - [`engine`] - the offer-line engine: derived monetary fields, transport
//!   block decomposition, and parameter slot resolution
//! - [`services`] - the multi-step save pipeline (line upsert, block
//!   resync, parameter sync) with explicit partial-failure reporting
//! - [`components`] - screen-local list view-state (query, filters,
//!   paging, sorting)
//!
//! # Architecture
//!
//! The document store is an external collaborator reached only over REST;
//! there is no local database. Within one save, steps run strictly
//! sequentially because later steps need the line number the store assigns
//! on create. The line upsert is the unit of truth; blocks and parameters
//! are best-effort derived state that can be re-pushed later without
//! re-entering the form.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;

pub use config::{BackofficeConfig, ConfigError};
pub use error::AppError;
