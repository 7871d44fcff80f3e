//! OfferDesk Core - Shared types library.
//!
//! This crate provides common types used across all OfferDesk components:
//! - `backoffice` - Offer-line engine, REST client, and save pipeline
//! - `cli` - Command-line tools for listing and recalculation
//!
//! # Architecture
//!
//! The core crate contains only types and helpers - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe document/item/vendor codes,
//!   unit-of-measure and status enums, and decimal money helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
