//! Core types for OfferDesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod param;
pub mod status;
pub mod unit;

pub use id::*;
pub use money::{coerce_numeric, round2};
pub use param::{ParamCode, ParamCodeError, ParamType};
pub use status::*;
pub use unit::UnitOfMeasure;
