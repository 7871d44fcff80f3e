//! The offer-line engine.
//!
//! Pure computation only; nothing in this module performs I/O. The save
//! pipeline in [`crate::services`] feeds catalog data in and persists the
//! results out.
//!
//! - [`pricing`] - derived monetary fields (line value, transport cost)
//! - [`blocks`] - quantity decomposition into bounded transport blocks
//!   with prorated costs
//! - [`params`] - the 5-slot parameter model: default seeding, sync set
//!   construction, and reconciliation planning

pub mod blocks;
pub mod params;
pub mod pricing;

pub use blocks::{build_blocks, split_quantity, DEFAULT_MAX_BLOCK_QUANTITY};
pub use params::{dedupe_default_codes, plan_sync, seed_defaults, sync_set, ResolvedDefault, SyncAction};
pub use pricing::{compute_line_value, compute_transport_cost};
