//! Screen-local UI state components.
//!
//! Each list screen owns its own [`list_state::ListState`]; nothing here
//! is shared across screens or cached beyond the current page.

pub mod list_state;

pub use list_state::{sort_rows, ListState, Sort, SortDirection, SortValue};
