//! List screen view-state: query, filters, paging, sorting.
//!
//! Every list screen (offers, lines, customers, vendors, items, users,
//! transport units) owns one independent `ListState`. Changing any filter,
//! the query, or the sort resets the page to 1. Sorting is delegated to
//! the server only when the key is in the screen's allow-list; otherwise a
//! stable client-side comparator runs over the already-fetched page.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction, for header-click toggling.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// A sort key plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub key: String,
    pub direction: SortDirection,
}

/// State of one list screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    /// Free-text search query.
    pub query: String,
    /// Exact-match filters, keyed by field name.
    pub filters: BTreeMap<String, String>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<Sort>,
}

impl ListState {
    /// Create a fresh state on page 1.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            filters: BTreeMap::new(),
            page: 1,
            page_size,
            sort: None,
        }
    }

    /// Set the free-text query; resets to page 1.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    /// Set an exact-match filter; resets to page 1.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(key.into(), value.into());
        self.page = 1;
    }

    /// Remove a filter; resets to page 1.
    pub fn clear_filter(&mut self, key: &str) {
        self.filters.remove(key);
        self.page = 1;
    }

    /// Sort by `key`, toggling direction when the key is already active;
    /// resets to page 1.
    pub fn sort_by(&mut self, key: &str) {
        let direction = match &self.sort {
            Some(sort) if sort.key == key => sort.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some(Sort {
            key: key.to_owned(),
            direction,
        });
        self.page = 1;
    }

    /// Jump to a page (1-based; 0 is clamped to 1). Paging alone does not
    /// reset anything else.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Whether the active sort can be delegated to the server.
    #[must_use]
    pub fn is_server_sort(&self, allowed_keys: &[&str]) -> bool {
        self.sort
            .as_ref()
            .is_some_and(|sort| allowed_keys.contains(&sort.key.as_str()))
    }
}

/// A row's value under some sort key.
///
/// String keys compare case-insensitively, date keys as epoch millis,
/// numeric keys numerically. Missing values sort first ascending.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Text(String),
    Date(DateTime<Utc>),
    Number(Decimal),
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Text(_) => 1,
            Self::Date(_) => 2,
            Self::Number(_) => 3,
        }
    }

    fn compare(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Date(a), Self::Date(b)) => {
                a.timestamp_millis().cmp(&b.timestamp_millis())
            }
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            // Mixed kinds only happen on heterogeneous columns; order by
            // kind so the result is still total and deterministic.
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Convenience constructor from an optional string field.
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, |v| Self::Text(v.to_owned()))
    }
}

/// Stable client-side sort over one fetched page.
///
/// Ties preserve the original row order (the server's order), which keeps
/// repeated clicks deterministic.
pub fn sort_rows<T>(
    rows: &mut [T],
    direction: SortDirection,
    key_of: impl Fn(&T) -> SortValue,
) {
    rows.sort_by(|a, b| {
        let ordering = key_of(a).compare(&key_of(b));
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
