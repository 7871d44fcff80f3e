//! Unit of measure for offer line quantities.

use serde::{Deserialize, Serialize};

/// Unit of measure carried by an offer line.
///
/// The store uses the Polish trade abbreviations verbatim on the wire
/// (`SZT` = pieces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitOfMeasure {
    /// Pieces (sztuki).
    #[default]
    SZT,
    /// Square meters.
    M2,
    /// Cubic meters.
    M3,
    /// Metric tonnes.
    T,
    /// Kilograms.
    KG,
}

impl UnitOfMeasure {
    /// Wire representation of the unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SZT => "SZT",
            Self::M2 => "M2",
            Self::M3 => "M3",
            Self::T => "T",
            Self::KG => "KG",
        }
    }
}

impl core::fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
