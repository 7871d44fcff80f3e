//! Status enums for offer lines.

use serde::{Deserialize, Serialize};

/// Offer line lifecycle status.
///
/// Lines are created as drafts, published to the exchange dashboard, and
/// either accepted into a contract or rejected. A status change is one of
/// the triggers for regenerating the line's transport blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    #[default]
    Draft,
    Published,
    Accepted,
    Rejected,
    Closed,
}

/// What kind of row an offer line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    /// A commercial line referencing an item; carries quantity and price.
    #[default]
    Item,
    /// A free-text line; derived monetary fields stay pinned.
    Description,
}

/// Fulfillment priority of a purchase line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(into = "u8", try_from = "u8")]
pub enum PurchasePriority {
    #[default]
    Normal,
    High,
    Urgent,
}

impl From<PurchasePriority> for u8 {
    fn from(priority: PurchasePriority) -> Self {
        match priority {
            PurchasePriority::Normal => 0,
            PurchasePriority::High => 1,
            PurchasePriority::Urgent => 2,
        }
    }
}

impl TryFrom<u8> for PurchasePriority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::High),
            2 => Ok(Self::Urgent),
            other => Err(format!("invalid purchase priority: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LineStatus::Published).unwrap(),
            "\"published\""
        );
    }

    #[test]
    fn priority_round_trips_through_integers() {
        let json = serde_json::to_string(&PurchasePriority::Urgent).unwrap();
        assert_eq!(json, "2");
        let back: PurchasePriority = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PurchasePriority::Urgent);
    }

    #[test]
    fn priority_rejects_out_of_range_values() {
        let result: Result<PurchasePriority, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }
}
