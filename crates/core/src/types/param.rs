//! Parameter code and type.
//!
//! Parameter codes come from an external parameter catalog. The store keys
//! parameter rows by the uppercase form of the code, so [`ParamCode`]
//! normalizes on construction and equality is on the normalized form.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ParamCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum ParamCodeError {
    /// The input string is empty or whitespace only.
    #[error("parameter code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("parameter code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// An uppercase parameter catalog code (e.g. `GATUNEK`, `WILGOTNOSC`).
///
/// ## Constraints
///
/// - Non-empty after trimming
/// - At most 20 characters
/// - Stored and compared uppercase; input of any case is accepted
///
/// ## Examples
///
/// ```
/// use offerdesk_core::ParamCode;
///
/// let code = ParamCode::parse("gatunek").unwrap();
/// assert_eq!(code.as_str(), "GATUNEK");
/// assert_eq!(code, ParamCode::parse("Gatunek").unwrap());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ParamCode(String);

impl ParamCode {
    /// Maximum length of a parameter code in the catalog.
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `ParamCode` from a string, normalizing to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty (after trimming) or longer
    /// than [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, ParamCodeError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParamCodeError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ParamCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the normalized code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ParamCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ParamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Value type of a parameter, determined by its catalog definition.
///
/// The type drives input behavior on the form (numeric, free text,
/// boolean select) and how `defaultValue` strings are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Numeric value, stored as its decimal string form.
    Decimal,
    /// Free text value.
    #[default]
    Text,
    /// Boolean value, stored as `"true"` / `"false"`.
    Boolean,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_uppercases_and_trims() {
        let code = ParamCode::parse("  gatunek ").unwrap();
        assert_eq!(code.as_str(), "GATUNEK");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(matches!(ParamCode::parse(""), Err(ParamCodeError::Empty)));
        assert!(matches!(ParamCode::parse("   "), Err(ParamCodeError::Empty)));
    }

    #[test]
    fn parse_rejects_overlong() {
        let long = "X".repeat(ParamCode::MAX_LENGTH + 1);
        assert!(matches!(
            ParamCode::parse(&long),
            Err(ParamCodeError::TooLong { .. })
        ));
    }

    #[test]
    fn equality_is_case_insensitive_via_normalization() {
        assert_eq!(
            ParamCode::parse("Wilgotnosc").unwrap(),
            ParamCode::parse("WILGOTNOSC").unwrap()
        );
    }

    #[test]
    fn param_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ParamType::Boolean).unwrap(),
            "\"boolean\""
        );
    }
}
