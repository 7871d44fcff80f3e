//! Newtype IDs for type-safe entity references.
//!
//! Two macros cover the two kinds of keys the document store uses:
//! `define_code!` for string business codes (document, item, vendor,
//! location, user) and `define_seq!` for store-assigned sequence numbers
//! (line, block). Both prevent accidentally mixing keys from different
//! entity types.

use serde::{Deserialize, Serialize};

/// Macro to define a type-safe string code wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>` and `From<String>` implementations
///
/// # Example
///
/// ```rust
/// # use offerdesk_core::define_code;
/// define_code!(DocumentNo);
/// define_code!(ItemNo);
///
/// let doc = DocumentNo::new("ZO/2024/0001");
/// let item = ItemNo::new("DESKA-25");
///
/// // These are different types, so this won't compile:
/// // let _: DocumentNo = item;
/// ```
#[macro_export]
macro_rules! define_code {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new code from a string value.
            #[must_use]
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// Get the code as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// Whether the code is the empty string.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }
    };
}

/// Macro to define a type-safe sequence-number wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, ordering
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
#[macro_export]
macro_rules! define_seq {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new sequence number from an i32 value.
            #[must_use]
            pub const fn new(no: i32) -> Self {
                Self(no)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(no: i32) -> Self {
                Self(no)
            }
        }

        impl From<$name> for i32 {
            fn from(no: $name) -> Self {
                no.0
            }
        }
    };
}

define_code!(DocumentNo);
define_code!(ItemNo);
define_code!(VendorNo);
define_code!(LocationNo);
define_code!(UserCode);

define_seq!(LineNo);
define_seq!(BlockNo);

/// The natural key of an offer line within the document store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Parent offer document number.
    pub document_no: DocumentNo,
    /// Line number within the document, assigned by the store on create.
    pub line_no: LineNo,
}

impl LineKey {
    /// Create a new line key.
    #[must_use]
    pub fn new(document_no: impl Into<DocumentNo>, line_no: impl Into<LineNo>) -> Self {
        Self {
            document_no: document_no.into(),
            line_no: line_no.into(),
        }
    }
}

impl core::fmt::Display for LineKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.document_no, self.line_no)
    }
}
