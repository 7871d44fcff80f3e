//! Per-line parameter row.

use serde::{Deserialize, Serialize};

use offerdesk_core::{DocumentNo, LineNo, ParamCode};

/// A persisted `(documentNo, documentLineNo, paramCode) -> paramValue`
/// tuple in the external parameter store.
///
/// One row exists per non-empty parameter slot on a line; the sync service
/// owns the full lifecycle (create on first value, update on change, delete
/// when the slot empties or drops out of the line's slot set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineParameter {
    /// Store-assigned surrogate key; `None` before create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub document_no: DocumentNo,
    pub document_line_no: LineNo,
    /// Always stored uppercase-normalized.
    pub param_code: ParamCode,
    /// May legitimately be empty; an empty value is still a stored row as
    /// long as the slot keeps its code.
    #[serde(default)]
    pub param_value: String,
}

impl LineParameter {
    /// Build an unsaved row for a line and normalized code.
    #[must_use]
    pub fn new(
        document_no: DocumentNo,
        document_line_no: LineNo,
        param_code: ParamCode,
        param_value: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            document_no,
            document_line_no,
            param_code,
            param_value: param_value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_the_natural_key_camel_case() {
        let row = LineParameter::new(
            DocumentNo::new("ZO/2024/0001"),
            LineNo::new(10_000),
            ParamCode::parse("gatunek").unwrap(),
            "C24",
        );

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["documentNo"], "ZO/2024/0001");
        assert_eq!(json["documentLineNo"], 10_000);
        assert_eq!(json["paramCode"], "GATUNEK");
        assert_eq!(json["paramValue"], "C24");
    }
}
