//! Serializable failure report
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Every failure of a validation, ready to be sent over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub errors: Vec<ReportEntry>,
}

/// One failure with its location already resolved to a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub location: String,
    pub code: String,
    pub value: JsonValue,
    pub params: Vec<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_before_conversion: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// Reports of the alternatives of a failed `or`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<ErrorReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let report = ErrorReport {
            errors: vec![ReportEntry {
                location: ".Name".into(),
                code: "required".into(),
                value: json!(""),
                params: vec![],
                value_before_conversion: None,
                cause: None,
                branches: vec![],
            }],
        };
        let encoded = serde_json::to_value(&report).unwrap();
        assert_eq!(
            encoded,
            json!({"errors": [{"location": ".Name", "code": "required", "value": "", "params": []}]})
        );
        let decoded: ErrorReport = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, report);
    }
}
