//! A single rule failure
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use super::{ReportEntry, ValidationError};
use crate::error::BoxError;
use crate::value::Value;

/// What a rule reports when the value it checked is invalid
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    code: Cow<'static, str>,
    value: Value,
    unconverted_value: Option<Value>,
    params: Vec<Value>,
    cause: Option<Arc<dyn StdError + Send + Sync>>,
    branches: Vec<ValidationError>,
}

impl ErrorDetail {
    /// Create a detail for `code` about the rejected `value`
    pub fn new(code: impl Into<Cow<'static, str>>, value: &Value) -> Self {
        Self {
            code: code.into(),
            value: value.clone(),
            unconverted_value: None,
            params: Vec::new(),
            cause: None,
            branches: Vec::new(),
        }
    }

    /// A `custom` failure carrying `cause`, rendered as the cause's message
    pub fn custom(code: impl Into<Cow<'static, str>>, value: &Value, cause: impl Into<BoxError>) -> Self {
        let cause: BoxError = cause.into();
        Self::new(code, value)
            .with_param(cause.to_string())
            .with_cause(cause)
    }

    /// Append a translation parameter
    pub fn with_param(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn with_params(mut self, params: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(Arc::from(cause.into()));
        self
    }

    /// Attach the errors of alternatives that all failed
    pub fn with_branches(mut self, branches: Vec<ValidationError>) -> Self {
        self.branches = branches;
        self
    }

    /// Shallow copy recording the value seen before a conversion
    pub(crate) fn with_unconverted_value(&self, value: Value) -> Self {
        let mut detail = self.clone();
        detail.unconverted_value = Some(value);
        detail
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// The value the failing rule received
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The value before any enclosing conversion; the received value otherwise
    pub fn value_before_conversion(&self) -> &Value {
        self.unconverted_value.as_ref().unwrap_or(&self.value)
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn branches(&self) -> &[ValidationError] {
        &self.branches
    }

    pub(crate) fn report_entry(&self, location: String) -> ReportEntry {
        ReportEntry {
            location,
            code: self.code.to_string(),
            value: self.value.to_json(),
            params: self.params.iter().map(Value::to_json).collect(),
            value_before_conversion: self.unconverted_value.as_ref().map(Value::to_json),
            cause: self.cause.as_ref().map(|cause| cause.to_string()),
            branches: self.branches.iter().map(ValidationError::report).collect(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code;
    use serde_json::json;

    #[test]
    fn test_value_before_conversion_defaults_to_value() {
        let detail = ErrorDetail::new(code::GREATER_THAN_OR_EQUAL, &Value::from(1)).with_param(2);
        assert_eq!(detail.value_before_conversion(), &Value::from(1));

        let converted = detail.with_unconverted_value(Value::from("1"));
        assert_eq!(converted.value(), &Value::from(1));
        assert_eq!(converted.value_before_conversion(), &Value::from("1"));
        assert_eq!(converted.params(), &[Value::from(2)]);
        assert_eq!(detail.value_before_conversion(), &Value::from(1));
    }

    #[test]
    fn test_custom_keeps_cause() {
        let detail = ErrorDetail::custom(code::CUSTOM, &Value::Null, "boom");
        assert_eq!(detail.code(), "custom");
        assert_eq!(detail.params(), &[Value::from("boom")]);
        assert_eq!(detail.cause().map(|c| c.to_string()), Some("boom".to_string()));
    }

    #[test]
    fn test_report_entry() {
        let detail = ErrorDetail::new(code::INCLUSION, &Value::from("x"))
            .with_param(Value::Seq(vec!["a".into(), "b".into()]));
        let entry = detail.report_entry("[0]".into());
        assert_eq!(entry.code, "inclusion");
        assert_eq!(entry.value, json!("x"));
        assert_eq!(entry.params, vec![json!(["a", "b"])]);
        assert_eq!(entry.value_before_conversion, None);
    }
}
