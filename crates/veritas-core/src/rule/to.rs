//! Validation of a converted value
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use super::{collect_rules, AndRule, Rule, RuleRef};
use crate::code;
use crate::error::BoxError;
use crate::validation::{ConversionErrorCollector, ErrorCollector, ErrorDetail};
use crate::validator::{CloneOptions, Validator};
use crate::value::Value;

/// Conversion applied by [`to`] before its rules run
pub type ConvertFn = Arc<dyn Fn(&Value) -> Result<Value, BoxError> + Send + Sync>;

struct ToRule {
    convert: ConvertFn,
    rules: AndRule,
}

impl Rule for ToRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let converted = match (self.convert)(value) {
            Ok(converted) => converted,
            Err(err) => {
                validator.add_error(ErrorDetail::custom(code::CONVERSION_FAILED, value, err));
                return;
            }
        };

        let collector: Arc<dyn ErrorCollector> = Arc::new(ConversionErrorCollector::new(
            validator.error_collector().clone(),
            validator.location().clone(),
            value.clone(),
        ));
        let scoped = validator.clone_with(CloneOptions::new().keep_location().with_error_collector(collector));
        self.rules.validate(&scoped, &converted);
    }
}

/// Convert the value, then apply the rules to the result at the same
/// location.
///
/// A failed conversion records `conversion` with the error as parameter and
/// cause. Failures the rules record at this location remember the original
/// value, see [`ErrorDetail::value_before_conversion`].
pub fn to<F, E, I, R>(convert: F, rules: I) -> RuleRef
where
    F: Fn(&Value) -> Result<Value, E> + Send + Sync + 'static,
    E: Into<BoxError>,
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(ToRule {
        convert: Arc::new(move |value: &Value| convert(value).map_err(Into::into)),
        rules: AndRule::new(collect_rules(rules)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use crate::rule::testing::{bare_validator, entries, required, validation_error};
    use crate::rule::{each, rule_fn};
    use crate::value::Kind;

    fn to_int(value: &Value) -> Result<Value, ConversionError> {
        match value.indirect() {
            Value::Int(n) => Ok(Value::Int(*n)),
            Value::String(s) => s.parse::<i64>().map(Value::Int).map_err(|e| ConversionError::Parse {
                value: s.clone(),
                to: Kind::Int,
                reason: e.to_string(),
            }),
            other => Err(ConversionError::Unsupported {
                from: other.kind(),
                to: Kind::Int,
            }),
        }
    }

    fn at_least_two() -> RuleRef {
        rule_fn(|v: &Validator, value: &Value| {
            if value.compare_numeric(&Value::Int(2)) == Some(std::cmp::Ordering::Less) {
                v.add_error(ErrorDetail::new(code::GREATER_THAN_OR_EQUAL, value).with_param(2));
            }
        })
    }

    #[test]
    fn test_converted_values_are_validated() {
        let values = Value::Seq(vec![0.into(), 1.into(), 2.into(), 3.into(), "1".into(), "2".into(), "3".into()]);
        let result = bare_validator().validate_value(&values, [each([to(to_int, [at_least_two()])])]);
        let locations: Vec<String> = entries(result).into_iter().map(|(_, loc)| loc).collect();
        assert_eq!(locations, vec!["[0]", "[1]", "[4]"]);
    }

    #[test]
    fn test_value_before_conversion() {
        let err = validation_error(bare_validator().validate(&"1", [to(to_int, [at_least_two()])]));
        let detail = err.details()[0].detail();
        assert_eq!(detail.value(), &Value::Int(1));
        assert_eq!(detail.value_before_conversion(), &Value::from("1"));
    }

    #[test]
    fn test_failed_conversion() {
        let err = validation_error(bare_validator().validate(&"abc", [to(to_int, [required()])]));
        let detail = err.details()[0].detail();
        assert_eq!(detail.code(), "conversion");
        assert!(detail.cause().is_some());
        assert_eq!(
            err.to_string(),
            "(conversion) can not convert \"abc\" to int: invalid digit found in string"
        );
    }

    #[test]
    fn test_nested_locations_keep_converted_value() {
        let split = |value: &Value| -> Result<Value, ConversionError> {
            let text = value.as_str().unwrap_or_default();
            Ok(Value::Seq(text.split(',').map(Value::from).collect()))
        };
        let err = validation_error(bare_validator().validate(&"a,,b", [to(split, [each([required()])])]));
        let detail = err.details()[0].detail();
        assert_eq!(err.location_name(err.details()[0].location()), "[1]");
        assert_eq!(detail.value_before_conversion(), &Value::from(""));
    }
}
