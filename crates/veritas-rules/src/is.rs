//! Leaf predicates
//!
//! Every rule in this module inspects the value at the current location and
//! records at most a couple of errors there. Apart from the zero-ness checks
//! ([`required`], [`non_zero`], [`zero`], [`nil_or_non_zero`]) and [`never`],
//! an absent value (`Null` once pointer layers are peeled) is accepted: pair
//! them with [`required`] when the value must be present.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::cmp::Ordering;
use std::sync::Arc;

use regex::Regex;
use url::Url;
use veritas_core::{code, ErrorDetail, Rule, RuleRef, Validator, Value};

struct RequiredRule;

impl Rule for RequiredRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        if value.is_zero() {
            validator.add_error(ErrorDetail::new(code::REQUIRED, value));
        }
    }
}

/// The value must not be the zero value of its kind.
///
/// A present pointer layer counts as non-zero, so `Some(0)` passes while
/// `None` and `0` fail.
pub fn required() -> RuleRef {
    Arc::new(RequiredRule)
}

struct NonZeroRule;

impl Rule for NonZeroRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        if value.indirect().is_zero() {
            validator.add_error(ErrorDetail::new(code::NON_ZERO, value));
        }
    }
}

/// The value, looking through pointer layers, must not be zero.
///
/// Unlike [`required`], `Some(0)` fails.
pub fn non_zero() -> RuleRef {
    Arc::new(NonZeroRule)
}

struct ZeroRule;

impl Rule for ZeroRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        if !value.is_zero() {
            validator.add_error(ErrorDetail::new(code::ZERO_ONLY, value));
        }
    }
}

/// The value must be absent or the zero value of its kind
pub fn zero() -> RuleRef {
    Arc::new(ZeroRule)
}

struct NilOrNonZeroRule;

impl Rule for NilOrNonZeroRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let valid = match value.unwrap_capability() {
            Value::Null => true,
            Value::Ref(inner) => !inner.is_zero(),
            other => !other.is_zero(),
        };
        if !valid {
            validator.add_error(ErrorDetail::new(code::NIL_OR_NON_ZERO, value));
        }
    }
}

/// An absent value passes; a present one must not be zero
pub fn nil_or_non_zero() -> RuleRef {
    Arc::new(NilOrNonZeroRule)
}

struct AnyRule;

impl Rule for AnyRule {
    fn validate(&self, _validator: &Validator, _value: &Value) {}
}

/// Accepts every value
pub fn any() -> RuleRef {
    Arc::new(AnyRule)
}

struct NeverRule;

impl Rule for NeverRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        validator.add_error(ErrorDetail::new(code::INVALID, value));
    }
}

/// Rejects every value with `invalid`
pub fn never() -> RuleRef {
    Arc::new(NeverRule)
}

struct InclusionRule {
    values: Vec<Value>,
}

impl Rule for InclusionRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let target = value.indirect();
        if target.is_nil() {
            return;
        }
        let included = self.values.iter().any(|candidate| {
            if candidate.is_ref() {
                candidate == value.unwrap_capability()
            } else {
                candidate == target
            }
        });
        if !included {
            validator.add_error(ErrorDetail::new(code::INCLUSION, value).with_param(Value::Seq(self.values.clone())));
        }
    }
}

/// The value must equal one of `values`.
///
/// Candidates without a pointer layer are compared with the pointed-to
/// value, so `in_(["a", "b"])` accepts `Some("a")`.
pub fn in_<I, T>(values: I) -> RuleRef
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    in_values(values.into_iter().map(Into::into).collect())
}

/// [`in_`] over already reflected values
pub fn in_values(values: Vec<Value>) -> RuleRef {
    Arc::new(InclusionRule { values })
}

struct LengthRule {
    min: usize,
    max: usize,
}

impl Rule for LengthRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let length = match value.indirect() {
            Value::Null => return,
            Value::String(s) => s.chars().count(),
            _ => {
                validator.add_error(ErrorDetail::new(code::NOT_STRING, value));
                return;
            }
        };
        if length < self.min {
            validator.add_error(ErrorDetail::new(code::TOO_SHORT_LENGTH, value).with_param(self.min));
        }
        if length > self.max {
            validator.add_error(ErrorDetail::new(code::TOO_LONG_LENGTH, value).with_param(self.max));
        }
    }
}

/// The value must be a string of `min..=max` characters.
///
/// Characters are Unicode scalar values, not bytes. Other kinds record
/// `not_string`.
pub fn length_between(min: usize, max: usize) -> RuleRef {
    Arc::new(LengthRule { min, max })
}

struct LenRule {
    min: usize,
    max: usize,
}

impl Rule for LenRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let target = value.indirect();
        if target.is_nil() {
            return;
        }
        let Some(len) = target.len() else {
            validator.add_error(ErrorDetail::new(code::NOT_ITERABLE, value));
            return;
        };
        if len < self.min {
            validator.add_error(ErrorDetail::new(code::TOO_SHORT_LEN, value).with_param(self.min));
        }
        if len > self.max {
            validator.add_error(ErrorDetail::new(code::TOO_LONG_LEN, value).with_param(self.max));
        }
    }
}

/// The value must be a string, sequence or mapping with `min..=max`
/// elements. A string counts bytes.
pub fn len_between(min: usize, max: usize) -> RuleRef {
    Arc::new(LenRule { min, max })
}

#[derive(Debug, Clone)]
struct Bound {
    threshold: Value,
    exclusive: bool,
}

struct RangeRule {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl Rule for RangeRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let target = value.indirect();
        if target.is_nil() {
            return;
        }
        if !target.is_numeric() {
            validator.add_error(ErrorDetail::new(code::NOT_NUMERIC, value));
            return;
        }

        if let Some(lower) = &self.lower {
            let ordering = target.compare_numeric(&lower.threshold);
            let violated = match ordering {
                Some(Ordering::Less) => true,
                Some(Ordering::Equal) => lower.exclusive,
                Some(Ordering::Greater) => false,
                None => true,
            };
            if violated {
                let code = if lower.exclusive { code::GREATER_THAN } else { code::GREATER_THAN_OR_EQUAL };
                validator.add_error(ErrorDetail::new(code, value).with_param(lower.threshold.clone()));
            }
        }

        if let Some(upper) = &self.upper {
            let ordering = target.compare_numeric(&upper.threshold);
            let violated = match ordering {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => upper.exclusive,
                Some(Ordering::Less) => false,
                None => true,
            };
            if violated {
                let code = if upper.exclusive { code::LESS_THAN } else { code::LESS_THAN_OR_EQUAL };
                validator.add_error(ErrorDetail::new(code, value).with_param(upper.threshold.clone()));
            }
        }
    }
}

fn numeric_threshold(threshold: impl Into<Value>) -> Value {
    let threshold = threshold.into();
    if !threshold.is_numeric() {
        panic!("threshold must be a numeric value, got {}", threshold.kind());
    }
    threshold.indirect().clone()
}

fn range_rule(lower: Option<Bound>, upper: Option<Bound>) -> RuleRef {
    Arc::new(RangeRule { lower, upper })
}

/// The value must be a number `>= min`
///
/// # Panics
///
/// Panics if `min` is not numeric.
pub fn min(min: impl Into<Value>) -> RuleRef {
    range_rule(
        Some(Bound {
            threshold: numeric_threshold(min),
            exclusive: false,
        }),
        None,
    )
}

/// The value must be a number `<= max`
///
/// # Panics
///
/// Panics if `max` is not numeric.
pub fn max(max: impl Into<Value>) -> RuleRef {
    range_rule(
        None,
        Some(Bound {
            threshold: numeric_threshold(max),
            exclusive: false,
        }),
    )
}

/// The value must be a number within `min..=max`. Both bounds are checked,
/// so an inverted range can record two errors.
///
/// # Panics
///
/// Panics if either bound is not numeric.
pub fn range(min: impl Into<Value>, max: impl Into<Value>) -> RuleRef {
    range_rule(
        Some(Bound {
            threshold: numeric_threshold(min),
            exclusive: false,
        }),
        Some(Bound {
            threshold: numeric_threshold(max),
            exclusive: false,
        }),
    )
}

/// The value must be a number `> num`
///
/// # Panics
///
/// Panics if `num` is not numeric.
pub fn greater_than(num: impl Into<Value>) -> RuleRef {
    range_rule(
        Some(Bound {
            threshold: numeric_threshold(num),
            exclusive: true,
        }),
        None,
    )
}

/// The value must be a number `< num`
///
/// # Panics
///
/// Panics if `num` is not numeric.
pub fn less_than(num: impl Into<Value>) -> RuleRef {
    range_rule(
        None,
        Some(Bound {
            threshold: numeric_threshold(num),
            exclusive: true,
        }),
    )
}

/// Same as [`min`]
pub fn greater_than_or_equal_to(num: impl Into<Value>) -> RuleRef {
    min(num)
}

/// Same as [`max`]
pub fn less_than_or_equal_to(num: impl Into<Value>) -> RuleRef {
    max(num)
}

struct MatchRule {
    regex: Regex,
}

impl Rule for MatchRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        match value.indirect() {
            Value::Null => {}
            Value::String(s) => {
                if !self.regex.is_match(s) {
                    validator.add_error(
                        ErrorDetail::new(code::REGEXP_MISMATCH, value).with_param(self.regex.as_str()),
                    );
                }
            }
            _ => validator.add_error(ErrorDetail::new(code::NOT_STRING, value)),
        }
    }
}

/// The value must be a string matching `regex`
pub fn match_regex(regex: Regex) -> RuleRef {
    Arc::new(MatchRule { regex })
}

/// The value must be a string matching `pattern`
///
/// # Panics
///
/// Panics if `pattern` is not a valid regular expression. Use
/// [`match_regex`] to handle compilation errors yourself.
pub fn match_string(pattern: &str) -> RuleRef {
    match Regex::new(pattern) {
        Ok(regex) => match_regex(regex),
        Err(err) => panic!("invalid regular expression {pattern:?}: {err}"),
    }
}

struct UrlRule {
    schemes: Vec<String>,
}

impl Rule for UrlRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let text = match value.indirect() {
            Value::Null => return,
            Value::String(s) => s,
            _ => {
                validator.add_error(ErrorDetail::new(code::NOT_STRING, value));
                return;
            }
        };
        match Url::parse(text) {
            Err(err) => validator.add_error(
                ErrorDetail::new(code::INVALID_URL_FORMAT, value)
                    .with_param(err.to_string())
                    .with_cause(err),
            ),
            Ok(url) => {
                if !self.schemes.is_empty() && !self.schemes.iter().any(|scheme| scheme == url.scheme()) {
                    let schemes = self.schemes.iter().map(|s| Value::from(s.as_str())).collect();
                    validator.add_error(ErrorDetail::new(code::INVALID_SCHEME, value).with_param(Value::Seq(schemes)));
                }
            }
        }
    }
}

/// The value must be an absolute URL. When `schemes` is not empty the URL
/// scheme must be one of them.
pub fn url<I, S>(schemes: I) -> RuleRef
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(UrlRule {
        schemes: schemes.into_iter().map(Into::into).collect(),
    })
}
