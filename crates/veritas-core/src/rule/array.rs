//! Sequence traversal
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use super::{collect_rules, AndRule, Rule, RuleRef};
use crate::code;
use crate::validation::ErrorDetail;
use crate::validator::Validator;
use crate::value::{ShapeKind, Value};

struct EachRule {
    rules: AndRule,
}

impl Rule for EachRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let ShapeKind::Sequence(items) = value.shape() else {
            validator.add_error(ErrorDetail::new(code::NOT_ARRAY, value));
            return;
        };
        for (i, item) in items.iter().enumerate() {
            validator.dive_index(i, |v| self.rules.validate(v, item));
        }
    }
}

/// Apply the rules to every element of a sequence at its index location
pub fn each<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(EachRule {
        rules: AndRule::new(collect_rules(rules)),
    })
}

struct IndexRule {
    index: usize,
    rules: AndRule,
    optional: bool,
}

impl Rule for IndexRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let ShapeKind::Sequence(items) = value.shape() else {
            validator.add_error(ErrorDetail::new(code::NOT_ARRAY, value));
            return;
        };
        match items.get(self.index) {
            Some(item) => validator.dive_index(self.index, |v| self.rules.validate(v, item)),
            None if self.optional => {}
            None => validator.add_error(
                ErrorDetail::new(code::OUT_OF_RANGE, value)
                    .with_param(self.index)
                    .with_param(items.len()),
            ),
        }
    }
}

/// Apply the rules to the element at `index`; a shorter sequence records
/// `out_of_range`
pub fn index<I, R>(index: usize, rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(IndexRule {
        index,
        rules: AndRule::new(collect_rules(rules)),
        optional: false,
    })
}

/// Like [`index`], but a missing element is not a failure
pub fn index_if_exist<I, R>(index: usize, rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(IndexRule {
        index,
        rules: AndRule::new(collect_rules(rules)),
        optional: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::testing::{bare_validator, entries, required, validation_error};

    #[test]
    fn test_each_visits_every_index() {
        let v = bare_validator();
        let result = v.validate(&vec!["a", "", "b", ""], [each([required()])]);
        assert_eq!(
            entries(result),
            vec![("required".into(), "[1]".into()), ("required".into(), "[3]".into())]
        );
    }

    #[test]
    fn test_each_on_non_sequence() {
        let v = bare_validator();
        let result = v.validate(&"abc", [each([required()])]);
        assert_eq!(entries(result), vec![("not_array".into(), "".into())]);
    }

    #[test]
    fn test_each_through_optional() {
        let v = bare_validator();
        let items = Some(vec![0, 1]);
        let result = v.validate(&items, [each([required()])]);
        assert_eq!(entries(result), vec![("required".into(), "[0]".into())]);
    }

    #[test]
    fn test_index_out_of_range() {
        let v = bare_validator();
        let err = validation_error(v.validate(&vec![1, 2], [index(5, [required()])]));
        let detail = err.details()[0].detail();
        assert_eq!(detail.code(), "out_of_range");
        assert_eq!(detail.params(), &[Value::from(5usize), Value::from(2usize)]);
        assert_eq!(err.to_string(), "(out_of_range) requires more than 5 elements");
    }

    #[test]
    fn test_index_applies_rules_at_index() {
        let v = bare_validator();
        let result = v.validate(&vec![1, 0], [index(1, [required()])]);
        assert_eq!(entries(result), vec![("required".into(), "[1]".into())]);
    }

    #[test]
    fn test_index_if_exist_tolerates_missing() {
        let v = bare_validator();
        assert!(v.validate(&Vec::<i32>::new(), [index_if_exist(0, [required()])]).is_ok());
        let result = v.validate(&1, [index_if_exist(0, [required()])]);
        assert_eq!(entries(result), vec![("not_array".into(), "".into())]);
    }
}
