//! Mapping traversal
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use super::{collect_rules, AndRule, Rule, RuleRef};
use crate::code;
use crate::validation::ErrorDetail;
use crate::validator::Validator;
use crate::value::{MapValue, Reflect, ShapeKind, Value};

fn as_map<'v>(validator: &Validator, value: &'v Value) -> Option<&'v MapValue> {
    match value.shape() {
        ShapeKind::Mapping(map) => Some(map),
        _ => {
            validator.add_error(ErrorDetail::new(code::NOT_MAP, value));
            None
        }
    }
}

struct KeyRule {
    key: Value,
    rules: AndRule,
}

impl Rule for KeyRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let Some(map) = as_map(validator, value) else {
            return;
        };
        if !map.accepts_key(&self.key) {
            validator.add_error(
                ErrorDetail::new(code::NOT_ASSIGNABLE, value).with_param(map.key_kind().as_str()),
            );
            return;
        }
        match map.get(&self.key) {
            Some(entry) => validator.dive_map_value(self.key.clone(), |v| self.rules.validate(v, entry)),
            None => validator.add_error(ErrorDetail::new(code::NO_KEY, value).with_param(self.key.clone())),
        }
    }
}

/// Apply the rules to the value stored under `key`, at that key's value
/// location. A missing key records `no_key`.
///
/// # Panics
///
/// Panics if `key` reflects to `Null`.
pub fn key<K, I, R>(key: K, rules: I) -> RuleRef
where
    K: Reflect,
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    let key = key.reflect();
    if key.is_nil() {
        panic!("key is an invalid value");
    }
    Arc::new(KeyRule {
        key,
        rules: AndRule::new(collect_rules(rules)),
    })
}

struct EachKeysRule {
    rules: AndRule,
}

impl Rule for EachKeysRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let Some(map) = as_map(validator, value) else {
            return;
        };
        for key in map.keys() {
            validator.dive_map_key(key.clone(), |v| self.rules.validate(v, key));
        }
    }
}

/// Apply the rules to every key of a mapping, at the key's location
pub fn each_keys<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(EachKeysRule {
        rules: AndRule::new(collect_rules(rules)),
    })
}

struct EachValuesRule {
    rules: AndRule,
}

impl Rule for EachValuesRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let Some(map) = as_map(validator, value) else {
            return;
        };
        for (key, entry) in map.entries() {
            validator.dive_map_value(key.clone(), |v| self.rules.validate(v, entry));
        }
    }
}

/// Apply the rules to every value of a mapping, at the value's location
pub fn each_values<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(EachValuesRule {
        rules: AndRule::new(collect_rules(rules)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::testing::{bare_validator, entries, one_of, required, validation_error};
    use crate::value::Kind;
    use std::collections::BTreeMap;

    fn sample() -> BTreeMap<&'static str, &'static str> {
        [("a", "A"), ("b", ""), ("x", "X")].into_iter().collect()
    }

    #[test]
    fn test_key_uses_value_location() {
        let v = bare_validator();
        let result = v.validate(&sample(), [key("x", [one_of(vec!["B".into()])])]);
        assert_eq!(entries(result), vec![("inclusion".into(), "[x]".into())]);
    }

    #[test]
    fn test_key_missing() {
        let v = bare_validator();
        let err = validation_error(v.validate(&sample(), [key("z", [required()])]));
        assert_eq!(err.to_string(), "(no_key) requires the value at the key (z)");
    }

    #[test]
    fn test_key_of_wrong_kind() {
        let v = bare_validator();
        let err = validation_error(v.validate(&sample(), [key(1, [required()])]));
        assert_eq!(err.to_string(), "(not_assignable) can't assign to string");

        let any_keys = MapValue::new(Kind::Any).with_entry(1, 0);
        let result = v.validate_value(&Value::Map(any_keys), [key(1, [required()])]);
        assert_eq!(entries(result), vec![("required".into(), "[1]".into())]);
    }

    #[test]
    #[should_panic(expected = "key is an invalid value")]
    fn test_null_key_panics() {
        key(Option::<i32>::None, [required()]);
    }

    #[test]
    fn test_each_keys_and_values() {
        let v = bare_validator();
        let keys = v.validate(&sample(), [each_keys([one_of(vec!["a".into(), "b".into()])])]);
        assert_eq!(entries(keys), vec![("inclusion".into(), "[key: x]".into())]);

        let values = v.validate(&sample(), [each_values([required()])]);
        assert_eq!(entries(values), vec![("required".into(), "[b]".into())]);
    }

    #[test]
    fn test_map_rules_on_non_map() {
        let v = bare_validator();
        for rule in [key("a", [required()]), each_keys([required()]), each_values([required()])] {
            let result = v.validate(&vec![1], [rule]);
            assert_eq!(entries(result), vec![("not_map".into(), "".into())]);
        }
    }
}
