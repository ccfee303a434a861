//! Rules driven by struct tags
//!
//! A [`TagHandler`] turns the raw value of one tag key into rules. Parsing
//! happens once per distinct raw value: outcomes, failures included, are cached
//! for the lifetime of the rule and shared by every thread using it.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{Rule, RuleRef};
use crate::code;
use crate::error::TagError;
use crate::location::LocationKind;
use crate::validation::ErrorDetail;
use crate::validator::Validator;
use crate::value::{ShapeKind, Value};

/// Parses a raw tag value into rules
pub trait TagHandler: Send + Sync {
    fn parse_tag_value(&self, tag_value: &str) -> Result<Vec<RuleRef>, TagError>;
}

impl<F> TagHandler for F
where
    F: Fn(&str) -> Result<Vec<RuleRef>, TagError> + Send + Sync,
{
    fn parse_tag_value(&self, tag_value: &str) -> Result<Vec<RuleRef>, TagError> {
        self(tag_value)
    }
}

type Parsed = Result<Arc<[RuleRef]>, TagError>;

struct TagCache {
    key: String,
    handler: Box<dyn TagHandler>,
    entries: RwLock<HashMap<String, Parsed>>,
}

impl TagCache {
    fn new(key: String, handler: Box<dyn TagHandler>) -> Self {
        Self {
            key,
            handler,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn resolve(&self, tag_value: &str) -> Parsed {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(parsed) = entries.get(tag_value) {
                return parsed.clone();
            }
        }

        log::debug!("parsing `{}` tag value {:?}", self.key, tag_value);
        let parsed: Parsed = self.handler.parse_tag_value(tag_value).map(Arc::from);
        if let Err(err) = &parsed {
            log::debug!("invalid `{}` tag value {:?}: {}", self.key, tag_value, err);
        }

        // Another thread may have raced us; keep whichever outcome landed first
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(tag_value.to_owned()).or_insert(parsed).clone()
    }

    /// Apply the rules for `tag_value`, or record why it could not be parsed
    fn apply(&self, validator: &Validator, value: &Value, tag_value: &str) {
        match self.resolve(tag_value) {
            Ok(rules) => {
                for rule in rules.iter() {
                    rule.validate(validator, value);
                }
            }
            Err(err) => validator.add_error(
                ErrorDetail::new(code::INVALID_TAG, value)
                    .with_param(tag_value)
                    .with_param(err.to_string())
                    .with_cause(err),
            ),
        }
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Applies tag-derived rules to every tagged field of a struct
pub struct TagRule {
    cache: TagCache,
}

impl TagRule {
    /// Number of distinct raw tag values parsed so far
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl Rule for TagRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let ShapeKind::Struct(s) = value.shape() else {
            return;
        };
        for field in s.fields() {
            let info = field.info();
            let tag_value = info.tag().get(&self.cache.key);
            if !info.is_exported() || tag_value.is_empty() {
                continue;
            }
            let field_validator = validator.with_field(info.clone());
            self.cache.apply(&field_validator, field.value(), tag_value);
        }
    }
}

/// Walk the fields of a struct and apply the rules parsed from each field's
/// `key` tag at that field's location. Values that are not structs are
/// ignored.
pub fn tag_rule(key: impl Into<String>, handler: impl TagHandler + 'static) -> RuleRef {
    Arc::new(TagRule {
        cache: TagCache::new(key.into(), Box::new(handler)),
    })
}

/// Applies tag-derived rules to the struct field currently being visited
pub struct FieldTagRule {
    cache: TagCache,
}

impl FieldTagRule {
    pub fn new(key: impl Into<String>, handler: impl TagHandler + 'static) -> Self {
        Self {
            cache: TagCache::new(key.into(), Box::new(handler)),
        }
    }

    pub fn key(&self) -> &str {
        &self.cache.key
    }

    /// Number of distinct raw tag values parsed so far
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl Rule for FieldTagRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let location = validator.location();
        if location.kind() != LocationKind::Field {
            validator.add_error(ErrorDetail::new(code::NOT_STRUCT_FIELD, value));
            return;
        }
        if let Some(tag_value) = location.field().tag().lookup(&self.cache.key) {
            self.cache.apply(validator, value, tag_value);
        }
    }
}

/// Apply the rules parsed from the `key` tag of the field at the current
/// location. Outside a field location the rule records `not_struct_field`.
pub fn field_tag_rule(key: impl Into<String>, handler: impl TagHandler + 'static) -> RuleRef {
    Arc::new(FieldTagRule::new(key, handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::testing::{bare_validator, entries, fail, required, validation_error};
    use crate::rule::{each_fields, RuleRef};
    use crate::value::StructValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn required_tag(tag_value: &str) -> Result<Vec<RuleRef>, TagError> {
        match tag_value {
            "true" => Ok(vec![required()]),
            "false" | "" => Ok(vec![]),
            other => Err(TagError::invalid_parameter(other, "expected true or false")),
        }
    }

    fn form(name: &str, nickname: &str, age: i32) -> Value {
        StructValue::builder("Form")
            .tagged_field("Name", r#"required:"true""#, name)
            .tagged_field("Nickname", r#"required:"false""#, nickname)
            .tagged_field("Age", r#"required:"yes""#, &age)
            .field("Untagged", "")
            .build()
    }

    #[test]
    fn test_tag_rule_walks_tagged_fields() {
        let result = bare_validator().validate_value(&form("", "", 1), [tag_rule("required", required_tag)]);
        assert_eq!(
            entries(result),
            vec![("required".into(), ".Name".into()), ("invalid_tag".into(), ".Age".into())]
        );
    }

    #[test]
    fn test_tag_rule_ignores_non_struct() {
        assert!(bare_validator().validate(&"x", [tag_rule("required", required_tag)]).is_ok());
    }

    #[test]
    fn test_field_tag_rule_needs_field_location() {
        let result = bare_validator().validate_value(&form("a", "", 1), [field_tag_rule("required", required_tag)]);
        assert_eq!(entries(result), vec![("not_struct_field".into(), "".into())]);
    }

    #[test]
    fn test_field_tag_rule_in_each_fields() {
        let rule = field_tag_rule("required", required_tag);
        let result = bare_validator().validate_value(&form("", "", 1), [each_fields([rule])]);
        let err = validation_error(result);
        assert_eq!(
            err.to_string(),
            "(required) .Name is required\n\
             (invalid_tag) .Age has an invalid tag (yes: invalid tag parameter \"yes\": expected true or false)"
        );
        assert!(err.details()[1].detail().cause().is_some());
    }

    #[test]
    fn test_parse_outcomes_are_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let rule = Arc::new(FieldTagRule::new("check", move |tag_value: &str| {
            counted.fetch_add(1, Ordering::SeqCst);
            match tag_value {
                "fail" => Ok(vec![fail()]),
                _ => Err(TagError::InsufficientParameters),
            }
        }));
        let value = StructValue::builder("T")
            .tagged_field("A", r#"check:"fail""#, &1)
            .tagged_field("B", r#"check:"fail""#, &2)
            .tagged_field("C", r#"check:"bad""#, &3)
            .tagged_field("D", r#"check:"bad""#, &4)
            .build();

        let as_rule: RuleRef = rule.clone();
        for _ in 0..3 {
            let result = bare_validator().validate_value(&value, [each_fields([as_rule.clone()])]);
            assert_eq!(validation_error(result).len(), 4);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(rule.cached_len(), 2);
    }
}
