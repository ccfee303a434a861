//! Struct field traversal
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::{collect_rules, AndRule, Rule, RuleRef};
use crate::code;
use crate::validation::ErrorDetail;
use crate::validator::Validator;
use crate::value::{ShapeKind, StructField, StructValue, Value};

/// Names the field a [`field`] rule applies to
///
/// A plain name matches the field of that name on whatever struct is
/// validated; [`FieldRef::of`] additionally pins the struct's type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    owner: Option<Cow<'static, str>>,
    name: Cow<'static, str>,
}

impl FieldRef {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            owner: None,
            name: name.into(),
        }
    }

    pub fn of(owner: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            owner: Some(owner.into()),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    fn resolve<'s>(&self, value: &'s StructValue) -> &'s StructField {
        if let Some(owner) = self.owner() {
            if owner != value.name() {
                panic!("field {self} does not belong to struct {}", value.name());
            }
        }
        match value.field(&self.name) {
            Some(field) => field,
            None => panic!("struct {} has no field {}", value.name(), self.name),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{owner}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&'static str> for FieldRef {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for FieldRef {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

struct FieldRule {
    field: FieldRef,
    rules: AndRule,
}

impl Rule for FieldRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let ShapeKind::Struct(s) = value.shape() else {
            validator.add_error(ErrorDetail::new(code::NOT_STRUCT, value));
            return;
        };
        let field = self.field.resolve(s);
        validator.dive_field(field.info().clone(), |v| self.rules.validate(v, field.value()));
    }
}

/// Apply the rules to one field of a struct at its field location.
///
/// # Panics
///
/// Validating a struct that has no such field, or whose type name differs
/// from a pinned owner, panics: the rule was written for another type.
pub fn field<F, I, R>(field: F, rules: I) -> RuleRef
where
    F: Into<FieldRef>,
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(FieldRule {
        field: field.into(),
        rules: AndRule::new(collect_rules(rules)),
    })
}

struct EachFieldsRule {
    rules: AndRule,
}

impl Rule for EachFieldsRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let ShapeKind::Struct(s) = value.shape() else {
            validator.add_error(ErrorDetail::new(code::NOT_STRUCT, value));
            return;
        };
        for field in s.fields().iter().filter(|field| field.info().is_exported()) {
            validator.dive_field(field.info().clone(), |v| self.rules.validate(v, field.value()));
        }
    }
}

/// Apply the rules to every exported field, in declaration order
pub fn each_fields<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(EachFieldsRule {
        rules: AndRule::new(collect_rules(rules)),
    })
}
