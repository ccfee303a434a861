//! Rules and the combinators that compose them
//!
//! A [`Rule`] inspects a value and records failures through the [`Validator`]
//! it receives; it never returns an error itself. Combinators in this module
//! build larger rules out of smaller ones: logical composition ([`and`],
//! [`or`], [`when`]), traversal ([`each`], [`field`], [`key`], ...) and
//! conversion ([`to`]).
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod array;
mod field;
mod flow;
mod map;
mod tag;
mod to;
mod validatable;

use std::sync::Arc;

use crate::validator::Validator;
use crate::value::Value;

pub use array::{each, index, index_if_exist};
pub use field::{each_fields, field, FieldRef};
pub use flow::{and, or, when, AndRule, WhenContext, WhenRule};
pub use map::{each_keys, each_values, key};
pub use tag::{field_tag_rule, tag_rule, FieldTagRule, TagHandler, TagRule};
pub use to::{to, ConvertFn};
pub use validatable::{validatable_rule, Capability, Validatable, ValidatableRule, ValidatableWithValidator};

/// A check applied to a value at the validator's current location
pub trait Rule: Send + Sync {
    fn validate(&self, validator: &Validator, value: &Value);
}

/// Shared handle to a rule
pub type RuleRef = Arc<dyn Rule>;

/// A function from rules to a rule, such as a conversion that wraps its body
pub type CombinationRule = Arc<dyn Fn(Vec<RuleRef>) -> RuleRef + Send + Sync>;

struct FnRule<F>(F);

impl<F> Rule for FnRule<F>
where
    F: Fn(&Validator, &Value) + Send + Sync,
{
    fn validate(&self, validator: &Validator, value: &Value) {
        (self.0)(validator, value)
    }
}

/// Turn a closure into a rule
pub fn rule_fn<F>(f: F) -> RuleRef
where
    F: Fn(&Validator, &Value) + Send + Sync + 'static,
{
    Arc::new(FnRule(f))
}

/// Rules every [`Validator::new`] applies at each location
pub fn standard_rules() -> Vec<RuleRef> {
    vec![validatable_rule()]
}

pub(crate) fn collect_rules<I, R>(rules: I) -> Vec<RuleRef>
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    rules.into_iter().map(Into::into).collect()
}

/// Build a `Vec<RuleRef>` from rules of mixed concrete types
///
/// ```
/// use veritas_core::{each, rules, when, RuleRef};
///
/// let list: Vec<RuleRef> = rules![each(rules![]), when(|_| true, rules![])];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        ::std::vec::Vec::<$crate::RuleRef>::new()
    };
    ($($rule:expr),+ $(,)?) => {
        ::std::vec![$(::std::convert::Into::<$crate::RuleRef>::into($rule)),+]
    };
}
