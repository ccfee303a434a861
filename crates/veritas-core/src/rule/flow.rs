//! Logical composition: `and`, `or` and `when`
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::sync::Arc;

use super::{collect_rules, Rule, RuleRef};
use crate::code;
use crate::error::Error;
use crate::location::Location;
use crate::validation::ErrorDetail;
use crate::validator::{CloneOptions, Validator};
use crate::value::Value;

/// Applies every rule in order, prefixed by the validator's common rules the
/// first time a location is visited
pub struct AndRule {
    rules: Vec<RuleRef>,
}

impl AndRule {
    pub fn new(rules: Vec<RuleRef>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }
}

impl Rule for AndRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        if validator.common_rules_pending() {
            let marked = validator.mark_common_applied();
            for rule in marked.common_rules().iter().chain(&self.rules) {
                rule.validate(&marked, value);
            }
        } else {
            for rule in &self.rules {
                rule.validate(validator, value);
            }
        }
    }
}

/// Every rule must hold; all failures are recorded
pub fn and<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(AndRule::new(collect_rules(rules)))
}

struct OrRule {
    rules: Vec<RuleRef>,
}

impl Rule for OrRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let mut branches = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let trial = validator.clone_with(CloneOptions::new().keep_location());
            rule.validate(&trial, value);

            let collector = trial.error_collector();
            if !collector.has_error() {
                return;
            }
            if let Some(Error::Validation(err)) = collector.make_error() {
                branches.push(err);
            }
        }
        validator.add_error(ErrorDetail::new(code::INVALID, value).with_branches(branches));
    }
}

/// At least one rule must hold.
///
/// Each alternative runs against its own scratch collector; nothing it records
/// leaks out. If every alternative fails, a single `invalid` failure is
/// recorded, carrying the alternatives' errors as [`ErrorDetail::branches`].
pub fn or<I, R>(rules: I) -> RuleRef
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    Arc::new(OrRule {
        rules: collect_rules(rules),
    })
}

/// What a [`when`] condition can inspect
pub struct WhenContext<'a> {
    location: &'a Location,
    value: &'a Value,
}

impl<'a> WhenContext<'a> {
    pub fn location(&self) -> &'a Location {
        self.location
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }
}

type Condition = Arc<dyn Fn(&WhenContext<'_>) -> bool + Send + Sync>;

struct Branch {
    condition: Condition,
    rules: AndRule,
}

/// Conditional rule chain
///
/// Branches are tested in order and only the first whose condition holds is
/// applied, through `and`. A chain where nothing matches records nothing.
pub struct WhenRule {
    branches: Vec<Branch>,
}

/// Apply `rules` only when `condition` holds
pub fn when<F, I, R>(condition: F, rules: I) -> WhenRule
where
    F: Fn(&WhenContext<'_>) -> bool + Send + Sync + 'static,
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    WhenRule {
        branches: vec![Branch {
            condition: Arc::new(condition),
            rules: AndRule::new(collect_rules(rules)),
        }],
    }
}

impl WhenRule {
    /// Append the branches of another chain
    pub fn else_when(mut self, other: WhenRule) -> WhenRule {
        self.branches.extend(other.branches);
        self
    }

    /// Append a branch applied when no earlier branch matched
    pub fn otherwise<I, R>(mut self, rules: I) -> WhenRule
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleRef>,
    {
        self.branches.push(Branch {
            condition: Arc::new(|_: &WhenContext<'_>| true),
            rules: AndRule::new(collect_rules(rules)),
        });
        self
    }
}

impl Rule for WhenRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let context = WhenContext {
            location: validator.location(),
            value,
        };
        if let Some(branch) = self.branches.iter().find(|branch| (branch.condition)(&context)) {
            branch.rules.validate(validator, value);
        }
    }
}

impl From<WhenRule> for RuleRef {
    fn from(rule: WhenRule) -> Self {
        Arc::new(rule)
    }
}
