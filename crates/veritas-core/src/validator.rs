//! The validation context passed to every rule
//!
//! A [`Validator`] carries configuration (common rules and the collector
//! factory) and per-walk state (the current [`Location`] and the collector
//! receiving failures). Rules never mutate a validator: descending into a
//! child or trying an alternative produces a derived validator via
//! [`Validator::clone_with`].
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::Result;
use crate::location::{DefaultLocationNameResolver, Location};
use crate::rule::{self, collect_rules, AndRule, Rule, RuleRef};
use crate::validation::{ErrorCollector, ErrorCollectorFactory, ErrorDetail, StandardErrorCollector};
use crate::value::{FieldInfo, Reflect, Value};

/// Options for [`Validator::clone_with`]
#[derive(Clone, Default)]
pub struct CloneOptions {
    /// Keep the current location
    pub inherit_location: bool,
    /// Share the current error collector, creating it first if needed
    pub inherit_error_collector: bool,
    /// Location for the clone when `inherit_location` is false; a fresh root otherwise
    pub location: Option<Location>,
    /// Collector for the clone when `inherit_error_collector` is false; a
    /// factory-made one otherwise
    pub error_collector: Option<Arc<dyn ErrorCollector>>,
}

impl CloneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep_location(mut self) -> Self {
        self.inherit_location = true;
        self
    }

    pub fn keep_error_collector(mut self) -> Self {
        self.inherit_error_collector = true;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_error_collector(mut self, error_collector: Arc<dyn ErrorCollector>) -> Self {
        self.error_collector = Some(error_collector);
        self
    }
}

/// Validation context
///
/// ```
/// use veritas_core::{rule_fn, code, ErrorDetail, Validator, Value};
///
/// let positive = rule_fn(|validator: &Validator, value: &Value| {
///     if value.compare_numeric(&Value::Int(0)) != Some(std::cmp::Ordering::Greater) {
///         validator.add_error(ErrorDetail::new(code::INVALID, value));
///     }
/// });
///
/// let validator = Validator::new();
/// assert!(validator.validate(&5, [positive.clone()]).is_ok());
/// assert_eq!(
///     validator.validate(&-1, [positive]).unwrap_err().to_string(),
///     "(invalid) is invalid"
/// );
/// ```
#[derive(Clone)]
pub struct Validator {
    common_rules: Arc<Vec<RuleRef>>,
    error_collector_factory: ErrorCollectorFactory,
    location: Location,
    error_collector: OnceLock<Arc<dyn ErrorCollector>>,
    // Location at which the common rules already ran
    common_applied_at: Option<Location>,
}

impl Validator {
    /// A validator with the standard common rules and the standard collector
    pub fn new() -> Self {
        Self {
            common_rules: Arc::new(rule::standard_rules()),
            error_collector_factory: StandardErrorCollector::factory(DefaultLocationNameResolver),
            location: Location::new(),
            error_collector: OnceLock::new(),
            common_applied_at: None,
        }
    }

    /// Replace the rules applied at every visited location
    pub fn set_common_rules<I, R>(&mut self, rules: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleRef>,
    {
        self.common_rules = Arc::new(collect_rules(rules));
    }

    pub fn add_common_rules<I, R>(&mut self, rules: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleRef>,
    {
        Arc::make_mut(&mut self.common_rules).extend(collect_rules(rules));
    }

    pub fn common_rules(&self) -> &[RuleRef] {
        &self.common_rules
    }

    pub fn set_error_collector_factory<F>(&mut self, factory: F)
    where
        F: Fn() -> Arc<dyn ErrorCollector> + Send + Sync + 'static,
    {
        self.error_collector_factory = Arc::new(factory);
    }

    /// Derive a validator sharing this one's configuration
    pub fn clone_with(&self, options: CloneOptions) -> Validator {
        let error_collector = if options.inherit_error_collector {
            OnceLock::from(self.error_collector().clone())
        } else {
            match options.error_collector {
                Some(collector) => OnceLock::from(collector),
                None => OnceLock::new(),
            }
        };
        let location = if options.inherit_location {
            self.location.clone()
        } else {
            options.location.unwrap_or_default()
        };

        Validator {
            common_rules: self.common_rules.clone(),
            error_collector_factory: self.error_collector_factory.clone(),
            location,
            error_collector,
            common_applied_at: self.common_applied_at.clone(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The collector of this walk, created from the factory on first use
    pub fn error_collector(&self) -> &Arc<dyn ErrorCollector> {
        self.error_collector.get_or_init(|| (self.error_collector_factory)())
    }

    /// Record a failure at the current location
    pub fn add_error(&self, detail: ErrorDetail) {
        self.error_collector().add(self.location.clone(), detail);
    }

    fn with_location(&self, location: Location) -> Validator {
        self.clone_with(CloneOptions::new().keep_error_collector().with_location(location))
    }

    pub fn with_field(&self, field: impl Into<Arc<FieldInfo>>) -> Validator {
        self.with_location(self.location.field_location(field))
    }

    pub fn with_index(&self, index: usize) -> Validator {
        self.with_location(self.location.index_location(index))
    }

    pub fn with_map_key(&self, key: impl Into<Value>) -> Validator {
        self.with_location(self.location.map_key_location(key))
    }

    pub fn with_map_value(&self, key: impl Into<Value>) -> Validator {
        self.with_location(self.location.map_value_location(key))
    }

    pub fn dive_field<F>(&self, field: impl Into<Arc<FieldInfo>>, f: F)
    where
        F: FnOnce(&Validator),
    {
        f(&self.with_field(field))
    }

    pub fn dive_index<F>(&self, index: usize, f: F)
    where
        F: FnOnce(&Validator),
    {
        f(&self.with_index(index))
    }

    pub fn dive_map_key<F>(&self, key: impl Into<Value>, f: F)
    where
        F: FnOnce(&Validator),
    {
        f(&self.with_map_key(key))
    }

    pub fn dive_map_value<F>(&self, key: impl Into<Value>, f: F)
    where
        F: FnOnce(&Validator),
    {
        f(&self.with_map_value(key))
    }

    /// Validate `value` against `rules` combined with `and`.
    ///
    /// The walk starts at a fresh root location with a fresh collector, so a
    /// validator can be reused and shared between threads.
    pub fn validate<T, I, R>(&self, value: &T, rules: I) -> Result<()>
    where
        T: Reflect + ?Sized,
        I: IntoIterator<Item = R>,
        R: Into<RuleRef>,
    {
        self.validate_value(&value.reflect(), rules)
    }

    /// [`Validator::validate`] for an already reflected value
    pub fn validate_value<I, R>(&self, value: &Value, rules: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleRef>,
    {
        log::trace!("validating {} value", value.kind());
        let mut walk = self.clone_with(CloneOptions::new());
        walk.common_applied_at = None;

        AndRule::new(collect_rules(rules)).validate(&walk, value);

        let collector = walk.error_collector();
        if !collector.has_error() {
            return Ok(());
        }
        match collector.make_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Whether `and` at the current location still has to run the common rules
    pub(crate) fn common_rules_pending(&self) -> bool {
        if self.common_rules.is_empty() {
            return false;
        }
        !matches!(&self.common_applied_at, Some(applied) if applied.is_same(&self.location))
    }

    /// Clone marking the common rules as applied at the current location
    pub(crate) fn mark_common_applied(&self) -> Validator {
        let mut marked = self.clone_with(CloneOptions::new().keep_location().keep_error_collector());
        marked.common_applied_at = Some(self.location.clone());
        marked
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("common_rules", &self.common_rules.len())
            .field("location", &self.location)
            .field("has_error_collector", &self.error_collector.get().is_some())
            .finish()
    }
}
