//! Veritas Core - Composable validation engine
//!
//! This crate evaluates validation rules against arbitrary data and reports
//! every failure together with the location where it happened.
//!
//! # Main Components
//!
//! - **Values**: data under validation is viewed as a [`Value`] tree through [`Reflect`]
//! - **Validator**: the context handed to every rule ([`Validator`])
//! - **Rules**: the [`Rule`] trait and combinators such as [`and`], [`or`], [`when`],
//!   [`each`], [`field`], [`key`] and [`to`]
//! - **Errors**: [`ErrorDetail`], [`ErrorCollector`] and [`ValidationError`], with
//!   locations rendered by a [`LocationNameResolver`]. A custom collector that
//!   cannot build its report returns [`Error::Collector`] with an `anyhow` source
//! - **Translation**: message catalogs for rendering error codes
//!
//! # Example
//!
//! ```
//! use veritas_core::{code, field, rule_fn, ErrorDetail, Reflect, StructValue, Validator, Value};
//!
//! struct User {
//!     name: String,
//! }
//!
//! impl Reflect for User {
//!     fn reflect(&self) -> Value {
//!         StructValue::builder("User").field("Name", &self.name).build()
//!     }
//! }
//!
//! let required = rule_fn(|validator: &Validator, value: &Value| {
//!     if value.is_zero() {
//!         validator.add_error(ErrorDetail::new(code::REQUIRED, value));
//!     }
//! });
//!
//! let user = User { name: String::new() };
//! let err = Validator::new()
//!     .validate(&user, [field("Name", [required])])
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "(required) .Name is required");
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod code;
pub mod error;
pub mod location;
pub mod rule;
pub mod translation;
pub mod validation;
pub mod validator;
pub mod value;

// Re-export main types for convenience
pub use error::{BoxError, ConversionError, Error, Result, TagError};
pub use location::{
    DefaultLocationNameResolver, JsonLocationNameResolver, Location, LocationKind, LocationNameResolver,
    RequestLocationNameResolver,
};
pub use rule::{
    and, each, each_fields, each_keys, each_values, field, field_tag_rule, index, index_if_exist, key, or,
    rule_fn, standard_rules, tag_rule, to, validatable_rule, when, AndRule, Capability, CombinationRule,
    ConvertFn, FieldRef, FieldTagRule, Rule, RuleRef, TagHandler, TagRule, Validatable, ValidatableRule,
    ValidatableWithValidator, WhenContext, WhenRule,
};
pub use translation::{Catalog, Language};
pub use validation::{
    ErrorCollector, ErrorCollectorFactory, ErrorDetail, ErrorReport, LocationError, ReportEntry, StandardErrorCollector,
    ValidationError,
};
pub use validator::{CloneOptions, Validator};
pub use value::{
    FieldInfo, Kind, MapValue, Reflect, SelfValidating, ShapeKind, StructBuilder, StructField, StructTag,
    StructValue, Value,
};
