//! Veritas Rules - Ready-made rules for the Veritas validation engine
//!
//! - [`is`]: leaf predicates such as [`is::required`] and [`is::min`]
//! - [`when`]: conditions for [`veritas_core::when`] chains
//! - [`to`]: conversions applied before validation
//! - [`tagrule`]: rules driven by `required`, `validate`, `pattern` and `enums`
//!   struct tags
//!
//! # Example
//!
//! ```
//! use veritas_core::{each_fields, field, Reflect, StructValue, Validator, Value};
//! use veritas_rules::{is, tagrule};
//!
//! struct User {
//!     name: String,
//!     age: i32,
//! }
//!
//! impl Reflect for User {
//!     fn reflect(&self) -> Value {
//!         StructValue::builder("User")
//!             .field("Name", &self.name)
//!             .tagged_field("Age", r#"validate:"gte=20""#, &self.age)
//!             .build()
//!     }
//! }
//!
//! let user = User { name: String::new(), age: 19 };
//! let err = Validator::new()
//!     .validate(&user, [field("Name", [is::required()]), each_fields([tagrule::validate()])])
//!     .unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "(required) .Name is required\n(gte) .Age must be greater than or equal to 20"
//! );
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod is;
pub mod tagrule;
pub mod to;
pub mod when;
