//! Self-validating values
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::sync::{Arc, OnceLock};

use super::{Rule, RuleRef};
use crate::code;
use crate::error::BoxError;
use crate::validation::ErrorDetail;
use crate::validator::Validator;
use crate::value::Value;

/// A value that can check itself and report a single error
pub trait Validatable: Send + Sync {
    fn validate(&self) -> Result<(), BoxError>;
}

/// A value that checks itself and records failures through the validator,
/// possibly at child locations
pub trait ValidatableWithValidator: Send + Sync {
    fn validate(&self, validator: &Validator);
}

/// Self-validation capability attached to a [`Value`]
#[derive(Clone)]
pub enum Capability {
    Plain(Arc<dyn Validatable>),
    WithValidator(Arc<dyn ValidatableWithValidator>),
}

/// Runs the capability attached to a value, looking through `Ref` layers
pub struct ValidatableRule;

impl Rule for ValidatableRule {
    fn validate(&self, validator: &Validator, value: &Value) {
        let mut current = value;
        loop {
            match current {
                Value::SelfValidating(sv) => {
                    match sv.capability() {
                        Capability::WithValidator(hook) => hook.validate(validator),
                        Capability::Plain(validatable) => {
                            if let Err(err) = validatable.validate() {
                                validator.add_error(ErrorDetail::custom(code::CUSTOM, value, err));
                            }
                        }
                    }
                    return;
                }
                Value::Ref(inner) => current = inner,
                _ => return,
            }
        }
    }
}

/// Shared [`ValidatableRule`] instance
pub fn validatable_rule() -> RuleRef {
    static RULE: OnceLock<RuleRef> = OnceLock::new();
    RULE.get_or_init(|| Arc::new(ValidatableRule)).clone()
}
