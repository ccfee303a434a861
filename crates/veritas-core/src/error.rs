//! Error types for the Veritas core library
//!
//! Validation failures are values, not panics: rules record [`ErrorDetail`]s into
//! a collector and [`Validator::validate`] turns them into [`Error::Validation`].
//! The remaining types here describe failures of the machinery around rules
//! (tag grammars and value conversion).
//!
//! [`ErrorDetail`]: crate::ErrorDetail
//! [`Validator::validate`]: crate::Validator::validate
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

use crate::validation::ValidationError;
use crate::value::Kind;

/// Boxed error used for causes supplied by user code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for Veritas operations
#[derive(Error, Debug)]
pub enum Error {
    /// One or more rules failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A custom error collector could not materialize its result
    ///
    /// ```
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    /// use veritas_core::{
    ///     each, rule_fn, code, DefaultLocationNameResolver, Error, ErrorCollector, ErrorDetail, Location,
    ///     StandardErrorCollector, Validator, Value,
    /// };
    ///
    /// /// Gives up on reporting once more than `limit` failures were recorded
    /// struct CappedCollector {
    ///     inner: StandardErrorCollector,
    ///     recorded: AtomicUsize,
    ///     limit: usize,
    /// }
    ///
    /// impl ErrorCollector for CappedCollector {
    ///     fn has_error(&self) -> bool {
    ///         self.inner.has_error()
    ///     }
    ///
    ///     fn add(&self, location: Location, detail: ErrorDetail) {
    ///         self.recorded.fetch_add(1, Ordering::SeqCst);
    ///         self.inner.add(location, detail);
    ///     }
    ///
    ///     fn make_error(&self) -> Option<Error> {
    ///         let recorded = self.recorded.load(Ordering::SeqCst);
    ///         if recorded > self.limit {
    ///             return Some(Error::collector(
    ///                 "too many failures to report",
    ///                 anyhow::anyhow!("{recorded} failures, limit is {}", self.limit),
    ///             ));
    ///         }
    ///         self.inner.make_error()
    ///     }
    /// }
    ///
    /// let mut validator = Validator::new();
    /// validator.set_error_collector_factory(|| -> Arc<dyn ErrorCollector> {
    ///     Arc::new(CappedCollector {
    ///         inner: StandardErrorCollector::new(DefaultLocationNameResolver),
    ///         recorded: AtomicUsize::new(0),
    ///         limit: 2,
    ///     })
    /// });
    /// let never = rule_fn(|v: &Validator, value: &Value| v.add_error(ErrorDetail::new(code::INVALID, value)));
    ///
    /// let err = validator.validate(&vec![1, 2, 3], [each([never.clone()])]).unwrap_err();
    /// assert!(matches!(err, Error::Collector { .. }));
    /// assert!(validator.validate(&vec![1, 2], [each([never])]).unwrap_err().as_validation().is_some());
    /// ```
    #[error("Error collector failed: {message}")]
    Collector {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// Create a collector error from any error source
    pub fn collector<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Collector {
            message: message.into(),
            source: source.into(),
        }
    }

    /// The validation failure carried by this error, if any
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Collector { .. } => None,
        }
    }

    /// Consume the error and return the validation failure, if any
    pub fn into_validation(self) -> Option<ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Collector { .. } => None,
        }
    }
}

/// Result type alias for Veritas operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to turn a raw struct-tag value into rules.
///
/// Parse outcomes are cached per raw tag string, so the error is `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// A parameter list was empty where at least one value is required
    #[error("insufficient number of tag parameters")]
    InsufficientParameters,

    /// More parameters were given than the rule accepts
    #[error("too many tag parameters: expected {expected}, got {actual}")]
    TooManyParameters { expected: usize, actual: usize },

    /// A parameter could not be parsed
    #[error("invalid tag parameter {value:?}: {reason}")]
    InvalidParameter { value: String, reason: String },
}

impl TagError {
    pub fn invalid_parameter(value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidParameter {
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Failure inside a conversion used by the `to` combinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The source kind has no conversion to the target
    #[error("can not convert from {from} to {to}")]
    Unsupported { from: Kind, to: Kind },

    /// The source value could not be parsed as the target
    #[error("can not convert {value:?} to {to}: {reason}")]
    Parse {
        value: String,
        to: Kind,
        reason: String,
    },

    /// The source value does not fit into the target
    #[error("{value} overflows {to}")]
    Overflow { value: String, to: Kind },
}
