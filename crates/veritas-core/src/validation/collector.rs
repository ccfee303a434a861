//! Error collectors
//!
//! A collector receives every failure recorded during one validation and
//! turns them into the error returned to the caller. Collectors are shared
//! between a validator and its clones, so they take `&self` and guard their
//! state internally.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{ErrorDetail, LocationError, ValidationError};
use crate::error::Error;
use crate::location::{DefaultLocationNameResolver, Location, LocationNameResolver};
use crate::value::Value;

/// Receives failures and builds the final error
pub trait ErrorCollector: Send + Sync {
    fn has_error(&self) -> bool;

    fn add(&self, location: Location, detail: ErrorDetail);

    /// The error for everything recorded so far, or `None` if nothing was
    fn make_error(&self) -> Option<Error>;
}

/// Produces a fresh collector for each validation
pub type ErrorCollectorFactory = Arc<dyn Fn() -> Arc<dyn ErrorCollector> + Send + Sync>;

/// Collector that keeps failures in recording order and produces a
/// [`ValidationError`]
pub struct StandardErrorCollector {
    name_resolver: Arc<dyn LocationNameResolver>,
    errors: Mutex<Vec<LocationError>>,
}

impl StandardErrorCollector {
    pub fn new(name_resolver: impl LocationNameResolver + 'static) -> Self {
        Self::with_shared_resolver(Arc::new(name_resolver))
    }

    pub fn with_shared_resolver(name_resolver: Arc<dyn LocationNameResolver>) -> Self {
        Self {
            name_resolver,
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Factory producing standard collectors with the given resolver
    pub fn factory(name_resolver: impl LocationNameResolver + 'static) -> ErrorCollectorFactory {
        let name_resolver: Arc<dyn LocationNameResolver> = Arc::new(name_resolver);
        Arc::new(move || -> Arc<dyn ErrorCollector> {
            Arc::new(StandardErrorCollector::with_shared_resolver(name_resolver.clone()))
        })
    }

    fn errors(&self) -> MutexGuard<'_, Vec<LocationError>> {
        // A panicking rule cannot leave the list half-written
        self.errors.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StandardErrorCollector {
    fn default() -> Self {
        Self::new(DefaultLocationNameResolver)
    }
}

impl ErrorCollector for StandardErrorCollector {
    fn has_error(&self) -> bool {
        !self.errors().is_empty()
    }

    fn add(&self, location: Location, detail: ErrorDetail) {
        self.errors().push(LocationError::new(location, detail));
    }

    fn make_error(&self) -> Option<Error> {
        let errors = self.errors();
        if errors.is_empty() {
            return None;
        }
        log::trace!("materializing validation error with {} entries", errors.len());
        Some(Error::Validation(ValidationError::new(
            self.name_resolver.clone(),
            errors.clone(),
        )))
    }
}

/// Wraps the collector of an enclosing `to` rule and records the
/// pre-conversion value on failures at the conversion's own location
pub(crate) struct ConversionErrorCollector {
    inner: Arc<dyn ErrorCollector>,
    location: Location,
    unconverted: Value,
}

impl ConversionErrorCollector {
    pub(crate) fn new(inner: Arc<dyn ErrorCollector>, location: Location, unconverted: Value) -> Self {
        Self {
            inner,
            location,
            unconverted,
        }
    }
}

impl ErrorCollector for ConversionErrorCollector {
    fn has_error(&self) -> bool {
        self.inner.has_error()
    }

    fn add(&self, location: Location, detail: ErrorDetail) {
        let detail = if location.is_same(&self.location) {
            detail.with_unconverted_value(self.unconverted.clone())
        } else {
            detail
        };
        self.inner.add(location, detail);
    }

    fn make_error(&self) -> Option<Error> {
        self.inner.make_error()
    }
}
