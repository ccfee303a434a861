//! The error returned by a failed validation
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::{ErrorDetail, ErrorReport};
use crate::location::{Location, LocationNameResolver};
use crate::translation::{self, Catalog, Language};

/// An [`ErrorDetail`] together with where it was recorded
#[derive(Debug, Clone)]
pub struct LocationError {
    location: Location,
    detail: ErrorDetail,
}

impl LocationError {
    pub fn new(location: Location, detail: ErrorDetail) -> Self {
        Self { location, detail }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn detail(&self) -> &ErrorDetail {
        &self.detail
    }
}

/// Ordered list of failures produced by the standard collector.
///
/// `Display` renders one line per failure, `(code) name message`, in English.
/// The text is built on first use and cached.
#[derive(Clone, Error)]
pub struct ValidationError {
    errors: Arc<[LocationError]>,
    name_resolver: Arc<dyn LocationNameResolver>,
    rendered: OnceLock<String>,
}

impl ValidationError {
    pub fn new(name_resolver: Arc<dyn LocationNameResolver>, errors: Vec<LocationError>) -> Self {
        Self {
            errors: errors.into(),
            name_resolver,
            rendered: OnceLock::new(),
        }
    }

    /// Every recorded failure, in recording order
    pub fn details(&self) -> &[LocationError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Resolved name of a location, using this error's resolver
    pub fn location_name(&self, location: &Location) -> String {
        self.name_resolver.resolve_location_name(location)
    }

    /// Messages grouped by resolved location name
    pub fn translate(&self, catalog: &Catalog, language: &Language) -> BTreeMap<String, Vec<String>> {
        let mut translated: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for error in self.errors.iter() {
            let detail = error.detail();
            translated
                .entry(self.location_name(error.location()))
                .or_default()
                .push(catalog.render(language, detail.code(), detail.params()));
        }
        translated
    }

    /// Machine-readable report of every failure, locations resolved with
    /// this error's resolver
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            errors: self
                .errors
                .iter()
                .map(|error| error.detail().report_entry(self.location_name(error.location())))
                .collect(),
        }
    }

    /// [`ValidationError::report`] as JSON
    pub fn to_json(&self) -> serde_json::Value {
        // Plain data with string keys always serializes
        serde_json::to_value(self.report()).unwrap_or_default()
    }

    fn message(&self) -> &str {
        self.rendered.get_or_init(|| {
            log::trace!("rendering validation error with {} entries", self.errors.len());
            let catalog = translation::english();
            self.errors
                .iter()
                .map(|error| {
                    let detail = error.detail();
                    let name = self.location_name(error.location());
                    let message = catalog.render(&Language::ENGLISH, detail.code(), detail.params());
                    if name.is_empty() {
                        format!("({}) {message}", detail.code())
                    } else {
                        format!("({}) {name} {message}", detail.code())
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.report().serialize(serializer)
    }
}

impl fmt::Debug for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationError")
            .field("errors", &self.errors)
            .field("message", &self.message())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code;
    use crate::location::{DefaultLocationNameResolver, JsonLocationNameResolver};
    use crate::value::{FieldInfo, Value};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample(resolver: Arc<dyn LocationNameResolver>) -> ValidationError {
        let root = Location::new();
        let name = root.field_location(FieldInfo::new("Name").with_tag(r#"json:"name""#));
        ValidationError::new(
            resolver,
            vec![
                LocationError::new(name.clone(), ErrorDetail::new(code::REQUIRED, &Value::from(""))),
                LocationError::new(
                    name,
                    ErrorDetail::new(code::TOO_SHORT_LENGTH, &Value::from("")).with_param(3),
                ),
                LocationError::new(root, ErrorDetail::new(code::INVALID, &Value::Null)),
            ],
        )
    }

    #[test]
    fn test_display_lines() {
        let err = sample(Arc::new(DefaultLocationNameResolver));
        assert_eq!(
            err.to_string(),
            "(required) .Name is required\n\
             (too_short_length) .Name is too short length (minimum is 3 characters)\n\
             (invalid) is invalid"
        );
        assert_eq!(err.len(), 3);
    }

    #[test]
    fn test_translate_groups_by_location() {
        let err = sample(Arc::new(JsonLocationNameResolver));
        let translated = err.translate(&Catalog::predefined(), &Language::JAPANESE);
        assert_eq!(translated[".name"], vec!["は必須です", "は3文字以上必要です"]);
        assert_eq!(translated[""], vec!["は不正な値です"]);
    }

    #[test]
    fn test_json_report_uses_resolver() {
        let err = sample(Arc::new(JsonLocationNameResolver));
        let report = err.to_json();
        assert_eq!(report["errors"][0]["location"], ".name");
        assert_eq!(report["errors"][1]["params"], json!([3]));
        assert_eq!(report["errors"][2]["code"], "invalid");
    }
}
