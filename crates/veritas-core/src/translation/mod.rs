//! Message catalog for error codes
//!
//! A [`Catalog`] maps `(language, code)` to a message template. Templates use
//! positional placeholders: `{0}` renders the first parameter and
//! `{0|element|elements}` picks the singular form when the first parameter is
//! exactly one. `{{` and `}}` render literal braces.
//!
//! ```
//! use veritas_core::translation::{Catalog, Language};
//! use veritas_core::{code, Value};
//!
//! let catalog = Catalog::predefined();
//! let params = [Value::from(10)];
//! assert_eq!(
//!     catalog.render(&Language::JAPANESE, code::TOO_SHORT_LENGTH, &params),
//!     "は10文字以上必要です"
//! );
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod en;
mod ja;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::sync::OnceLock;

use crate::value::Value;

pub use en::default_english;
pub use ja::default_japanese;

/// Function that registers translation data into a catalog
pub type CatalogRegistration = fn(&mut Catalog);

/// Every registration function shipped with this crate
pub const ALL_PREDEFINED: [CatalogRegistration; 2] = [default_english, default_japanese];

/// Language tag used to select messages
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(Cow<'static, str>);

impl Language {
    pub const ENGLISH: Language = Language(Cow::Borrowed("en"));
    pub const JAPANESE: Language = Language(Cow::Borrowed("ja"));

    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translation data keyed by language and error code
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    messages: HashMap<Language, HashMap<String, String>>,
    fallback: Option<Language>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every predefined language, falling back to English
    pub fn predefined() -> Self {
        let mut catalog = Self::new().with_fallback(Language::ENGLISH);
        for registration in ALL_PREDEFINED {
            catalog.register(registration);
        }
        catalog
    }

    /// Language consulted when the requested one has no message for a code
    pub fn with_fallback(mut self, language: Language) -> Self {
        self.fallback = Some(language);
        self
    }

    pub fn register(&mut self, registration: CatalogRegistration) -> &mut Self {
        registration(self);
        self
    }

    pub fn set(&mut self, language: Language, code: impl Into<String>, template: impl Into<String>) -> &mut Self {
        self.messages
            .entry(language)
            .or_default()
            .insert(code.into(), template.into());
        self
    }

    /// Template for `code`, consulting the fallback language if needed
    pub fn message(&self, language: &Language, code: &str) -> Option<&str> {
        let lookup = |language: &Language| {
            self.messages
                .get(language)
                .and_then(|messages| messages.get(code))
                .map(String::as_str)
        };
        lookup(language).or_else(|| self.fallback.as_ref().and_then(lookup))
    }

    /// Render the message for `code`; unknown codes render as the code itself
    pub fn render(&self, language: &Language, code: &str, params: &[Value]) -> String {
        match self.message(language, code) {
            Some(template) => format_template(template, params),
            None => code.to_owned(),
        }
    }
}

/// English-only catalog used by `Display` of validation errors
pub(crate) fn english() -> &'static Catalog {
    static ENGLISH: OnceLock<Catalog> = OnceLock::new();
    ENGLISH.get_or_init(|| {
        let mut catalog = Catalog::new();
        catalog.register(default_english);
        catalog
    })
}

fn format_template(template: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(c);
                }
                if !closed {
                    out.push('{');
                    out.push_str(&spec);
                    continue;
                }
                write_placeholder(&mut out, &spec, params);
            }
            c => out.push(c),
        }
    }

    out
}

fn write_placeholder(out: &mut String, spec: &str, params: &[Value]) {
    let mut parts = spec.split('|');
    let index = parts.next().and_then(|index| index.trim().parse::<usize>().ok());
    let Some(index) = index else {
        let _ = write!(out, "{{{spec}}}");
        return;
    };
    let Some(param) = params.get(index) else {
        let _ = write!(out, "%!({index} MISSING)");
        return;
    };

    match (parts.next(), parts.next()) {
        (Some(one), Some(other)) => {
            let singular = param.compare_numeric(&Value::Int(1)) == Some(Ordering::Equal);
            out.push_str(if singular { one } else { other });
        }
        _ => {
            let _ = write!(out, "{param}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code;

    #[test]
    fn test_plural_forms() {
        let catalog = Catalog::predefined();
        assert_eq!(
            catalog.render(&Language::ENGLISH, code::TOO_SHORT_LENGTH, &[Value::from(10)]),
            "is too short length (minimum is 10 characters)"
        );
        assert_eq!(
            catalog.render(&Language::ENGLISH, code::TOO_LONG_LEN, &[Value::from(1)]),
            "is too many elements (maximum is 1 element)"
        );
    }

    #[test]
    fn test_fallback_language() {
        let mut catalog = Catalog::new().with_fallback(Language::ENGLISH);
        catalog.set(Language::ENGLISH, "greeting", "hello {0}");
        let french = Language::new("fr");
        assert_eq!(catalog.render(&french, "greeting", &[Value::from("bob")]), "hello bob");
        assert_eq!(catalog.render(&french, "unknown", &[]), "unknown");
    }

    #[test]
    fn test_no_fallback_renders_code() {
        let mut catalog = Catalog::new();
        catalog.register(default_japanese);
        assert_eq!(catalog.render(&Language::JAPANESE, code::REQUIRED, &[]), "は必須です");
        assert_eq!(catalog.render(&Language::ENGLISH, code::REQUIRED, &[]), "required");
    }

    #[test]
    fn test_template_edge_cases() {
        assert_eq!(format_template("{{literal}} {0}", &[Value::from(1)]), "{literal} 1");
        assert_eq!(format_template("{1}", &[Value::from(1)]), "%!(1 MISSING)");
        assert_eq!(format_template("{name}", &[]), "{name}");
        assert_eq!(format_template("open {0", &[Value::from(1)]), "open {0");
    }

    #[test]
    fn test_every_code_has_english_and_japanese_message() {
        let catalog = Catalog::predefined();
        for code in code::ALL {
            for language in [Language::ENGLISH, Language::JAPANESE] {
                let messages = &catalog.messages[&language];
                assert!(messages.contains_key(*code), "{language} message missing for {code}");
            }
        }
    }
}
