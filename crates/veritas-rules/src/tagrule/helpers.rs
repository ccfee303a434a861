//! Parameter parsing shared by the tag grammars
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{OnceLock, PoisonError, RwLock};

use regex::Regex;
use veritas_core::TagError;

/// Split `s` on `sep`, dropping empty pieces
pub fn split_tag_values<'a>(s: &'a str, sep: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    s.split(sep).filter(|elem| !elem.is_empty())
}

/// Parse every `sep`-separated piece of `s`, accepting between `min` and
/// `max` pieces
pub fn parse_tag_values<T>(s: &str, sep: &str, min: usize, max: usize) -> Result<Vec<T>, TagError>
where
    T: FromStr,
    T::Err: Display,
{
    let values = split_tag_values(s, sep)
        .map(|elem| elem.parse::<T>().map_err(|err| TagError::invalid_parameter(elem, err)))
        .collect::<Result<Vec<T>, TagError>>()?;
    if values.len() < min {
        return Err(TagError::InsufficientParameters);
    }
    if values.len() > max {
        return Err(TagError::TooManyParameters {
            expected: max,
            actual: values.len(),
        });
    }
    Ok(values)
}

/// Parse exactly one parameter
pub fn parse_tag_value<T>(s: &str, sep: &str) -> Result<T, TagError>
where
    T: FromStr,
    T::Err: Display,
{
    parse_tag_values(s, sep, 1, 1)?.pop().ok_or(TagError::InsufficientParameters)
}

fn regex_cache() -> &'static RwLock<HashMap<String, Regex>> {
    static CACHE: OnceLock<RwLock<HashMap<String, Regex>>> = OnceLock::new();
    CACHE.get_or_init(Default::default)
}

/// Compile `pattern`, reusing a previous compilation of the same pattern
pub fn compile_regex(pattern: &str) -> Result<Regex, TagError> {
    if let Some(regex) = regex_cache().read().unwrap_or_else(PoisonError::into_inner).get(pattern) {
        return Ok(regex.clone());
    }

    let regex = Regex::new(pattern).map_err(|err| TagError::invalid_parameter(pattern, err))?;
    log::debug!("compiled tag pattern {:?}", pattern);
    let mut cache = regex_cache().write().unwrap_or_else(PoisonError::into_inner);
    Ok(cache.entry(pattern.to_owned()).or_insert(regex).clone())
}
