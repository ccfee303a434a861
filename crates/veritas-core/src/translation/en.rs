//! English messages
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::{Catalog, Language};
use crate::code;

/// Registers the English message for every built-in code
pub fn default_english(catalog: &mut Catalog) {
    let en = Language::ENGLISH;
    let messages = [
        // type errors
        (code::NOT_STRING, "must be any string"),
        (code::NOT_STRUCT, "must be any struct"),
        (code::NOT_STRUCT_FIELD, "must be any struct field"),
        (code::NOT_ARRAY, "must be any array"),
        (code::NOT_MAP, "must be any map"),
        (code::NOT_NUMERIC, "must be any numeric"),
        (code::NOT_ITERABLE, "must be any iterable"),
        (code::NOT_ASSIGNABLE, "can't assign to {0}"),
        // lookups
        (code::NO_KEY, "requires the value at the key ({0})"),
        (code::OUT_OF_RANGE, "requires more than {0} elements"),
        // conversion
        (code::CONVERSION_FAILED, "{0}"),
        // others
        (code::CUSTOM, "{0}"),
        (code::INVALID, "is invalid"),
        (code::INVALID_TAG, "has an invalid tag ({0}: {1})"),
        (code::REQUIRED, "is required"),
        (code::NON_ZERO, "can't be blank (or zero)"),
        (code::NIL_OR_NON_ZERO, "can't be blank (or zero) if specified"),
        (code::ZERO_ONLY, "must be blank"),
        (code::TOO_LONG_LENGTH, "is too long length (maximum is {0} {0|character|characters})"),
        (code::TOO_SHORT_LENGTH, "is too short length (minimum is {0} {0|character|characters})"),
        (code::TOO_LONG_LEN, "is too many elements (maximum is {0} {0|element|elements})"),
        (code::TOO_SHORT_LEN, "is too few elements (minimum is {0} {0|element|elements})"),
        (code::GREATER_THAN, "must be greater than {0}"),
        (code::LESS_THAN, "must be less than {0}"),
        (code::GREATER_THAN_OR_EQUAL, "must be greater than or equal to {0}"),
        (code::LESS_THAN_OR_EQUAL, "must be less than or equal to {0}"),
        (code::INCLUSION, "is not included in {0}"),
        (code::REGEXP_MISMATCH, "is a mismatch with the regular expression. ({0})"),
        (code::INVALID_URL_FORMAT, "is an invalid url format"),
        (code::INVALID_SCHEME, "which scheme is not included in {0}"),
    ];

    for (code, template) in messages {
        catalog.set(en.clone(), code, template);
    }
}
