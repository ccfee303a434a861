//! Error codes recorded by the built-in rules
//!
//! Codes are stable machine-readable identifiers; the message catalog maps each
//! one to a human-readable template. The comment next to a code lists the
//! parameters its rules attach, by position.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

// Type mismatches
pub const NOT_STRING: &str = "not_string";
pub const NOT_STRUCT: &str = "not_struct";
pub const NOT_STRUCT_FIELD: &str = "not_struct_field";
pub const NOT_ARRAY: &str = "not_array";
pub const NOT_MAP: &str = "not_map";
pub const NOT_NUMERIC: &str = "not_numeric";
pub const NOT_ITERABLE: &str = "not_iterable";
pub const NOT_ASSIGNABLE: &str = "not_assignable"; // {0} = kind name

// Lookups
pub const NO_KEY: &str = "no_key"; // {0} = key
pub const OUT_OF_RANGE: &str = "out_of_range"; // {0} = index, {1} = length

// Conversion
pub const CONVERSION_FAILED: &str = "conversion"; // {0} = error message

// Rule outcomes
pub const CUSTOM: &str = "custom"; // {0} = error message
pub const INVALID: &str = "invalid";
pub const INVALID_TAG: &str = "invalid_tag"; // {0} = raw tag value, {1} = error message
pub const REQUIRED: &str = "required";
pub const NON_ZERO: &str = "non_zero";
pub const NIL_OR_NON_ZERO: &str = "nil_or_non_zero";
pub const ZERO_ONLY: &str = "zero_only";
pub const TOO_LONG_LENGTH: &str = "too_long_length"; // {0} = count
pub const TOO_SHORT_LENGTH: &str = "too_short_length"; // {0} = count
pub const TOO_LONG_LEN: &str = "too_long_len"; // {0} = count
pub const TOO_SHORT_LEN: &str = "too_short_len"; // {0} = count
pub const GREATER_THAN: &str = "gt"; // {0} = number
pub const LESS_THAN: &str = "lt"; // {0} = number
pub const GREATER_THAN_OR_EQUAL: &str = "gte"; // {0} = number
pub const LESS_THAN_OR_EQUAL: &str = "lte"; // {0} = number
pub const INCLUSION: &str = "inclusion"; // {0} = list
pub const REGEXP_MISMATCH: &str = "regexp"; // {0} = pattern
pub const INVALID_URL_FORMAT: &str = "invalid_url"; // {0} = error message
pub const INVALID_SCHEME: &str = "invalid_scheme"; // {0} = list

/// Every code above, in declaration order.
pub const ALL: &[&str] = &[
    NOT_STRING,
    NOT_STRUCT,
    NOT_STRUCT_FIELD,
    NOT_ARRAY,
    NOT_MAP,
    NOT_NUMERIC,
    NOT_ITERABLE,
    NOT_ASSIGNABLE,
    NO_KEY,
    OUT_OF_RANGE,
    CONVERSION_FAILED,
    CUSTOM,
    INVALID,
    INVALID_TAG,
    REQUIRED,
    NON_ZERO,
    NIL_OR_NON_ZERO,
    ZERO_ONLY,
    TOO_LONG_LENGTH,
    TOO_SHORT_LENGTH,
    TOO_LONG_LEN,
    TOO_SHORT_LEN,
    GREATER_THAN,
    LESS_THAN,
    GREATER_THAN_OR_EQUAL,
    LESS_THAN_OR_EQUAL,
    INCLUSION,
    REGEXP_MISMATCH,
    INVALID_URL_FORMAT,
    INVALID_SCHEME,
];
