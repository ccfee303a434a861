//! Struct-tag grammars
//!
//! Each rule here is a field-scoped tag rule: compose it inside
//! [`veritas_core::field`] or [`veritas_core::each_fields`]. The returned rules
//! are process-wide instances, so every raw tag value is parsed once no
//! matter how many validations use it. A malformed tag value records
//! `invalid_tag` at the field instead of panicking.
//!
//! | key        | example                     | rules                               |
//! |------------|-----------------------------|-------------------------------------|
//! | `required` | `required:"true"`           | [`is::required`]                    |
//! | `validate` | `validate:"required,min=2"` | see [`parse_validate_tag`]          |
//! | `pattern`  | `pattern:"^[0-9]+$"`        | [`is::match_regex`]                 |
//! | `enums`    | `enums:"a,b"`               | [`to::string`] then [`is::in_`]     |
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod helpers;

use std::sync::OnceLock;

use veritas_core::{field_tag_rule, RuleRef, TagError};

use crate::{is, to, when};

pub use helpers::{compile_regex, parse_tag_value, parse_tag_values, split_tag_values};

pub const REQUIRED_KEY: &str = "required";
pub const VALIDATE_KEY: &str = "validate";
pub const PATTERN_KEY: &str = "pattern";
pub const ENUMS_KEY: &str = "enums";

/// The `required` tag rule
pub fn required() -> RuleRef {
    static RULE: OnceLock<RuleRef> = OnceLock::new();
    RULE.get_or_init(|| field_tag_rule(REQUIRED_KEY, parse_required_tag)).clone()
}

/// The `validate` tag rule
pub fn validate() -> RuleRef {
    static RULE: OnceLock<RuleRef> = OnceLock::new();
    RULE.get_or_init(|| field_tag_rule(VALIDATE_KEY, parse_validate_tag)).clone()
}

/// The `pattern` tag rule
pub fn pattern() -> RuleRef {
    static RULE: OnceLock<RuleRef> = OnceLock::new();
    RULE.get_or_init(|| field_tag_rule(PATTERN_KEY, parse_pattern_tag)).clone()
}

/// The `enums` tag rule
pub fn enums() -> RuleRef {
    static RULE: OnceLock<RuleRef> = OnceLock::new();
    RULE.get_or_init(|| field_tag_rule(ENUMS_KEY, parse_enums_tag)).clone()
}

/// `"true"` yields [`is::required`]; any other value yields no rules
pub fn parse_required_tag(tag_value: &str) -> Result<Vec<RuleRef>, TagError> {
    if tag_value == "true" {
        Ok(vec![is::required()])
    } else {
        Ok(Vec::new())
    }
}

/// Parse a comma separated list of `name` or `name=param` sub-rules.
///
/// | sub-rule        | meaning                                                 |
/// |-----------------|---------------------------------------------------------|
/// | `required`      | [`is::required`]                                        |
/// | `lte=N`, `lt=N` | upper bound on a number                                 |
/// | `gte=N`, `gt=N` | lower bound on a number                                 |
/// | `min=N`         | lower bound on a number, string length or element count |
/// | `max=N`         | upper bound on a number, string length or element count |
/// | `oneof=a b c`   | string form of the value is one of the listed words     |
/// | `url=s1 s2`     | absolute URL, optionally restricted to schemes          |
///
/// A `-` sub-rule yields no rules at all. Unknown names are skipped so the
/// tag can be shared with other consumers.
pub fn parse_validate_tag(tag_value: &str) -> Result<Vec<RuleRef>, TagError> {
    let mut rules = Vec::new();

    for elem in tag_value.split(',') {
        if elem == "-" {
            return Ok(Vec::new());
        }
        let (name, param) = elem.split_once('=').unwrap_or((elem, ""));
        match name {
            "required" => rules.push(is::required()),
            "lte" => rules.push(is::less_than_or_equal_to(parse_tag_value::<f64>(param, " ")?)),
            "lt" => rules.push(is::less_than(parse_tag_value::<f64>(param, " ")?)),
            "gte" => rules.push(is::greater_than_or_equal_to(parse_tag_value::<f64>(param, " ")?)),
            "gt" => rules.push(is::greater_than(parse_tag_value::<f64>(param, " ")?)),
            "min" => {
                let min = parse_tag_value::<i64>(param, " ")?;
                let min_len = usize::try_from(min).unwrap_or(0);
                rules.push(
                    when::is_numeric([is::min(min)])
                        .else_when(when::is_string([is::length_between(min_len, usize::MAX)]))
                        .otherwise([is::len_between(min_len, usize::MAX)])
                        .into(),
                );
            }
            "max" => {
                let max = parse_tag_value::<i64>(param, " ")?;
                // Negative bounds only constrain numbers; lengths clamp to zero
                let max_len = usize::try_from(max).unwrap_or(0);
                rules.push(
                    when::is_numeric([is::max(max)])
                        .else_when(when::is_string([is::length_between(0, max_len)]))
                        .otherwise([is::len_between(0, max_len)])
                        .into(),
                );
            }
            "oneof" => {
                let words: Vec<&str> = split_tag_values(param, " ").collect();
                if words.is_empty() {
                    return Err(TagError::InsufficientParameters);
                }
                rules.push(to::string([is::in_(words)]));
            }
            "url" => rules.push(is::url(split_tag_values(param, " "))),
            other => log::trace!("skipping unknown validate sub-rule {:?}", other),
        }
    }

    Ok(rules)
}

/// The whole tag value is a regular expression
pub fn parse_pattern_tag(tag_value: &str) -> Result<Vec<RuleRef>, TagError> {
    if tag_value.is_empty() {
        return Err(TagError::InsufficientParameters);
    }
    Ok(vec![is::match_regex(compile_regex(tag_value)?)])
}

/// A comma separated list of accepted values, compared with the string form
/// of the field value
pub fn parse_enums_tag(tag_value: &str) -> Result<Vec<RuleRef>, TagError> {
    if tag_value.is_empty() {
        return Err(TagError::InsufficientParameters);
    }
    Ok(vec![to::string([is::in_(tag_value.split(','))])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use veritas_core::{each_fields, Error, StructValue, Validator, Value};

    fn message(value: &Value, rule: RuleRef) -> Option<String> {
        match Validator::new().validate_value(value, [each_fields([rule])]) {
            Ok(()) => None,
            Err(Error::Validation(err)) => Some(err.to_string()),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_required_tag() {
        let user = StructValue::builder("User")
            .tagged_field("FirstName", r#"required:"true""#, &None::<String>)
            .tagged_field("LastName", r#"required:"false""#, &None::<String>)
            .tagged_field("Age", r#"required:"True""#, &None::<i64>)
            .build();
        assert_eq!(message(&user, required()).as_deref(), Some("(required) .FirstName is required"));
    }

    #[test]
    fn test_pattern_tag() {
        let user = |name: Option<&str>| {
            StructValue::builder("User")
                .tagged_field("Name", r#"pattern:"^[a-z]+$""#, &name)
                .build()
        };
        assert_eq!(message(&user(None), pattern()), None);
        assert_eq!(message(&user(Some("abcdef")), pattern()), None);
        assert_eq!(
            message(&user(Some("abc0123")), pattern()).as_deref(),
            Some("(regexp) .Name is a mismatch with the regular expression. (^[a-z]+$)")
        );
    }

    #[test]
    fn test_pattern_tag_errors() {
        assert_eq!(parse_pattern_tag("").err(), Some(TagError::InsufficientParameters));
        let user = StructValue::builder("User").tagged_field("Name", r#"pattern:"(""#, "x").build();
        let rendered = message(&user, pattern()).unwrap_or_default();
        assert!(rendered.starts_with("(invalid_tag) .Name has an invalid tag ((: invalid tag parameter"));
    }

    #[test]
    fn test_enums_tag() {
        let user = |name: &str, age: i64| {
            StructValue::builder("User")
                .tagged_field("Name", r#"enums:"alice,bob""#, name)
                .tagged_field("Age", r#"enums:"20,30""#, &age)
                .build()
        };
        assert_eq!(message(&user("alice", 20), enums()), None);
        assert_eq!(
            message(&user("a", 10), enums()).as_deref(),
            Some("(inclusion) .Name is not included in [alice bob]\n(inclusion) .Age is not included in [20 30]")
        );
    }

    #[test]
    fn test_validate_bounds() {
        let user = |age: Option<i64>| {
            StructValue::builder("User")
                .tagged_field("Lte", r#"validate:"lte=2""#, &age)
                .tagged_field("Lt", r#"validate:"lt=2""#, &age)
                .tagged_field("Gte", r#"validate:"gte=2""#, &age)
                .tagged_field("Gt", r#"validate:"gt=2""#, &age)
                .build()
        };
        assert_eq!(message(&user(None), validate()), None);
        assert_eq!(
            message(&user(Some(2)), validate()).as_deref(),
            Some("(lt) .Lt must be less than 2\n(gt) .Gt must be greater than 2")
        );
        assert_eq!(
            message(&user(Some(1)), validate()).as_deref(),
            Some("(gte) .Gte must be greater than or equal to 2\n(gt) .Gt must be greater than 2")
        );
    }

    #[test]
    fn test_validate_min_and_max() {
        let form = |name: &str, age: i64, tags: Vec<&str>| {
            StructValue::builder("Form")
                .tagged_field("Name", r#"validate:"min=2,max=3""#, &Some(name))
                .tagged_field("Age", r#"validate:"min=2,max=3""#, &Some(age))
                .tagged_field("Tags", r#"validate:"min=2,max=3""#, &tags)
                .build()
        };
        assert_eq!(message(&form("日本", 3, vec!["", ""]), validate()), None);
        assert_eq!(
            message(&form("a", 1, vec![""]), validate()).as_deref(),
            Some(
                "(too_short_length) .Name is too short length (minimum is 2 characters)\n\
                 (gte) .Age must be greater than or equal to 2\n\
                 (too_short_len) .Tags is too few elements (minimum is 2 elements)"
            )
        );
        assert_eq!(
            message(&form("abcd", 4, vec!["", "", "", ""]), validate()).as_deref(),
            Some(
                "(too_long_length) .Name is too long length (maximum is 3 characters)\n\
                 (lte) .Age must be less than or equal to 3\n\
                 (too_long_len) .Tags is too many elements (maximum is 3 elements)"
            )
        );
    }

    #[test]
    fn test_validate_negative_min_and_max() {
        let deltas = |low: i64, high: i64| {
            StructValue::builder("Deltas")
                .tagged_field("Low", r#"validate:"min=-5""#, &low)
                .tagged_field("High", r#"validate:"max=-5""#, &high)
                .build()
        };
        assert_eq!(message(&deltas(-5, -5), validate()), None);
        assert_eq!(
            message(&deltas(-10, 0), validate()).as_deref(),
            Some(
                "(gte) .Low must be greater than or equal to -5\n\
                 (lte) .High must be less than or equal to -5"
            )
        );

        let name = |value: &str| {
            StructValue::builder("Form")
                .tagged_field("Name", r#"validate:"min=-1,max=-1""#, value)
                .build()
        };
        assert_eq!(message(&name(""), validate()), None);
        assert_eq!(
            message(&name("a"), validate()).as_deref(),
            Some("(too_long_length) .Name is too long length (maximum is 0 characters)")
        );
    }

    #[test]
    fn test_validate_oneof_compares_string_forms() {
        let model = |s: &str, i: i64, b: bool, f: f64| {
            StructValue::builder("Model")
                .tagged_field("S", r#"validate:"oneof=a b c""#, s)
                .tagged_field("I", r#"validate:"oneof=1 2 3""#, &i)
                .tagged_field("B", r#"validate:"oneof=true""#, &b)
                .tagged_field("F", r#"validate:"oneof=1 2.5 3""#, &f)
                .build()
        };
        assert_eq!(message(&model("a", 2, true, 3.0), validate()), None);
        assert_eq!(
            message(&model("", 0, false, 0.0), validate()).as_deref(),
            Some(
                "(inclusion) .S is not included in [a b c]\n\
                 (inclusion) .I is not included in [1 2 3]\n\
                 (inclusion) .B is not included in [true]\n\
                 (inclusion) .F is not included in [1 2.5 3]"
            )
        );
    }

    #[test]
    fn test_validate_url() {
        let model = |u1: &str, u2: &str, u3: &str| {
            StructValue::builder("Model")
                .tagged_field("U1", r#"validate:"url=http https""#, &Some(u1))
                .tagged_field("U2", r#"validate:"url""#, u2)
                .tagged_field("U3", r#"validate:"url=scp""#, u3)
                .build()
        };
        assert_eq!(
            message(
                &model("https://example.com/path?q=1", "http://example.com:1234/path?q=1", "scp://example.com:8888"),
                validate()
            ),
            None
        );
        assert_eq!(
            message(
                &model("rtmp://example.com/path?q=1", "http://example.com:1234/path?q=1", "http://example.com:8888"),
                validate()
            )
            .as_deref(),
            Some(
                "(invalid_scheme) .U1 which scheme is not included in [http https]\n\
                 (invalid_scheme) .U3 which scheme is not included in [scp]"
            )
        );
    }

    #[test]
    fn test_validate_skip_and_unknown() {
        assert_eq!(parse_validate_tag("required,-").map(|rules| rules.len()), Ok(0));
        assert_eq!(parse_validate_tag("email,omitempty").map(|rules| rules.len()), Ok(0));
        assert_eq!(parse_validate_tag("required,gte=1").map(|rules| rules.len()), Ok(2));
    }

    #[test]
    fn test_validate_parameter_errors() {
        assert_eq!(parse_validate_tag("lte=").err(), Some(TagError::InsufficientParameters));
        assert_eq!(parse_validate_tag("oneof=").err(), Some(TagError::InsufficientParameters));
        assert_eq!(
            parse_validate_tag("min=1 2").err(),
            Some(TagError::TooManyParameters { expected: 1, actual: 2 })
        );
        assert!(matches!(
            parse_validate_tag("gt=abc").err(),
            Some(TagError::InvalidParameter { .. })
        ));
    }
}
