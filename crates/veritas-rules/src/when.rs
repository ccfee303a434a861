//! Ready-made conditions for `when`
//!
//! Each helper returns a [`WhenRule`], so the usual `else_when` and
//! `otherwise` chaining applies:
//!
//! ```
//! use veritas_core::RuleRef;
//! use veritas_rules::{is, when};
//!
//! let rule: RuleRef = when::is_numeric([is::min(2)])
//!     .else_when(when::is_string([is::length_between(2, usize::MAX)]))
//!     .otherwise([is::len_between(2, usize::MAX)])
//!     .into();
//! # let _ = rule;
//! ```
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use veritas_core::{when, Kind, LocationKind, Reflect, RuleRef, ShapeKind, Value, WhenContext, WhenRule};

/// Apply `rules` when the value, looking through pointer layers, is a number
pub fn is_numeric<I, R>(rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    when(|ctx: &WhenContext<'_>| ctx.value().is_numeric(), rules)
}

/// Apply `rules` when the value, looking through pointer layers, is a string
pub fn is_string<I, R>(rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    when(|ctx: &WhenContext<'_>| matches!(ctx.value().indirect(), Value::String(_)), rules)
}

fn concrete(kind: Kind) -> Kind {
    if kind == Kind::Any {
        panic!("`any` is not a concrete kind");
    }
    kind
}

/// Apply `rules` when the value has exactly `kind`.
///
/// # Panics
///
/// Panics if `kind` is [`Kind::Any`].
pub fn is_kind<I, R>(kind: Kind, rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    let kind = concrete(kind);
    when(move |ctx: &WhenContext<'_>| ctx.value().kind() == kind, rules)
}

/// Apply `rules` when the value has `kind`, either directly or behind
/// pointer layers.
///
/// # Panics
///
/// Panics if `kind` is [`Kind::Any`].
pub fn is_kind_or_ref<I, R>(kind: Kind, rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    let kind = concrete(kind);
    when(
        move |ctx: &WhenContext<'_>| ctx.value().kind() == kind || ctx.value().indirect().kind() == kind,
        rules,
    )
}

/// Apply `rules` when the value is a struct
pub fn is_struct<I, R>(rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    when(|ctx: &WhenContext<'_>| matches!(ctx.value().shape(), ShapeKind::Struct(_)), rules)
}

/// Apply `rules` when the value is a sequence
pub fn is_seq<I, R>(rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    when(|ctx: &WhenContext<'_>| matches!(ctx.value().shape(), ShapeKind::Sequence(_)), rules)
}

/// Apply `rules` when the value is a mapping
pub fn is_map<I, R>(rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    when(|ctx: &WhenContext<'_>| matches!(ctx.value().shape(), ShapeKind::Mapping(_)), rules)
}

/// Apply `rules` when the value is a mapping holding `key`. Keys of the
/// wrong kind never match.
pub fn has_key<K, I, R>(key: K, rules: I) -> WhenRule
where
    K: Reflect,
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    let key = key.reflect();
    when(
        move |ctx: &WhenContext<'_>| match ctx.value().shape() {
            ShapeKind::Mapping(map) => map.accepts_key(&key) && map.contains_key(&key),
            _ => false,
        },
        rules,
    )
}

/// Apply `rules` when the current location is a struct field that carries
/// the tag `key`, even with an empty value
pub fn has_field_tag<I, R>(key: impl Into<String>, rules: I) -> WhenRule
where
    I: IntoIterator<Item = R>,
    R: Into<RuleRef>,
{
    let key = key.into();
    when(
        move |ctx: &WhenContext<'_>| {
            let location = ctx.location();
            location.kind() == LocationKind::Field && location.field().tag().lookup(&key).is_some()
        },
        rules,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is;
    use veritas_core::{each_fields, each_values, field, Error, MapValue, StructValue, Validator};

    fn codes(result: veritas_core::Result<()>) -> Vec<String> {
        match result {
            Ok(()) => Vec::new(),
            Err(Error::Validation(err)) => err.details().iter().map(|e| e.detail().code().to_string()).collect(),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_conditions() {
        let v = Validator::new();
        assert_eq!(codes(v.validate(&1, [is_numeric([is::never()])])), vec!["invalid"]);
        assert_eq!(codes(v.validate(&Some(1.5), [is_numeric([is::never()])])), vec!["invalid"]);
        assert!(codes(v.validate(&"1", [is_numeric([is::never()])])).is_empty());
        assert_eq!(codes(v.validate(&Some("a"), [is_string([is::never()])])), vec!["invalid"]);
        assert_eq!(codes(v.validate(&vec![1], [is_seq([is::never()])])), vec!["invalid"]);
    }

    #[test]
    fn test_is_kind_distinguishes_pointer_layers() {
        let v = Validator::new();
        assert!(codes(v.validate(&Some(1i64), [is_kind(Kind::Int, [is::never()])])).is_empty());
        assert_eq!(codes(v.validate(&Some(1i64), [is_kind(Kind::Ref, [is::never()])])), vec!["invalid"]);
        assert_eq!(
            codes(v.validate(&Some(1i64), [is_kind_or_ref(Kind::Int, [is::never()])])),
            vec!["invalid"]
        );
    }

    #[test]
    #[should_panic(expected = "not a concrete kind")]
    fn test_is_kind_rejects_any() {
        let _ = is_kind(Kind::Any, [is::never()]);
    }

    #[test]
    fn test_has_key() {
        let map = Value::Map(MapValue::new(Kind::String).with_entry("a", 1));
        let v = Validator::new();
        assert_eq!(codes(v.validate_value(&map, [has_key("a", [is::never()])])), vec!["invalid"]);
        assert!(codes(v.validate_value(&map, [has_key("b", [is::never()])])).is_empty());
        assert!(codes(v.validate_value(&map, [has_key(1, [is::never()])])).is_empty());
        assert!(codes(v.validate(&"a", [has_key("a", [is::never()])])).is_empty());
    }

    #[test]
    fn test_has_field_tag() {
        let user = StructValue::builder("User")
            .tagged_field("Name", r#"required:"false""#, "")
            .field("Nickname", "")
            .build();
        let err = match Validator::new().validate_value(&user, [each_fields([has_field_tag("required", [is::non_zero()])])]) {
            Err(Error::Validation(err)) => err,
            other => panic!("expected a validation error, got {other:?}"),
        };
        assert_eq!(err.to_string(), "(non_zero) .Name can't be blank (or zero)");
    }

    #[test]
    fn test_has_field_tag_outside_a_field() {
        let map = Value::Map(MapValue::new(Kind::String).with_entry("a", ""));
        let rule = each_values([has_field_tag("required", [is::never()])]);
        assert!(codes(Validator::new().validate_value(&map, [rule])).is_empty());
    }

    #[test]
    fn test_min_style_dispatch() {
        let rule = || -> RuleRef {
            is_numeric([is::min(2)])
                .else_when(is_string([is::length_between(2, usize::MAX)]))
                .otherwise([is::len_between(2, usize::MAX)])
                .into()
        };
        let form = StructValue::builder("Form")
            .field("Age", &1)
            .field("Name", "a")
            .field("Tags", &vec!["x"])
            .build();
        let result = Validator::new().validate_value(
            &form,
            [field("Age", [rule()]), field("Name", [rule()]), field("Tags", [rule()])],
        );
        assert_eq!(codes(result), vec!["gte", "too_short_length", "too_short_len"]);
    }
}
