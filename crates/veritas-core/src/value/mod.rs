//! Dynamic value model traversed by rules
//!
//! Rules never see typed Rust data. Callers convert their data into a [`Value`]
//! through [`Reflect`], and combinators walk the resulting tree: sequences,
//! mappings and structs are containers, everything else is a scalar. A `Ref`
//! layer marks a present optional (`Some`) and `Null` marks absence, so
//! "required" style rules can tell an unset field from a set zero value.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod convert;
mod display;
mod tag;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::rule::{Capability, Validatable, ValidatableWithValidator};

pub use convert::Reflect;
pub use tag::StructTag;

/// Fine-grained runtime kind of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Seq,
    Map,
    Struct,
    Ref,
    /// Wildcard used for map key kinds that accept every key
    Any,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Seq => "seq",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Ref => "ref",
            Kind::Any => "any",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Kind::Int | Kind::Uint | Kind::Float)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse shape used by combinators to pick a traversal, borrowing the
/// payload found after pointer layers are peeled
#[derive(Debug, Clone, Copy)]
pub enum ShapeKind<'a> {
    Sequence(&'a [Value]),
    Struct(&'a StructValue),
    Mapping(&'a MapValue),
    Scalar(&'a Value),
    /// Absent value
    Invalid,
}

/// A dynamically typed value under validation
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Seq(Vec<Value>),
    Map(MapValue),
    Struct(StructValue),
    /// A present optional or pointer layer
    Ref(Box<Value>),
    /// A value that knows how to validate itself
    SelfValidating(Box<SelfValidating>),
}

impl Value {
    /// Wrap a value in a `Ref` layer
    pub fn reference(value: impl Into<Value>) -> Self {
        Value::Ref(Box::new(value.into()))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Struct(_) => Kind::Struct,
            Value::Ref(_) => Kind::Ref,
            Value::SelfValidating(sv) => sv.value.kind(),
        }
    }

    /// Peel every `Ref` and self-validating layer and return the first
    /// concrete value. `Null` means the value is absent.
    pub fn indirect(&self) -> &Value {
        let mut current = self;
        loop {
            match current {
                Value::Ref(inner) => current = inner,
                Value::SelfValidating(sv) => current = &sv.value,
                other => return other,
            }
        }
    }

    /// Peel self-validating layers only, keeping `Ref` layers intact
    pub fn unwrap_capability(&self) -> &Value {
        let mut current = self;
        while let Value::SelfValidating(sv) = current {
            current = &sv.value;
        }
        current
    }

    pub fn shape(&self) -> ShapeKind<'_> {
        match self.indirect() {
            Value::Null => ShapeKind::Invalid,
            Value::Seq(items) => ShapeKind::Sequence(items),
            Value::Map(map) => ShapeKind::Mapping(map),
            Value::Struct(s) => ShapeKind::Struct(s),
            other => ShapeKind::Scalar(other),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self.unwrap_capability(), Value::Null)
    }

    pub fn is_ref(&self) -> bool {
        matches!(self.unwrap_capability(), Value::Ref(_))
    }

    /// Whether the value equals the zero value of its kind.
    ///
    /// A `Ref` layer is never zero: `Some(0)` is a present value.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Uint(n) => *n == 0,
            Value::Float(n) => *n == 0.0,
            Value::String(s) => s.is_empty(),
            Value::Seq(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            Value::Struct(s) => s.fields.iter().all(|field| field.value.is_zero()),
            Value::Ref(_) => false,
            Value::SelfValidating(sv) => sv.value.is_zero(),
        }
    }

    /// Whether the value, after peeling `Ref` layers, is a number
    pub fn is_numeric(&self) -> bool {
        self.indirect().kind().is_numeric()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.unwrap_capability() {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.unwrap_capability() {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self.unwrap_capability() {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self.unwrap_capability() {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self.unwrap_capability() {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Element count of a string (bytes), sequence or mapping
    pub fn len(&self) -> Option<usize> {
        match self.unwrap_capability() {
            Value::String(s) => Some(s.len()),
            Value::Seq(items) => Some(items.len()),
            Value::Map(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Compare two numeric values regardless of their numeric kinds.
    ///
    /// Integers are compared exactly; any float operand switches to a float
    /// comparison. Returns `None` if either side is not numeric or is NaN.
    pub fn compare_numeric(&self, other: &Value) -> Option<Ordering> {
        fn integer(value: &Value) -> Option<i128> {
            match value {
                Value::Int(n) => Some(i128::from(*n)),
                Value::Uint(n) => Some(i128::from(*n)),
                _ => None,
            }
        }
        fn float(value: &Value) -> Option<f64> {
            match value {
                Value::Int(n) => Some(*n as f64),
                Value::Uint(n) => Some(*n as f64),
                Value::Float(n) => Some(*n),
                _ => None,
            }
        }

        let (lhs, rhs) = (self.indirect(), other.indirect());
        match (integer(lhs), integer(rhs)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => float(lhs)?.partial_cmp(&float(rhs)?),
        }
    }

    /// Attach a [`Validatable`] capability to this value.
    ///
    /// A value that already carries a [`ValidatableWithValidator`] keeps it:
    /// the richer capability wins.
    pub fn with_validatable(self, validatable: impl Validatable + 'static) -> Self {
        self.attach(Capability::Plain(Arc::new(validatable)))
    }

    /// Attach a [`ValidatableWithValidator`] capability to this value
    pub fn with_validator_hook(self, hook: impl ValidatableWithValidator + 'static) -> Self {
        self.attach(Capability::WithValidator(Arc::new(hook)))
    }

    fn attach(self, capability: Capability) -> Self {
        match self {
            Value::SelfValidating(mut sv) => {
                let keep_existing = matches!(
                    (&sv.capability, &capability),
                    (Capability::WithValidator(_), Capability::Plain(_))
                );
                if !keep_existing {
                    sv.capability = capability;
                }
                Value::SelfValidating(sv)
            }
            value => Value::SelfValidating(Box::new(SelfValidating { value, capability })),
        }
    }

    /// JSON rendering used by error reports
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(n) => JsonValue::from(*n),
            Value::Uint(n) => JsonValue::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Seq(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => JsonValue::Object(
                map.entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_json()))
                    .collect(),
            ),
            Value::Struct(s) => JsonValue::Object(
                s.fields
                    .iter()
                    .filter(|field| field.info.exported)
                    .map(|field| (field.info.name.clone(), field.value.to_json()))
                    .collect(),
            ),
            Value::Ref(inner) => inner.to_json(),
            Value::SelfValidating(sv) => sv.value.to_json(),
        }
    }

    /// Deterministic ordering used to sort keys of unordered maps
    pub(crate) fn sort_cmp(&self, other: &Value) -> Ordering {
        fn rank(value: &Value) -> u8 {
            match value {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Int(_) | Value::Uint(_) | Value::Float(_) => 2,
                Value::String(_) => 3,
                _ => 4,
            }
        }

        let (lhs, rhs) = (self.indirect(), other.indirect());
        match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            _ if lhs.kind().is_numeric() && rhs.kind().is_numeric() => {
                lhs.compare_numeric(rhs).unwrap_or(Ordering::Equal)
            }
            _ => rank(lhs)
                .cmp(&rank(rhs))
                .then_with(|| lhs.to_string().cmp(&rhs.to_string())),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::SelfValidating(a), b) => a.value == *b,
            (a, Value::SelfValidating(b)) => *a == b.value,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Struct(a), Value::Struct(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Seq(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(object) => {
                let mut map = MapValue::new(Kind::String);
                for (k, v) in object {
                    map.insert(Value::String(k), Value::from(v));
                }
                Value::Map(map)
            }
        }
    }
}

macro_rules! value_from_reflect {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    v.reflect()
                }
            }
        )*
    };
}

value_from_reflect!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, char, String, &str);

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<MapValue> for Value {
    fn from(map: MapValue) -> Self {
        Value::Map(map)
    }
}

impl From<StructValue> for Value {
    fn from(s: StructValue) -> Self {
        Value::Struct(s)
    }
}

/// A value paired with its self-validation capability
#[derive(Clone)]
pub struct SelfValidating {
    value: Value,
    capability: Capability,
}

impl SelfValidating {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn capability(&self) -> &Capability {
        &self.capability
    }
}

impl fmt::Debug for SelfValidating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capability = match self.capability {
            Capability::Plain(_) => "validatable",
            Capability::WithValidator(_) => "validatable_with_validator",
        };
        f.debug_struct("SelfValidating")
            .field("value", &self.value)
            .field("capability", &capability)
            .finish()
    }
}

/// An ordered mapping with a declared key kind
#[derive(Debug, Clone, PartialEq)]
pub struct MapValue {
    key_kind: Kind,
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new(key_kind: Kind) -> Self {
        Self {
            key_kind,
            entries: Vec::new(),
        }
    }

    pub fn key_kind(&self) -> Kind {
        self.key_kind
    }

    /// Insert an entry, replacing the value of an equal key
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`MapValue::insert`]
    pub fn with_entry(mut self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Whether a key of this kind may be used to index the map
    pub fn accepts_key(&self, key: &Value) -> bool {
        self.key_kind == Kind::Any || key.kind() == self.key_kind
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn sort_keys(&mut self) {
        self.entries.sort_by(|(a, _), (b, _)| a.sort_cmp(b));
    }
}

/// Static description of a struct field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    name: String,
    tag: StructTag,
    exported: bool,
    index: usize,
}

impl FieldInfo {
    /// An exported, untagged field
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: StructTag::default(),
            exported: true,
            index: 0,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<StructTag>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &StructTag {
        &self.tag
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Position of the field in its struct
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A field of a [`StructValue`]
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    info: Arc<FieldInfo>,
    value: Value,
}

impl StructField {
    pub fn info(&self) -> &Arc<FieldInfo> {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A named record with ordered fields
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    name: Arc<str>,
    fields: Vec<StructField>,
}

impl StructValue {
    /// Start building a struct value with the given type name
    pub fn builder(name: impl Into<Arc<str>>) -> StructBuilder {
        StructBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[StructField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|field| field.info.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`StructValue`]
///
/// ```
/// use veritas_core::{Reflect, StructValue, Value};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl Reflect for User {
///     fn reflect(&self) -> Value {
///         StructValue::builder("User")
///             .field("Name", &self.name)
///             .tagged_field("Age", r#"validate:"min=20""#, &self.age)
///             .build()
///     }
/// }
/// ```
#[derive(Debug)]
pub struct StructBuilder {
    name: Arc<str>,
    fields: Vec<StructField>,
}

impl StructBuilder {
    /// Add an exported, untagged field
    pub fn field<T: Reflect + ?Sized>(self, name: &str, value: &T) -> Self {
        self.push(FieldInfo::new(name), value.reflect())
    }

    /// Add an exported field with a raw struct tag
    pub fn tagged_field<T: Reflect + ?Sized>(self, name: &str, tag: &str, value: &T) -> Self {
        self.push(FieldInfo::new(name).with_tag(tag), value.reflect())
    }

    /// Add a non-exported field; it is skipped by field iteration rules
    pub fn private_field<T: Reflect + ?Sized>(self, name: &str, value: &T) -> Self {
        self.push(FieldInfo::new(name).with_exported(false), value.reflect())
    }

    /// Add a field from a prepared description and value
    pub fn field_value(self, info: FieldInfo, value: impl Into<Value>) -> Self {
        self.push(info, value.into())
    }

    fn push(mut self, info: FieldInfo, value: Value) -> Self {
        let info = info.with_index(self.fields.len());
        self.fields.push(StructField {
            info: Arc::new(info),
            value,
        });
        self
    }

    pub fn build_struct(self) -> StructValue {
        StructValue {
            name: self.name,
            fields: self.fields,
        }
    }

    pub fn build(self) -> Value {
        Value::Struct(self.build_struct())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, age: Option<u32>) -> Value {
        StructValue::builder("User")
            .field("Name", name)
            .field("Age", &age)
            .build()
    }

    #[test]
    fn test_indirect_peels_ref_layers() {
        let value = Value::reference(Value::reference(5));
        assert_eq!(value.kind(), Kind::Ref);
        assert_eq!(value.indirect(), &Value::Int(5));
        assert!(matches!(value.shape(), ShapeKind::Scalar(Value::Int(5))));
        assert!(matches!(Value::Null.shape(), ShapeKind::Invalid));
    }

    #[test]
    fn test_zero_values() {
        assert!(Value::Null.is_zero());
        assert!(Value::from(0).is_zero());
        assert!(Value::from(0.0).is_zero());
        assert!(Value::from("").is_zero());
        assert!(Value::Seq(vec![]).is_zero());
        assert!(user("", None).is_zero());

        assert!(!Value::reference(0).is_zero());
        assert!(!Value::from("x").is_zero());
        assert!(!user("", Some(0)).is_zero());
    }

    #[test]
    fn test_numeric_comparison_across_kinds() {
        let int = Value::Int(-1);
        let uint = Value::Uint(u64::MAX);
        assert_eq!(int.compare_numeric(&uint), Some(Ordering::Less));
        assert_eq!(
            Value::Int(20).compare_numeric(&Value::Float(20.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Value::reference(3).compare_numeric(&Value::Float(2.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::from("1").compare_numeric(&Value::Int(1)), None);
    }

    #[test]
    fn test_map_insert_replaces_existing_key() {
        let map = MapValue::new(Kind::String)
            .with_entry("a", 1)
            .with_entry("b", 2)
            .with_entry("a", 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&Value::from("a")), Some(&Value::Int(3)));
        assert!(map.accepts_key(&Value::from("z")));
        assert!(!map.accepts_key(&Value::from(1)));
        assert!(MapValue::new(Kind::Any).accepts_key(&Value::from(1)));
    }

    #[test]
    fn test_struct_builder_assigns_indexes() {
        let value = StructValue::builder("Point")
            .field("X", &1)
            .tagged_field("Y", r#"json:"y""#, &2)
            .private_field("z", &3)
            .build_struct();

        assert_eq!(value.name(), "Point");
        let indexes: Vec<usize> = value.fields().iter().map(|f| f.info().index()).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(value.field("Y").map(|f| f.info().tag().get("json")), Some("y"));
        assert!(!value.fields()[2].info().is_exported());
    }

    #[test]
    fn test_json_round_trip_shapes() {
        let json = serde_json::json!({"name": "alice", "tags": ["a", 1], "score": 1.5});
        let value = Value::from(json.clone());
        assert!(matches!(value.shape(), ShapeKind::Mapping(map) if map.len() == 3));
        assert_eq!(value.to_json(), json);
    }
}
