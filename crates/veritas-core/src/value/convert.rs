//! Conversion of Rust data into [`Value`]
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use super::{Kind, MapValue, Value};

/// Types that can be viewed as a [`Value`] for validation.
///
/// `Option<T>` maps `None` to `Value::Null` and `Some(v)` to a `Ref` layer, so
/// presence survives the conversion. Smart pointers are transparent.
pub trait Reflect {
    fn reflect(&self) -> Value;

    /// Kind produced by every value of this type, used as the key kind of
    /// reflected maps. `Kind::Any` when it varies.
    fn value_kind() -> Kind
    where
        Self: Sized,
    {
        Kind::Any
    }
}

macro_rules! reflect_scalar {
    ($variant:ident, $kind:ident, $as:ty; $($t:ty),*) => {
        $(
            impl Reflect for $t {
                fn reflect(&self) -> Value {
                    Value::$variant(*self as $as)
                }

                fn value_kind() -> Kind {
                    Kind::$kind
                }
            }
        )*
    };
}

reflect_scalar!(Int, Int, i64; i8, i16, i32, i64, isize);
reflect_scalar!(Uint, Uint, u64; u8, u16, u32, u64, usize);
reflect_scalar!(Float, Float, f64; f32, f64);

impl Reflect for bool {
    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }

    fn value_kind() -> Kind {
        Kind::Bool
    }
}

impl Reflect for char {
    fn reflect(&self) -> Value {
        Value::String(self.to_string())
    }

    fn value_kind() -> Kind {
        Kind::String
    }
}

impl Reflect for str {
    fn reflect(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl Reflect for &str {
    fn reflect(&self) -> Value {
        Value::String((*self).to_owned())
    }

    fn value_kind() -> Kind {
        Kind::String
    }
}

impl Reflect for String {
    fn reflect(&self) -> Value {
        Value::String(self.clone())
    }

    fn value_kind() -> Kind {
        Kind::String
    }
}

impl Reflect for () {
    fn reflect(&self) -> Value {
        Value::Null
    }

    fn value_kind() -> Kind {
        Kind::Null
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect(&self) -> Value {
        match self {
            Some(value) => Value::Ref(Box::new(value.reflect())),
            None => Value::Null,
        }
    }
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Arc<T> {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect + ?Sized> Reflect for Rc<T> {
    fn reflect(&self) -> Value {
        (**self).reflect()
    }
}

impl<T: Reflect> Reflect for [T] {
    fn reflect(&self) -> Value {
        Value::Seq(self.iter().map(Reflect::reflect).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }

    fn value_kind() -> Kind {
        Kind::Seq
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect(&self) -> Value {
        self.as_slice().reflect()
    }

    fn value_kind() -> Kind {
        Kind::Seq
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn reflect(&self) -> Value {
        let mut map = MapValue::new(K::value_kind());
        for (k, v) in self {
            map.insert(k.reflect(), v.reflect());
        }
        // Hash order is unstable; sort so traversal and messages are reproducible
        map.sort_keys();
        Value::Map(map)
    }

    fn value_kind() -> Kind {
        Kind::Map
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect(&self) -> Value {
        let mut map = MapValue::new(K::value_kind());
        for (k, v) in self {
            map.insert(k.reflect(), v.reflect());
        }
        Value::Map(map)
    }

    fn value_kind() -> Kind {
        Kind::Map
    }
}

impl Reflect for Value {
    fn reflect(&self) -> Value {
        self.clone()
    }
}

impl Reflect for serde_json::Value {
    fn reflect(&self) -> Value {
        Value::from(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_keeps_presence() {
        let none: Option<i32> = None;
        assert_eq!(none.reflect(), Value::Null);
        assert_eq!(Some(0).reflect(), Value::Ref(Box::new(Value::Int(0))));
        assert_eq!(Some(Some("a")).reflect().indirect(), &Value::from("a"));
    }

    #[test]
    fn test_map_key_kind_follows_key_type() {
        let mut scores = HashMap::new();
        scores.insert("bob".to_string(), 2);
        scores.insert("alice".to_string(), 1);

        let value = scores.reflect();
        let map = value.as_map().unwrap();
        assert_eq!(map.key_kind(), Kind::String);
        let keys: Vec<String> = map.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["alice", "bob"]);

        let by_id: BTreeMap<u8, bool> = [(3, true)].into_iter().collect();
        assert_eq!(by_id.reflect().as_map().unwrap().key_kind(), Kind::Uint);
    }

    #[test]
    fn test_smart_pointers_are_transparent() {
        assert_eq!(Box::new(1u8).reflect(), Value::Uint(1));
        assert_eq!(Arc::new("x".to_string()).reflect(), Value::from("x"));
        assert_eq!([1, 2].reflect(), Value::Seq(vec![Value::Int(1), Value::Int(2)]));
    }
}
