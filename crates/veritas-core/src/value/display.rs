//! Human-readable rendering of values inside messages
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::fmt::{self, Display, Formatter, Write};

use super::{MapValue, StructValue, Value};

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Uint(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Seq(items) => write_list(f, items.iter()),
            Value::Map(map) => map.fmt(f),
            Value::Struct(s) => s.fmt(f),
            Value::Ref(inner) => inner.fmt(f),
            Value::SelfValidating(sv) => sv.value().fmt(f),
        }
    }
}

impl Display for MapValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("map[")?;
        for (i, (k, v)) in self.entries().iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{k}:{v}")?;
        }
        f.write_char(']')
    }
}

impl Display for StructValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, field) in self.fields().iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            field.value().fmt(f)?;
        }
        f.write_char('}')
    }
}

fn write_list<'a>(f: &mut Formatter<'_>, items: impl Iterator<Item = &'a Value>) -> fmt::Result {
    f.write_char('[')?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        item.fmt(f)?;
    }
    f.write_char(']')
}
