//! Locations of values inside the validated tree
//!
//! A [`Location`] is an immutable, shared node pointing at its parent. Diving
//! into a child creates a new node, so sibling locations share their ancestry
//! and a location can be handed to any number of threads.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::sync::Arc;

use crate::value::{FieldInfo, Value};

/// The kind of step a [`Location`] represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    Root,
    Field,
    Index,
    MapKey,
    MapValue,
}

#[derive(Debug)]
enum Segment {
    Root,
    Field(Arc<FieldInfo>),
    Index(usize),
    MapKey(Value),
    MapValue(Value),
}

#[derive(Debug)]
struct Node {
    parent: Option<Location>,
    segment: Segment,
}

/// Position of a value relative to the root of a validation
#[derive(Clone)]
pub struct Location(Arc<Node>);

impl Location {
    /// A fresh root location
    pub fn new() -> Self {
        Self(Arc::new(Node {
            parent: None,
            segment: Segment::Root,
        }))
    }

    fn child(&self, segment: Segment) -> Self {
        Self(Arc::new(Node {
            parent: Some(self.clone()),
            segment,
        }))
    }

    pub fn kind(&self) -> LocationKind {
        match self.0.segment {
            Segment::Root => LocationKind::Root,
            Segment::Field(_) => LocationKind::Field,
            Segment::Index(_) => LocationKind::Index,
            Segment::MapKey(_) => LocationKind::MapKey,
            Segment::MapValue(_) => LocationKind::MapValue,
        }
    }

    pub fn is_root(&self) -> bool {
        self.kind() == LocationKind::Root
    }

    /// The enclosing location.
    ///
    /// # Panics
    ///
    /// Panics on a root location.
    pub fn parent(&self) -> &Location {
        match &self.0.parent {
            Some(parent) => parent,
            None => panic!("Location::parent called on a root location"),
        }
    }

    /// The enclosing location, or `None` at the root
    pub fn try_parent(&self) -> Option<&Location> {
        self.0.parent.as_ref()
    }

    /// # Panics
    ///
    /// Panics unless the kind is [`LocationKind::Field`].
    pub fn field(&self) -> &Arc<FieldInfo> {
        match &self.0.segment {
            Segment::Field(field) => field,
            _ => panic!("Location::field requires LocationKind::Field, got {:?}", self.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless the kind is [`LocationKind::Index`].
    pub fn index(&self) -> usize {
        match self.0.segment {
            Segment::Index(index) => index,
            _ => panic!("Location::index requires LocationKind::Index, got {:?}", self.kind()),
        }
    }

    /// # Panics
    ///
    /// Panics unless the kind is [`LocationKind::MapKey`] or [`LocationKind::MapValue`].
    pub fn key(&self) -> &Value {
        match &self.0.segment {
            Segment::MapKey(key) | Segment::MapValue(key) => key,
            _ => panic!(
                "Location::key requires LocationKind::MapKey or LocationKind::MapValue, got {:?}",
                self.kind()
            ),
        }
    }

    pub fn field_location(&self, field: impl Into<Arc<FieldInfo>>) -> Location {
        self.child(Segment::Field(field.into()))
    }

    pub fn index_location(&self, index: usize) -> Location {
        self.child(Segment::Index(index))
    }

    pub fn map_key_location(&self, key: impl Into<Value>) -> Location {
        self.child(Segment::MapKey(key.into()))
    }

    pub fn map_value_location(&self, key: impl Into<Value>) -> Location {
        self.child(Segment::MapValue(key.into()))
    }

    /// Identity comparison: true only for the very same node
    pub fn is_same(&self, other: &Location) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Number of steps from the root
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = current.try_parent() {
            depth += 1;
            current = parent;
        }
        depth
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Location")
            .field(&DefaultLocationNameResolver.resolve_location_name(self))
            .finish()
    }
}

/// Renders a [`Location`] as a human-readable name
pub trait LocationNameResolver: Send + Sync {
    fn resolve_location_name(&self, location: &Location) -> String;
}

/// `.Field`, `[0]`, `[key: k]` for map keys and `[k]` for map values
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocationNameResolver;

/// Field names from the `json` tag, `#k` for map keys and `.k` for map values
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLocationNameResolver;

/// Like [`JsonLocationNameResolver`], falling back to the `query` tag
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestLocationNameResolver;

impl LocationNameResolver for DefaultLocationNameResolver {
    fn resolve_location_name(&self, location: &Location) -> String {
        match &location.0.segment {
            Segment::Root => String::new(),
            Segment::Field(field) => format!("{}.{}", self.resolve_location_name(location.parent()), field.name()),
            Segment::Index(index) => format!("{}[{index}]", self.resolve_location_name(location.parent())),
            Segment::MapKey(key) => format!("{}[key: {key}]", self.resolve_location_name(location.parent())),
            Segment::MapValue(key) => format!("{}[{key}]", self.resolve_location_name(location.parent())),
        }
    }
}

impl LocationNameResolver for JsonLocationNameResolver {
    fn resolve_location_name(&self, location: &Location) -> String {
        resolve_tagged(self, location, &["json"])
    }
}

impl LocationNameResolver for RequestLocationNameResolver {
    fn resolve_location_name(&self, location: &Location) -> String {
        resolve_tagged(self, location, &["json", "query"])
    }
}

fn resolve_tagged<R: LocationNameResolver>(resolver: &R, location: &Location, tag_keys: &[&str]) -> String {
    match &location.0.segment {
        Segment::Root => String::new(),
        Segment::Field(field) => {
            let name = tag_keys
                .iter()
                .find_map(|key| tagged_name(field, key))
                .unwrap_or_else(|| field.name());
            format!("{}.{name}", resolver.resolve_location_name(location.parent()))
        }
        Segment::Index(index) => format!("{}[{index}]", resolver.resolve_location_name(location.parent())),
        Segment::MapKey(key) => format!("{}#{key}", resolver.resolve_location_name(location.parent())),
        Segment::MapValue(key) => format!("{}.{key}", resolver.resolve_location_name(location.parent())),
    }
}

/// First attribute of a tag like `json:"name,omitempty"`, ignoring `-`
fn tagged_name<'a>(field: &'a FieldInfo, key: &str) -> Option<&'a str> {
    let value = field.tag().get(key);
    if value.is_empty() || value == "-" {
        return None;
    }
    value.split(',').next().filter(|name| !name.is_empty())
}
