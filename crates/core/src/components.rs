//! Deterministic persistent data blob.
//!
//! Item stacks carry a typed key-value map that is saved and replicated with
//! the stack. Keys are ordered so serialization is stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typed key-value map attached to an item stack.
///
/// Typed accessors return `None` when the key is missing or holds a value of
/// a different kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMap {
    components: BTreeMap<String, ComponentValue>,
}

impl ComponentMap {
    /// Create an empty component map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a component value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: ComponentValue,
    ) -> Option<ComponentValue> {
        self.components.insert(key.into(), value)
    }

    /// Get a component value.
    pub fn get(&self, key: &str) -> Option<&ComponentValue> {
        self.components.get(key)
    }

    /// Remove a component value.
    pub fn remove(&mut self, key: &str) -> Option<ComponentValue> {
        self.components.remove(key)
    }

    /// True if `key` is present and holds a value of `kind`.
    pub fn has(&self, key: &str, kind: ComponentKind) -> bool {
        self.get(key).is_some_and(|value| value.kind() == kind)
    }

    /// Read a byte component.
    pub fn get_byte(&self, key: &str) -> Option<u8> {
        match self.get(key)? {
            ComponentValue::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// Read an int component.
    pub fn get_int(&self, key: &str) -> Option<i32> {
        match self.get(key)? {
            ComponentValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Read a long component.
    pub fn get_long(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            ComponentValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Write a byte component.
    pub fn set_byte(&mut self, key: impl Into<String>, value: u8) {
        self.insert(key, ComponentValue::Byte(value));
    }

    /// Write an int component.
    pub fn set_int(&mut self, key: impl Into<String>, value: i32) {
        self.insert(key, ComponentValue::Int(value));
    }

    /// Write a long component.
    pub fn set_long(&mut self, key: impl Into<String>, value: i64) {
        self.insert(key, ComponentValue::Long(value));
    }

    /// Iterate over components in deterministic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentValue)> {
        self.components.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns true if the map contains no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }
}

/// Tag identifying the variant of a [`ComponentValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// 8-bit unsigned.
    Byte,
    /// 32-bit signed.
    Int,
    /// 64-bit signed.
    Long,
}

/// Persisted component value. Integers only, so saved data is identical on
/// every platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ComponentValue {
    /// 8-bit unsigned value.
    Byte(u8),
    /// 32-bit signed value.
    Int(i32),
    /// 64-bit signed value.
    Long(i64),
}

impl ComponentValue {
    /// Kind tag of this value.
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentValue::Byte(_) => ComponentKind::Byte,
            ComponentValue::Int(_) => ComponentKind::Int,
            ComponentValue::Long(_) => ComponentKind::Long,
        }
    }
}
