//! Name-keyed property storage.

use rustc_hash::FxHashMap;
use tempo_ir::Name;

use crate::Value;

/// Map from interned identifier to value.
///
/// Backs the global property bag, the local properties of function and
/// callback instances, and script object literals. Reading an absent
/// property yields `undefined`, matching script semantics.
#[derive(Clone, Debug, Default)]
pub struct PropertyBag {
    properties: FxHashMap<Name, Value>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a property, `undefined` if absent.
    #[inline]
    pub fn get(&self, name: Name) -> Value {
        self.properties.get(&name).cloned().unwrap_or_default()
    }

    /// Write a property, creating it if absent.
    #[inline]
    pub fn set(&mut self, name: Name, value: Value) {
        self.properties.insert(name, value);
    }

    /// Remove a property, returning its old value.
    pub fn remove(&mut self, name: Name) -> Option<Value> {
        self.properties.remove(&name)
    }

    /// Whether the property exists.
    pub fn contains(&self, name: Name) -> bool {
        self.properties.contains_key(&name)
    }

    /// Drop every property.
    pub fn clear(&mut self) {
        self.properties.clear();
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate over `(name, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.properties.iter().map(|(name, value)| (*name, value))
    }
}

impl FromIterator<(Name, Value)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        PropertyBag {
            properties: iter.into_iter().collect(),
        }
    }
}
