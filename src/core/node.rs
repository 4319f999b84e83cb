// Object node: the attribute-addressable form of a loaded record.
// Each node owns its attributes outright; no sharing, no parent links.
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::core::value::Value;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    attrs: BTreeMap<String, Value>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attrs(attrs: BTreeMap<String, Value>) -> Self {
        Self { attrs }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.attrs.get_mut(key)
    }

    /// Returns the previous value when the attribute already existed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attrs.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attrs.remove(key)
    }

    /// Discards every attribute in place. The node stays usable; values
    /// moved or cloned out beforehand are unaffected.
    pub fn clean(&mut self) {
        self.attrs.clear();
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn attrs(&self) -> btree_map::Iter<'_, String, Value> {
        self.attrs.iter()
    }

    pub fn into_attrs(self) -> BTreeMap<String, Value> {
        self.attrs
    }
}

impl IntoIterator for Node {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.into_iter()
    }
}
