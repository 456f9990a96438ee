//! `Map` - an insertion-ordered mapping from [`Key`] to [`Value`] (§3
//! "Map").
//!
//! Backed by `indexmap::IndexMap`, the "indexed vector plus hash from key
//! to index" structure the design notes call for (§9 "Map insertion
//! order") instead of a plain hash map, so that `load -> write` preserves
//! the source's key order exactly.

use crate::types::{KType, TypeName};
use crate::value::{Key, Value};
use indexmap::IndexMap;

#[derive(Clone, Debug, Default)]
pub struct UxfMap {
    pub ktype: Option<KType>,
    pub vtype: Option<TypeName>,
    pub comment: Option<String>,
    items: IndexMap<Key, Value>,
}

impl UxfMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair. If `key` was already present, the value is
    /// replaced in place (last-write-wins, §4.3) and the previous value is
    /// returned; callers that need the "duplicate key" warning do that
    /// check before calling this (the model itself never emits
    /// diagnostics, §9 "Error plumbing").
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.items.insert(key, value)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.items.contains_key(key)
    }

    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, Key, Value> {
        self.items.iter_mut()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Key, Value> {
        self.items.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Key, Value> {
        self.items.values()
    }
}

impl PartialEq for UxfMap {
    fn eq(&self, other: &Self) -> bool {
        self.ktype == other.ktype
            && self.vtype == other.vtype
            && self.items.len() == other.items.len()
            && self.items.iter().eq(other.items.iter())
    }
}

impl FromIterator<(Key, Value)> for UxfMap {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        Self {
            ktype: None,
            vtype: None,
            comment: None,
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a UxfMap {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved_on_iteration() {
        let mut map = UxfMap::new();
        map.insert(Key::Str("b".into()), Value::Int(2));
        map.insert(Key::Str("a".into()), Value::Int(1));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![Key::Str("b".into()), Key::Str("a".into())]);
    }

    #[test]
    fn re_inserting_a_key_replaces_value_but_not_position() {
        let mut map = UxfMap::new();
        map.insert(Key::Str("a".into()), Value::Int(1));
        map.insert(Key::Str("b".into()), Value::Int(2));
        let old = map.insert(Key::Str("a".into()), Value::Int(99));
        assert_eq!(old, Some(Value::Int(1)));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec![Key::Str("a".into()), Key::Str("b".into())]);
        assert_eq!(map.get(&Key::Str("a".into())), Some(&Value::Int(99)));
    }

    #[test]
    fn equality_ignores_internal_capacity_only_checks_contents() {
        let mut a = UxfMap::new();
        a.insert(Key::Int(1), Value::Bool(true));
        let mut b = UxfMap::new();
        b.insert(Key::Int(1), Value::Bool(true));
        assert_eq!(a, b);
    }
}
