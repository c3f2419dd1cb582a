//! `PropertyMap`, the string-keyed bag of dynamic values.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::Index;

use indexmap::IndexMap;

use crate::Value;

/// Anything that names a key in a [`PropertyMap`].
///
/// Implemented for string types here and for typed field tokens in `propmap-core`, so the
/// raw map operations accept either.
pub trait PropertyKey {
    /// The key under which the value is stored.
    fn key_name(&self) -> &str;
}

impl PropertyKey for str {
    fn key_name(&self) -> &str {
        self
    }
}

impl PropertyKey for String {
    fn key_name(&self) -> &str {
        self
    }
}

impl<K: PropertyKey + ?Sized> PropertyKey for &K {
    fn key_name(&self) -> &str {
        (**self).key_name()
    }
}

/// Error returned by [`PropertyMap::try_from_pairs`] when two pairs share a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateKey {
    /// The key that appeared more than once.
    pub key: String,
}

impl Display for DuplicateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate property key `{}`", self.key)
    }
}

impl core::error::Error for DuplicateKey {}

/// A mapping from string keys to dynamic [`Value`]s.
///
/// Keys are unique. Insertion order is kept (so diagnostics list keys in a stable order)
/// but is not part of equality.
#[derive(Clone, Default)]
pub struct PropertyMap {
    entries: IndexMap<String, Value>,
}

impl PropertyMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a map from `(key, value)` pairs, rejecting repeated keys.
    pub fn try_from_pairs<K, V, I>(pairs: I) -> Result<Self, DuplicateKey>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let mut map = Self::with_capacity(pairs.size_hint().0);
        for (key, value) in pairs {
            let key = key.into();
            if map.entries.contains_key(&key) {
                return Err(DuplicateKey { key });
            }
            map.entries.insert(key, value.into());
        }
        Ok(map)
    }

    /// Builds a map from `(key, value)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if two pairs share a key. Use [`PropertyMap::try_from_pairs`] to handle that
    /// case as an error.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        match Self::try_from_pairs(pairs) {
            Ok(map) => map,
            Err(err) => panic!("property map keys overlap after conversion: {err}"),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the raw value under `key`. An explicit null is `Some(&Value::Null)`.
    pub fn get_value<K: PropertyKey + ?Sized>(&self, key: &K) -> Option<&Value> {
        self.entries.get(key.key_name())
    }

    /// Returns the raw value under `key`, mutably.
    pub fn get_mut<K: PropertyKey + ?Sized>(&mut self, key: &K) -> Option<&mut Value> {
        self.entries.get_mut(key.key_name())
    }

    /// Removes and returns the raw value under `key`, keeping the order of the others.
    pub fn remove_value<K: PropertyKey + ?Sized>(&mut self, key: &K) -> Option<Value> {
        self.entries.shift_remove(key.key_name())
    }

    /// Returns `true` if `key` is present, even when its value is null.
    pub fn contains_key<K: PropertyKey + ?Sized>(&self, key: &K) -> bool {
        self.entries.contains_key(key.key_name())
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys of this map that are not among `names`, in insertion order.
    pub fn keys_not_in<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<S> = names.into_iter().collect();
        self.keys()
            .filter(|key| !names.iter().any(|n| n.as_ref() == *key))
            .map(str::to_owned)
            .collect()
    }
}

impl PartialEq for PropertyMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.entries.get(k) == Some(v))
    }
}

impl Eq for PropertyMap {}

impl Debug for PropertyMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl Display for PropertyMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k:?}: {v}")?;
        }
        f.write_str("}")
    }
}

impl<K: PropertyKey + ?Sized> Index<&K> for PropertyMap {
    type Output = Value;

    fn index(&self, key: &K) -> &Value {
        match self.get_value(key) {
            Some(v) => v,
            None => panic!("no property `{}` in map", key.key_name()),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for PropertyMap {
    /// Later pairs overwrite earlier ones; use [`PropertyMap::from_pairs`] to reject them.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for PropertyMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for PropertyMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
