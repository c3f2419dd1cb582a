//! `ValueSet`, an insertion-ordered collection of distinct values.

use core::fmt::{self, Display, Formatter};

use crate::Value;

/// A set of [`Value`]s.
///
/// `Value` holds floats and nested maps, so it is neither `Hash` nor `Ord`; membership is
/// a linear scan. Sets in property maps are small, and insertion order is kept so that
/// conversions and messages are deterministic. Equality ignores order.
#[derive(Clone, Debug, Default)]
pub struct ValueSet {
    items: Vec<Value>,
}

impl ValueSet {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds `value` unless an equal value is already present. Returns whether it was added.
    pub fn insert(&mut self, value: impl Into<Value>) -> bool {
        let value = value.into();
        if self.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Returns `true` if an equal value is present.
    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|v| v == value)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// The values as a slice, in insertion order.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl Eq for ValueSet {}

impl<V: Into<Value>> FromIterator<V> for ValueSet {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        set.extend(iter);
        set
    }
}

impl<V: Into<Value>> Extend<V> for ValueSet {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = core::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Display for ValueSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_skips_duplicates() {
        let mut set = ValueSet::new();
        assert!(set.insert("a"));
        assert!(set.insert(1));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn equality_ignores_order() {
        let a: ValueSet = ["x", "y", "z"].into_iter().collect();
        let b: ValueSet = ["z", "x", "y"].into_iter().collect();
        assert_eq!(a, b);
        let c: ValueSet = ["x", "y"].into_iter().collect();
        assert_ne!(a, c);
    }
}
