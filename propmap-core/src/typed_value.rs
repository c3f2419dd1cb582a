use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use propmap_value::{PropertyMap, Value, ValueSet};

use crate::{ConversionError, Typed};

/// A value that has been checked against a [`Shape`](crate::Shape).
///
/// This is the meeting point of the two directions: the converter produces it from a
/// [`Value`], [`Typed::from_typed`] turns it into a Rust value, and [`Typed::to_typed`] goes
/// back.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    /// Null, for nullable shapes
    Null,
    /// A boolean
    Bool(bool),
    /// An integer
    Integer(i64),
    /// A double
    Double(f64),
    /// A string
    String(String),
    /// An instant
    Instant(DateTime<Utc>),
    /// A date-time with its original offset
    OffsetDateTime(DateTime<FixedOffset>),
    /// An enum case
    Enum(EnumCase),
    /// List items
    List(Vec<TypedValue>),
    /// Set items, distinct
    Set(Vec<TypedValue>),
    /// A pair
    Pair(Box<(TypedValue, TypedValue)>),
    /// A nested map kept untyped
    Map(PropertyMap),
    /// A record
    Record(RecordValue),
}

/// A resolved enum case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumCase {
    /// Position among the enum's cases.
    pub index: usize,
    /// Canonical name of the case.
    pub name: &'static str,
}

impl TypedValue {
    /// Short name of the variant, for messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            TypedValue::Null => "null",
            TypedValue::Bool(_) => "boolean",
            TypedValue::Integer(_) => "integer",
            TypedValue::Double(_) => "double",
            TypedValue::String(_) => "string",
            TypedValue::Instant(_) => "instant",
            TypedValue::OffsetDateTime(_) => "offset date-time",
            TypedValue::Enum(_) => "enum",
            TypedValue::List(_) => "list",
            TypedValue::Set(_) => "set",
            TypedValue::Pair(_) => "pair",
            TypedValue::Map(_) => "map",
            TypedValue::Record(_) => "record",
        }
    }

    /// Returns `true` for [`TypedValue::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    /// Lowers into the dynamic representation used in property maps.
    ///
    /// Enums become their case name, temporals RFC 3339 strings, pairs two-element lists
    /// and records nested maps.
    pub fn into_value(self) -> Value {
        match self {
            TypedValue::Null => Value::Null,
            TypedValue::Bool(b) => Value::Bool(b),
            TypedValue::Integer(i) => Value::Int(i),
            TypedValue::Double(d) => Value::Double(d),
            TypedValue::String(s) => Value::String(s),
            TypedValue::Instant(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            TypedValue::OffsetDateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            TypedValue::Enum(case) => Value::String(case.name.to_owned()),
            TypedValue::List(items) => {
                Value::List(items.into_iter().map(TypedValue::into_value).collect())
            }
            TypedValue::Set(items) => Value::Set(
                items
                    .into_iter()
                    .map(TypedValue::into_value)
                    .collect::<ValueSet>(),
            ),
            TypedValue::Pair(pair) => {
                let (first, second) = *pair;
                Value::List(vec![first.into_value(), second.into_value()])
            }
            TypedValue::Map(map) => Value::Map(map),
            TypedValue::Record(record) => Value::Map(record.into_property_map()),
        }
    }

    /// Error for a value of the wrong variant reaching `T::from_typed`.
    ///
    /// Null is reported as a missing value rather than as a kind mismatch.
    pub fn mismatch<T: Typed>(&self) -> ConversionError {
        match self {
            TypedValue::Null => ConversionError::parse_failure("must not be null"),
            other => ConversionError::type_mismatch(T::SHAPE.type_identifier, other.kind_name()),
        }
    }
}

/// Field values of a record, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordValue {
    fields: Vec<(&'static str, TypedValue)>,
}

impl RecordValue {
    /// An empty record value.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty record value with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Appends a field. Chainable, for generated code.
    pub fn with(mut self, name: &'static str, value: TypedValue) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a field, replacing an earlier one with the same name.
    pub fn push(&mut self, name: &'static str, value: TypedValue) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Iterates over fields in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &TypedValue)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Moves a field out and materializes it as `T`.
    ///
    /// A missing field materializes from null, which only nullable types accept. Errors
    /// carry the field name at the front of their path.
    pub fn take<T: Typed>(&mut self, name: &'static str) -> Result<T, ConversionError> {
        let value = self
            .fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| core::mem::replace(v, TypedValue::Null))
            .unwrap_or(TypedValue::Null);
        T::from_typed(value).map_err(|e| e.with_path(name))
    }

    /// Lowers every field into a property map.
    pub fn into_property_map(self) -> PropertyMap {
        let mut map = PropertyMap::with_capacity(self.fields.len());
        for (name, value) in self.fields {
            map.insert(name, value.into_value());
        }
        map
    }
}
