use core::fmt;

use propmap_value::PropertyKey;

use crate::{Shape, Typed};

/// A typed reference to one field of a record: its map key plus a getter.
///
/// Field tokens are generated by `#[derive(Typed)]` as associated constants named after
/// the field in upper case, so `Person::BIRTH_DATE` is a `Field<Person, DateTime<Utc>>`.
/// They key property map accessors and compare map contents against record instances.
pub struct Field<R, T> {
    name: &'static str,
    get: fn(&R) -> &T,
}

impl<R, T> Field<R, T> {
    /// Creates a field token.
    pub const fn new(name: &'static str, get: fn(&R) -> &T) -> Self {
        Self { name, get }
    }

    /// The map key.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from a record.
    pub fn get<'r>(&self, record: &'r R) -> &'r T {
        (self.get)(record)
    }
}

impl<R, T: Typed> Field<R, T> {
    /// Shape of the field's type.
    pub const fn shape(&self) -> &'static Shape {
        T::SHAPE
    }

    /// Whether the field's type accepts null.
    pub const fn is_nullable(&self) -> bool {
        T::SHAPE.nullable
    }
}

impl<R, T> Clone for Field<R, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, T> Copy for Field<R, T> {}

impl<R, T> fmt::Debug for Field<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field({})", self.name)
    }
}

impl<R, T> PropertyKey for Field<R, T> {
    fn key_name(&self) -> &str {
        self.name
    }
}
