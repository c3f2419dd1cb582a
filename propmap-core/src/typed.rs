use propmap_value::{PropertyMap, Value};

use crate::{ConversionError, RecordValue, Shape, TypedValue};

/// A Rust type that can be built from, and lowered into, property map values.
///
/// Implemented for the supported scalar, temporal and collection types, and generated for
/// records and fieldless enums by `#[derive(Typed)]`.
pub trait Typed: Sized {
    /// The static description of this type.
    const SHAPE: &'static Shape;

    /// The type with nullability peeled off: `T` for both `T` and `Option<T>`.
    ///
    /// Accessors that already report absence through `Option` return this.
    type Present;

    /// Captures this value as a [`TypedValue`].
    fn to_typed(&self) -> TypedValue;

    /// Materializes from a [`TypedValue`] produced against [`Self::SHAPE`].
    fn from_typed(value: TypedValue) -> Result<Self, ConversionError>;

    /// `None` if this value is null.
    fn into_present(self) -> Option<Self::Present>;

    /// `None` if this value is null.
    fn as_present(&self) -> Option<&Self::Present>;

    /// Lowers this value into its property map representation.
    fn to_value(&self) -> Value {
        self.to_typed().into_value()
    }
}

/// A [`Typed`] struct with named fields.
pub trait Record: Typed {
    /// Captures every field, in declaration order.
    fn to_record(&self) -> RecordValue;

    /// Lowers the record into a property map with one key per field.
    ///
    /// Enums become case names, temporals RFC 3339 strings, pairs two-element lists and
    /// nested records nested maps. Building from the result gives back an equal record.
    fn to_property_map(&self) -> PropertyMap {
        self.to_record().into_property_map()
    }
}

/// Implements the [`Typed`] methods that are the same for every non-nullable type.
#[macro_export]
#[doc(hidden)]
macro_rules! present_is_self {
    () => {
        type Present = Self;

        fn into_present(self) -> ::core::option::Option<Self> {
            ::core::option::Option::Some(self)
        }

        fn as_present(&self) -> ::core::option::Option<&Self> {
            ::core::option::Option::Some(self)
        }
    };
}
