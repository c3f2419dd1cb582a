#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use propmap_core::*;

/// Derives [`Typed`](trait@Typed), [`Record`] and [`Updatable`] for structs with named
/// fields, and [`Typed`](trait@Typed) for fieldless enums.
///
/// Container attributes:
/// - `#[propmap(updatable)]`: every field may appear in a patch.
/// - `#[propmap(crate = "path")]`: where to find this crate, `::propmap` by default.
///
/// Field attributes:
/// - `#[propmap(updatable)]`: the field may appear in a patch.
/// - `#[propmap(updatable, mapped)]`: the field holds a record whose own updatable
///   fields are validated recursively.
/// - `#[propmap(default)]`, `#[propmap(default = expr)]`: value used when a map being
///   built omits the field.
/// - `#[propmap(rename = "key")]`: map key, the field name by default.
///
/// Enum variants accept `#[propmap(rename = "NAME")]`.
pub use propmap_macros::Typed;

pub use propmap_value::{
    DuplicateKey, PropertyKey, PropertyMap, Value, ValueSet, ValueType, list, propmap, set,
};

pub use propmap_reflect::{build, build_from_map, convert, from_value, materialize, patch};

pub use propmap_validate::{
    InvalidInputData, ValidationError, check_not_allowed, check_not_allowed_at, check_required,
    check_required_at,
};

mod ext;
pub use ext::*;
