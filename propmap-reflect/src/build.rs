//! Assembling records from supplied values, an optional existing record and defaults.

use std::borrow::Cow;

use propmap_core::{ConversionError, Record, RecordValue, Shape, Typed, TypedValue};
use propmap_value::{PropertyMap, Value};

use crate::Result;
use crate::convert::convert;
use crate::tracing_macros::debug;

/// Builds a record of shape `shape`.
///
/// Fields are visited in declaration order. A field supplied in `supplied` is converted;
/// when both the supplied value and the existing field value are records, the nested
/// record is patched rather than replaced. A field that is not supplied keeps its value
/// from `existing`, then falls back to its default, then to null if nullable. Fields left
/// without a value are reported together in one error.
pub fn build(
    shape: &'static Shape,
    supplied: &PropertyMap,
    existing: Option<&RecordValue>,
) -> Result<RecordValue> {
    let Some(def) = shape.as_record() else {
        return Err(ConversionError::type_mismatch(shape.type_identifier, "map"));
    };
    debug!(
        record = shape.type_identifier,
        supplied = supplied.len(),
        patch = existing.is_some(),
        "building record"
    );

    let mut record = RecordValue::with_capacity(def.fields.len());
    let mut missing = Vec::new();

    for field in def.fields {
        let field_shape = field.shape();
        let current = existing.and_then(|e| e.get(field.name));

        let value = match supplied.get_value(field.name) {
            Some(Value::Null) if !field_shape.nullable => {
                return Err(
                    ConversionError::parse_failure("must not be null").with_path(field.name)
                );
            }
            Some(value) => match (value, current) {
                (Value::Map(nested), Some(TypedValue::Record(current)))
                    if field_shape.is_record() =>
                {
                    let merged = build(field_shape, nested, Some(current))
                        .map_err(|e| e.with_path(field.name))?;
                    TypedValue::Record(merged)
                }
                _ => convert(value, field_shape, field.name)?,
            },
            None => match (current, field.default) {
                (Some(current), _) => current.clone(),
                (None, Some(default)) => default(),
                (None, None) if field_shape.nullable => TypedValue::Null,
                (None, None) => {
                    missing.push(field.name);
                    continue;
                }
            },
        };
        record.push(field.name, value);
    }

    if !missing.is_empty() {
        return Err(ConversionError::parse_failure(format!(
            "missing value for field(s) [{}]",
            missing.join(", ")
        )));
    }
    Ok(record)
}

/// Builds a `T` from a property map alone.
///
/// Keys that name no field of `T` are ignored.
pub fn build_from_map<T: Typed>(map: &PropertyMap) -> Result<T> {
    let record = build(T::SHAPE, map, None)?;
    T::from_typed(TypedValue::Record(record))
}

/// Returns a copy of `existing` with the fields supplied in `map` replaced.
///
/// Nested records supplied as maps are merged into the existing nested record, so their
/// unsupplied fields survive. Keys listed in `exclude` are ignored.
pub fn patch<T: Record>(map: &PropertyMap, existing: &T, exclude: &[&str]) -> Result<T> {
    let supplied = if exclude.is_empty() {
        Cow::Borrowed(map)
    } else {
        let mut filtered = map.clone();
        for key in exclude {
            filtered.remove_value(*key);
        }
        Cow::Owned(filtered)
    };
    let current = existing.to_record();
    let record = build(T::SHAPE, &supplied, Some(&current))?;
    T::from_typed(TypedValue::Record(record))
}
