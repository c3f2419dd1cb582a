//! Converting one dynamic value against a shape.

use chrono::{DateTime, FixedOffset, Utc};
use propmap_core::{
    ConversionError, Def, EnumCase, EnumDef, ListDef, PairDef, ScalarKind, SetDef, Shape,
    TemporalKind, TypedValue,
};
use propmap_value::Value;

use crate::build::build;
use crate::tracing_macros::trace;

/// Result type for conversions.
pub type Result<T> = core::result::Result<T, ConversionError>;

/// Converts `value` into the shape `shape` demands.
///
/// Null converts to [`TypedValue::Null`] whatever the shape; refusing null is the caller's
/// business. Every error is tagged with `field` at the front of its path, unless `field`
/// is empty.
pub fn convert(value: &Value, shape: &'static Shape, field: &str) -> Result<TypedValue> {
    trace!(
        field,
        shape = shape.type_identifier,
        received = value.value_type().name(),
        "converting"
    );
    convert_value(value, shape).map_err(|e| {
        if field.is_empty() {
            e
        } else {
            e.with_path(field)
        }
    })
}

fn mismatch(shape: &'static Shape, value: &Value) -> ConversionError {
    ConversionError::type_mismatch(shape.type_identifier, value.value_type().name())
}

fn convert_value(value: &Value, shape: &'static Shape) -> Result<TypedValue> {
    if value.is_null() {
        return Ok(TypedValue::Null);
    }

    match &shape.def {
        Def::Scalar(kind) => convert_scalar(value, *kind, shape),
        Def::Temporal(kind) => convert_temporal(value, *kind, shape),
        Def::Enum(def) => convert_enum(value, def, shape),
        Def::List(def) => convert_list(value, def, shape),
        Def::Set(def) => convert_set(value, def, shape),
        Def::Pair(def) => convert_pair(value, def, shape),
        Def::DynamicMap => match value {
            Value::Map(map) => Ok(TypedValue::Map(map.clone())),
            _ => Err(mismatch(shape, value)),
        },
        Def::Record(_) => match value {
            Value::Map(map) => build(shape, map, None).map(TypedValue::Record),
            _ => Err(mismatch(shape, value)),
        },
    }
}

/// Scalars convert only to their own kind, except that integers widen to doubles.
fn convert_scalar(value: &Value, kind: ScalarKind, shape: &'static Shape) -> Result<TypedValue> {
    match (kind, value) {
        (ScalarKind::Bool, Value::Bool(b)) => Ok(TypedValue::Bool(*b)),
        (ScalarKind::Integer, Value::Int(i)) => Ok(TypedValue::Integer(*i)),
        (ScalarKind::Double, Value::Double(d)) => Ok(TypedValue::Double(*d)),
        (ScalarKind::Double, Value::Int(i)) => Ok(TypedValue::Double(*i as f64)),
        (ScalarKind::String, Value::String(s)) => Ok(TypedValue::String(s.clone())),
        _ => Err(mismatch(shape, value)),
    }
}

fn convert_temporal(
    value: &Value,
    kind: TemporalKind,
    shape: &'static Shape,
) -> Result<TypedValue> {
    let Value::String(s) = value else {
        return Err(mismatch(shape, value));
    };
    let parsed = DateTime::<FixedOffset>::parse_from_rfc3339(s)
        .map_err(|_| ConversionError::parse_failure("invalid date/time"))?;
    Ok(match kind {
        TemporalKind::Instant => TypedValue::Instant(parsed.with_timezone(&Utc)),
        TemporalKind::OffsetDateTime => TypedValue::OffsetDateTime(parsed),
    })
}

fn convert_enum(value: &Value, def: &EnumDef, shape: &'static Shape) -> Result<TypedValue> {
    let Value::String(s) = value else {
        return Err(mismatch(shape, value));
    };
    match def.find(s) {
        Some(index) => Ok(TypedValue::Enum(EnumCase {
            index,
            name: def.variants[index],
        })),
        None => Err(ConversionError::parse_failure(format!(
            "expected a valid value of type {}",
            shape.type_identifier
        ))),
    }
}

/// Lists and sets both feed either container.
fn source_items<'v>(value: &'v Value, shape: &'static Shape) -> Result<&'v [Value]> {
    match value {
        Value::List(items) => Ok(items),
        Value::Set(set) => Ok(set.as_slice()),
        _ => Err(mismatch(shape, value)),
    }
}

fn convert_items(
    items: &[Value],
    item_shape: &'static Shape,
) -> Result<impl Iterator<Item = Result<TypedValue>>> {
    if !item_shape.nullable && items.iter().any(Value::is_null) {
        return Err(ConversionError::parse_failure(
            "must contain non-null values",
        ));
    }
    Ok(items.iter().map(move |item| convert_value(item, item_shape)))
}

fn convert_list(value: &Value, def: &ListDef, shape: &'static Shape) -> Result<TypedValue> {
    let items = source_items(value, shape)?;
    let converted = convert_items(items, def.item)?.collect::<Result<Vec<_>>>()?;
    Ok(TypedValue::List(converted))
}

// Linear dedup, as in `ValueSet::insert`; sets in property maps are small.
fn convert_set(value: &Value, def: &SetDef, shape: &'static Shape) -> Result<TypedValue> {
    let items = source_items(value, shape)?;
    let mut converted: Vec<TypedValue> = Vec::with_capacity(items.len());
    for item in convert_items(items, def.item)? {
        let item = item?;
        if !converted.contains(&item) {
            converted.push(item);
        }
    }
    Ok(TypedValue::Set(converted))
}

fn convert_pair(value: &Value, def: &PairDef, shape: &'static Shape) -> Result<TypedValue> {
    let Value::List(items) = value else {
        return Err(mismatch(shape, value));
    };
    let [first, second] = items.as_slice() else {
        return Err(ConversionError::parse_failure("must have two values"));
    };
    if first.is_null() || second.is_null() {
        return Err(ConversionError::parse_failure("must have two values"));
    }
    Ok(TypedValue::Pair(Box::new((
        convert_value(first, def.first)?,
        convert_value(second, def.second)?,
    ))))
}

/// Converts a value and materializes it as `T`, tagging every error with `field`.
pub fn materialize<T: propmap_core::Typed>(value: &Value, field: &str) -> Result<T> {
    let typed = convert(value, T::SHAPE, field)?;
    T::from_typed(typed).map_err(|e| {
        if field.is_empty() {
            e
        } else {
            e.with_path(field)
        }
    })
}

/// Converts a dynamic value into `T`.
///
/// ```
/// use propmap_reflect::from_value;
/// use propmap_value::list;
///
/// let pair: (String, i64) = from_value(&list!["foo", 10]).unwrap();
/// assert_eq!(pair, ("foo".to_owned(), 10));
/// ```
pub fn from_value<T: propmap_core::Typed>(value: &Value) -> Result<T> {
    materialize(value, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use propmap_core::{ConversionErrorKind, Typed};
    use propmap_value::{list, set};

    #[test]
    fn integer_widens_to_double() {
        let typed = convert(&Value::Int(3), f64::SHAPE, "val").unwrap();
        assert_eq!(typed, TypedValue::Double(3.0));
    }

    #[test]
    fn double_does_not_narrow() {
        let err = convert(&Value::Double(3.5), i64::SHAPE, "val").unwrap_err();
        assert_eq!(err.path, ["val"]);
        assert_eq!(
            err.kind,
            ConversionErrorKind::TypeMismatch {
                expected: "i64",
                received: "double"
            }
        );
    }

    #[test]
    fn null_passes_through() {
        assert_eq!(
            convert(&Value::Null, String::SHAPE, "s").unwrap(),
            TypedValue::Null
        );
    }

    #[test]
    fn set_source_feeds_list_target() {
        let typed = convert(&set!["a", "b"], <Vec<String>>::SHAPE, "l").unwrap();
        assert_eq!(
            typed,
            TypedValue::List(vec![
                TypedValue::String("a".into()),
                TypedValue::String("b".into())
            ])
        );
    }

    #[test]
    fn list_source_feeds_set_target_without_duplicates() {
        let typed = convert(
            &list!["a", "b", "a"],
            <std::collections::BTreeSet<String>>::SHAPE,
            "s",
        )
        .unwrap();
        let TypedValue::Set(items) = typed else {
            panic!("expected a set");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn pair_rejects_null_member() {
        let err = convert(
            &list!["foo", Value::Null],
            <(String, i64)>::SHAPE,
            "pair",
        )
        .unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn instant_keeps_the_moment() {
        let typed = convert(
            &Value::from("2018-03-01T07:00:00-05:00"),
            <DateTime<Utc>>::SHAPE,
            "t",
        )
        .unwrap();
        let TypedValue::Instant(dt) = typed else {
            panic!("expected an instant");
        };
        assert_eq!(dt.to_rfc3339(), "2018-03-01T12:00:00+00:00");
    }

    #[test]
    fn out_of_range_int_fails_materialization() {
        let err = materialize::<i32>(&Value::Int(1 << 40), "count").unwrap_err();
        assert_eq!(err.path, ["count"]);
        assert!(err.is_parse_failure());
    }
}
