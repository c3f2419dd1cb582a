use propmap_core::UpdateSchema;
use propmap_value::{PropertyMap, Value};

use crate::ValidationError;

/// Rejects keys that are not updatable fields of any schema in `schemas`.
///
/// Every unknown key is named in a single `field_not_allowed` error. Fields marked
/// `mapped` are then checked recursively against their own schema: a nested map must
/// pass the same check, and any other non-null value is `field_content_invalid`.
pub fn check_not_allowed(
    map: &PropertyMap,
    schemas: &[&UpdateSchema],
) -> Result<(), ValidationError> {
    check_not_allowed_at(map, schemas, &[])
}

/// [`check_not_allowed`] for a map found at `path` inside an outer map.
pub fn check_not_allowed_at(
    map: &PropertyMap,
    schemas: &[&UpdateSchema],
    path: &[String],
) -> Result<(), ValidationError> {
    let allowed = schemas.iter().flat_map(|s| s.updatable()).map(|f| f.name);
    let unknown = map.keys_not_in(allowed);
    if !unknown.is_empty() {
        return Err(ValidationError::field_not_allowed(unknown, path.to_vec()));
    }

    for (field, schema) in schemas.iter().flat_map(|s| s.mapped()) {
        match map.get_value(field.name) {
            None | Some(Value::Null) => {}
            Some(Value::Map(nested)) => {
                check_not_allowed_at(nested, &[schema], &nested_path(path, field.name))?;
            }
            Some(_) => {
                return Err(ValidationError::field_content_invalid(
                    field.name,
                    path.to_vec(),
                    "expected object",
                ));
            }
        }
    }
    Ok(())
}

/// Rejects updatable, non-nullable fields that are present with a null value.
///
/// Absent fields pass; only an explicit null is refused. Fields named in `exclude` are
/// skipped. Nested maps under `mapped` fields are checked against their own schema,
/// where `exclude` no longer applies.
pub fn check_required(
    map: &PropertyMap,
    schemas: &[&UpdateSchema],
    exclude: &[&str],
) -> Result<(), ValidationError> {
    check_required_at(map, schemas, exclude, &[])
}

/// [`check_required`] for a map found at `path` inside an outer map.
pub fn check_required_at(
    map: &PropertyMap,
    schemas: &[&UpdateSchema],
    exclude: &[&str],
    path: &[String],
) -> Result<(), ValidationError> {
    let mut required_but_null: Vec<String> = Vec::new();
    for field in schemas.iter().flat_map(|s| s.updatable()) {
        if exclude.contains(&field.name) || field.is_nullable() {
            continue;
        }
        if matches!(map.get_value(field.name), Some(Value::Null))
            && !required_but_null.iter().any(|name| name == field.name)
        {
            required_but_null.push(field.name.to_owned());
        }
    }
    if !required_but_null.is_empty() {
        return Err(ValidationError::field_required(
            required_but_null,
            path.to_vec(),
        ));
    }

    for (field, schema) in schemas.iter().flat_map(|s| s.mapped()) {
        if exclude.contains(&field.name) {
            continue;
        }
        if let Some(Value::Map(nested)) = map.get_value(field.name) {
            check_required_at(nested, &[schema], &[], &nested_path(path, field.name))?;
        }
    }
    Ok(())
}

fn nested_path(path: &[String], field: &str) -> Vec<String> {
    let mut nested = Vec::with_capacity(path.len() + 1);
    nested.extend_from_slice(path);
    nested.push(field.to_owned());
    nested
}

#[cfg(test)]
mod tests {
    use super::*;
    use propmap_core::{FieldMeta, Typed};

    static CHILD: UpdateSchema = UpdateSchema::new(
        "Child",
        &const {
            [
                FieldMeta::new("a", || <String>::SHAPE).updatable(),
                FieldMeta::new("b", || <Option<String>>::SHAPE).updatable(),
                FieldMeta::new("c", || <String>::SHAPE),
            ]
        },
    );

    #[test]
    fn absent_required_fields_pass() {
        let map = PropertyMap::new();
        assert!(check_required(&map, &[&CHILD], &[]).is_ok());
    }

    #[test]
    fn not_updatable_fields_are_not_required() {
        let mut map = PropertyMap::new();
        map.insert("c", Value::Null);
        assert!(check_required(&map, &[&CHILD], &[]).is_ok());
    }

    #[test]
    fn nullable_fields_accept_null() {
        let mut map = PropertyMap::new();
        map.insert("b", Value::Null);
        assert!(check_required(&map, &[&CHILD], &[]).is_ok());
    }

    #[test]
    fn non_updatable_keys_are_not_allowed() {
        let mut map = PropertyMap::new();
        map.insert("a", "x");
        map.insert("c", "y");
        let err = check_not_allowed(&map, &[&CHILD]).unwrap_err();
        assert_eq!(err.fields, ["c"]);
    }
}
