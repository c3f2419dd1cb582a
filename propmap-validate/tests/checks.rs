use propmap_core::Updatable;
use propmap_macros::Typed;
use propmap_testhelpers::test;
use propmap_validate::{InvalidInputData, check_not_allowed, check_required};
use propmap_value::{Value, propmap};

#[derive(Typed, Debug)]
#[propmap(crate = "propmap_core")]
#[allow(dead_code)]
struct CheckUpdatable {
    s1: String,
    s2: String,
    #[propmap(updatable)]
    s3: String,
    #[propmap(updatable)]
    s4: String,
}

#[derive(Typed, Debug)]
#[propmap(crate = "propmap_core")]
#[allow(dead_code)]
struct CheckUpdatableParent {
    #[propmap(updatable, mapped)]
    c1: CheckUpdatable,
    #[propmap(updatable, mapped)]
    c2: Option<CheckUpdatable>,
}

#[derive(Typed, Debug)]
#[propmap(crate = "propmap_core")]
#[propmap(updatable)]
#[allow(dead_code)]
struct Profile {
    nickname: Option<String>,
    age: i64,
}

#[test]
fn keys_outside_the_schema_are_not_allowed() {
    let map = propmap! { "s1" => "abc" };
    let err = check_not_allowed(&map, &[CheckUpdatable::UPDATE_SCHEMA]).unwrap_err();
    assert_eq!(err.reason, InvalidInputData::FieldNotAllowed);
    insta::assert_snapshot!(err, @"Field(s) [s1] not allowed for this operation.");

    let map = propmap! { "s3" => "abc" };
    assert!(check_not_allowed(&map, &[CheckUpdatable::UPDATE_SCHEMA]).is_ok());
}

#[test]
fn every_unknown_key_is_named_once() {
    let map = propmap! { "s1" => "a", "s3" => "b", "s2" => "c" };
    let err = check_not_allowed(&map, &[CheckUpdatable::UPDATE_SCHEMA]).unwrap_err();
    assert_eq!(err.fields, ["s1", "s2"]);
}

#[test]
fn mapped_fields_are_checked_recursively() {
    let map = propmap! {
        "c1" => propmap! { "s3" => "abc-1" },
        "c2" => propmap! { "s3" => "abc-2" },
    };
    assert!(check_not_allowed(&map, &[CheckUpdatableParent::UPDATE_SCHEMA]).is_ok());

    let map = propmap! {
        "c1" => propmap! { "s1" => "abc" },
        "c2" => propmap! { "s3" => "abc" },
    };
    let err = check_not_allowed(&map, &[CheckUpdatableParent::UPDATE_SCHEMA]).unwrap_err();
    assert_eq!(err.fields, ["s1"]);
    assert_eq!(err.path, ["c1"]);
    insta::assert_snapshot!(err, @"Field(s) [s1 @ c1] not allowed for this operation.");
}

#[test]
fn mapped_fields_must_hold_objects() {
    let map = propmap! { "c1" => "not a map" };
    let err = check_not_allowed(&map, &[CheckUpdatableParent::UPDATE_SCHEMA]).unwrap_err();
    assert_eq!(err.code(), "field_content_invalid");
    insta::assert_snapshot!(err, @"Field [c1] is invalid: expected object.");

    let map = propmap! { "c2" => Value::Null };
    assert!(check_not_allowed(&map, &[CheckUpdatableParent::UPDATE_SCHEMA]).is_ok());
}

#[test]
fn schemas_are_checked_as_a_union() {
    let map = propmap! { "s3" => "a", "age" => 3 };
    let schemas = [CheckUpdatable::UPDATE_SCHEMA, Profile::UPDATE_SCHEMA];
    assert!(check_not_allowed(&map, &schemas).is_ok());
    assert!(check_not_allowed(&map, &schemas[..1]).is_err());
}

#[test]
fn present_nulls_for_required_fields_fail() {
    let map = propmap! { "s3" => "abc" };
    assert!(check_required(&map, &[CheckUpdatable::UPDATE_SCHEMA], &[]).is_ok());

    let map = propmap! { "s3" => Value::Null, "s4" => Value::Null };
    let err = check_required(&map, &[CheckUpdatable::UPDATE_SCHEMA], &[]).unwrap_err();
    assert_eq!(err.reason, InvalidInputData::FieldRequired);
    insta::assert_snapshot!(err, @"Field(s) [s3, s4] required for this operation.");

    let map = propmap! { "s3" => Value::Null };
    assert!(check_required(&map, &[CheckUpdatable::UPDATE_SCHEMA], &["s3"]).is_ok());
}

#[test]
fn class_level_updatable_covers_every_field() {
    let map = propmap! { "nickname" => Value::Null, "age" => Value::Null };
    let err = check_required(&map, &[Profile::UPDATE_SCHEMA], &[]).unwrap_err();
    assert_eq!(err.fields, ["age"]);
}

#[test]
fn required_check_descends_into_mapped_fields() {
    let map = propmap! { "c1" => propmap! { "s4" => Value::Null } };
    let err = check_required(&map, &[CheckUpdatableParent::UPDATE_SCHEMA], &[]).unwrap_err();
    insta::assert_snapshot!(err, @"Field(s) [s4 @ c1] required for this operation.");
}

#[test]
fn validation_is_repeatable() {
    let map = propmap! { "c1" => propmap! { "s1" => "abc" } };
    let first = check_not_allowed(&map, &[CheckUpdatableParent::UPDATE_SCHEMA]);
    let second = check_not_allowed(&map, &[CheckUpdatableParent::UPDATE_SCHEMA]);
    assert_eq!(first, second);
}
