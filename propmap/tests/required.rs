use propmap::{InvalidInputData, PropertyMapExt, Typed, Value, propmap};
use propmap_testhelpers::test;

#[derive(Typed, Debug, PartialEq)]
#[allow(dead_code)]
struct SimpleValues {
    int_regular: i64,
    int_regular_nullable: Option<i64>,
    string_regular: String,
    string_regular_nullable: Option<String>,
    boolean_false: bool,
    boolean_nullable: Option<bool>,
}

#[test]
fn required_values_must_be_present_and_non_null() {
    let input = propmap! {
        SimpleValues::STRING_REGULAR => Value::Null,
        SimpleValues::STRING_REGULAR_NULLABLE => Value::Null,
        SimpleValues::INT_REGULAR => 5,
        SimpleValues::INT_REGULAR_NULLABLE => 6,
    };

    let err = input.required(SimpleValues::STRING_REGULAR).unwrap_err();
    assert_eq!(err.reason, InvalidInputData::FieldRequired);
    insta::assert_snapshot!(err, @"Field(s) [string_regular] required for this operation.");

    assert!(input.required(SimpleValues::STRING_REGULAR_NULLABLE).is_err());
    assert_eq!(input.required(SimpleValues::INT_REGULAR).unwrap(), 5);
    assert_eq!(input.required(SimpleValues::INT_REGULAR_NULLABLE).unwrap(), 6);

    assert!(input.required(SimpleValues::BOOLEAN_FALSE).is_err());
    assert!(input.required(SimpleValues::BOOLEAN_NULLABLE).is_err());
}

#[test]
fn required_reports_conversion_failures_as_validation_errors() {
    let input = propmap! { SimpleValues::INT_REGULAR => "6" };
    let err = input.required(SimpleValues::INT_REGULAR).unwrap_err();
    assert_eq!(err.reason, InvalidInputData::FieldTypeInvalid);
    assert_eq!(err.fields, ["int_regular"]);
    insta::assert_snapshot!(err, @"Field [int_regular] has an invalid data type, expected i64 but received string.");
}

#[test]
fn required_nullable_values_must_be_present() {
    let input = propmap! {
        SimpleValues::STRING_REGULAR => Value::Null,
        SimpleValues::STRING_REGULAR_NULLABLE => Value::Null,
        SimpleValues::BOOLEAN_NULLABLE => true,
    };

    assert_eq!(
        input
            .required_nullable(SimpleValues::STRING_REGULAR_NULLABLE)
            .unwrap(),
        None
    );
    assert_eq!(
        input.required_nullable(SimpleValues::BOOLEAN_NULLABLE).unwrap(),
        Some(true)
    );
    let err = input
        .required_nullable(SimpleValues::INT_REGULAR_NULLABLE)
        .unwrap_err();
    assert_eq!(err.code(), "field_required");
}

#[test]
#[should_panic(expected = "only be used with nullable fields")]
fn required_nullable_rejects_non_nullable_fields() {
    let input = propmap! { SimpleValues::STRING_REGULAR => Value::Null };
    let _ = input.required_nullable(SimpleValues::STRING_REGULAR);
}
