use propmap::{PropertyMapExt, Typed, Value, propmap};
use propmap_testhelpers::test;

#[derive(Typed, Debug, PartialEq)]
struct IntValues {
    val1: i64,
    val2: i64,
    val3: i64,
}

#[derive(Typed, Debug, PartialEq)]
struct BooleanValues {
    val1: Option<bool>,
}

#[test]
fn changes_relative_to_a_record() {
    let input = propmap! { "foo" => 1, IntValues::VAL1 => 1, IntValues::VAL2 => 2 };
    let same = IntValues {
        val1: 1,
        val2: 2,
        val3: 3,
    };
    let other = IntValues {
        val1: 10,
        val2: 11,
        val3: 12,
    };

    assert!(!input.has_changed_from(IntValues::VAL1, &same).unwrap());
    assert!(!input.has_changed_from(IntValues::VAL2, &same).unwrap());
    assert!(!input.has_changed_from(IntValues::VAL3, &same).unwrap());

    assert!(input.has_changed_from(IntValues::VAL1, &other).unwrap());
    assert!(input.has_changed_from(IntValues::VAL2, &other).unwrap());
    assert!(!input.has_changed_from(IntValues::VAL3, &other).unwrap());
}

#[test]
fn null_is_a_value_when_comparing() {
    let is_true = BooleanValues { val1: Some(true) };
    let is_false = BooleanValues { val1: Some(false) };
    let is_null = BooleanValues { val1: None };

    let input = propmap! { BooleanValues::VAL1 => Value::Null };
    assert!(input.has_changed_from(BooleanValues::VAL1, &is_true).unwrap());
    assert!(input.has_changed_from(BooleanValues::VAL1, &is_false).unwrap());
    assert!(!input.has_changed_from(BooleanValues::VAL1, &is_null).unwrap());

    let input = propmap! { BooleanValues::VAL1 => true };
    assert!(!input.has_changed_from(BooleanValues::VAL1, &is_true).unwrap());
    assert!(input.has_changed_from(BooleanValues::VAL1, &is_false).unwrap());
    assert!(input.has_changed_from(BooleanValues::VAL1, &is_null).unwrap());
}

#[test]
fn changes_relative_to_a_computed_value() {
    let input = propmap! { "foo" => 1, IntValues::VAL1 => 1, IntValues::VAL2 => 2 };
    assert!(!input.has_changed_with(IntValues::VAL1, || 1).unwrap());
    assert!(input.has_changed_with(IntValues::VAL1, || 10).unwrap());
    assert!(
        !input
            .has_changed_with(IntValues::VAL3, || panic!("absent fields are not compared"))
            .unwrap()
    );

    let input = propmap! { BooleanValues::VAL1 => true };
    assert!(!input.has_changed_with(BooleanValues::VAL1, || Some(true)).unwrap());
    assert!(input.has_changed_with(BooleanValues::VAL1, || Some(false)).unwrap());
    assert!(input.has_changed_with(BooleanValues::VAL1, || None).unwrap());
}

#[test]
fn block_runs_only_on_change() {
    let input = propmap! { IntValues::VAL1 => 1 };
    let unchanged = IntValues {
        val1: 1,
        val2: 2,
        val3: 3,
    };
    let changed = IntValues {
        val1: 4,
        val2: 5,
        val3: 6,
    };

    input
        .with_changed_from(IntValues::VAL1, &unchanged, |_| {
            panic!("value did not change")
        })
        .unwrap();

    let mut seen = None;
    input
        .with_changed_from(IntValues::VAL1, &changed, |v| seen = v)
        .unwrap();
    assert_eq!(seen, Some(1));

    input
        .with_changed_with(IntValues::VAL1, || 1, |_| panic!("value did not change"))
        .unwrap();

    let mut seen = None;
    input
        .with_changed_with(IntValues::VAL1, || 4, |v| seen = v)
        .unwrap();
    assert_eq!(seen, Some(1));
}

#[test]
fn changed_value_is_returned_only_on_change() {
    let input = propmap! { IntValues::VAL1 => 1 };
    let unchanged = IntValues {
        val1: 1,
        val2: 2,
        val3: 3,
    };
    assert_eq!(input.changed_from(IntValues::VAL1, &unchanged).unwrap(), None);
    assert_eq!(input.changed_with(IntValues::VAL1, || 7).unwrap(), Some(1));
    assert_eq!(input.changed_with(IntValues::VAL2, || 7).unwrap(), None);
}
