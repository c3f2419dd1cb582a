//! Records described by hand, without the derive.

use propmap_core::{
    ConversionError, Def, EnumCase, EnumDef, Field, FieldDef, FieldMeta, Record, RecordDef,
    RecordValue, Shape, Typed, TypedValue, Updatable, UpdateSchema,
};
use propmap_testhelpers::test;
use propmap_value::Value;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Color {
    Red,
    Green,
}

impl Typed for Color {
    const SHAPE: &'static Shape =
        &const { Shape::new("Color", Def::Enum(EnumDef::new(&["RED", "GREEN"]))) };
    type Present = Self;

    fn to_typed(&self) -> TypedValue {
        let index = *self as usize;
        TypedValue::Enum(EnumCase {
            index,
            name: ["RED", "GREEN"][index],
        })
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Enum(EnumCase { index: 0, .. }) => Ok(Color::Red),
            TypedValue::Enum(EnumCase { index: 1, .. }) => Ok(Color::Green),
            other => Err(other.mismatch::<Self>()),
        }
    }

    fn into_present(self) -> Option<Self> {
        Some(self)
    }

    fn as_present(&self) -> Option<&Self> {
        Some(self)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Swatch {
    label: String,
    color: Option<Color>,
    tags: Vec<String>,
}

impl Swatch {
    const LABEL: Field<Swatch, String> = Field::new("label", |s| &s.label);
    const COLOR: Field<Swatch, Option<Color>> = Field::new("color", |s| &s.color);
}

impl Typed for Swatch {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "Swatch",
            Def::Record(RecordDef::new(&const {
                [
                    FieldDef::new("label", || <String>::SHAPE),
                    FieldDef::new("color", || <Option<Color>>::SHAPE),
                    FieldDef::new("tags", || <Vec<String>>::SHAPE)
                        .with_default(|| TypedValue::List(Vec::new())),
                ]
            })),
        )
    };
    type Present = Self;

    fn to_typed(&self) -> TypedValue {
        TypedValue::Record(self.to_record())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Record(mut record) => Ok(Swatch {
                label: record.take("label")?,
                color: record.take("color")?,
                tags: record.take("tags")?,
            }),
            other => Err(other.mismatch::<Self>()),
        }
    }

    fn into_present(self) -> Option<Self> {
        Some(self)
    }

    fn as_present(&self) -> Option<&Self> {
        Some(self)
    }
}

impl Record for Swatch {
    fn to_record(&self) -> RecordValue {
        RecordValue::with_capacity(3)
            .with("label", self.label.to_typed())
            .with("color", self.color.to_typed())
            .with("tags", self.tags.to_typed())
    }
}

impl Updatable for Swatch {
    const UPDATE_SCHEMA: &'static UpdateSchema = &const {
        UpdateSchema::new(
            "Swatch",
            &const {
                [
                    FieldMeta::new("label", || <String>::SHAPE).updatable(),
                    FieldMeta::new("color", || <Option<Color>>::SHAPE).updatable(),
                    FieldMeta::new("tags", || <Vec<String>>::SHAPE),
                ]
            },
        )
    };
}

#[test]
fn record_shape_lists_fields_in_order() {
    let record = Swatch::SHAPE.as_record().expect("record shape");
    assert_eq!(
        record.field_names().collect::<Vec<_>>(),
        ["label", "color", "tags"]
    );
    assert!(record.field("color").is_some_and(FieldDef::is_nullable));
    assert!(record.field("tags").is_some_and(|f| f.default.is_some()));
}

#[test]
fn enum_cases_match_ignoring_case() {
    let Def::Enum(def) = Color::SHAPE.def else {
        panic!("expected enum shape");
    };
    assert_eq!(def.find("green"), Some(1));
    assert_eq!(def.find("Red"), Some(0));
    assert_eq!(def.find("blue"), None);
}

#[test]
fn record_lowers_to_map() {
    let swatch = Swatch {
        label: "sky".into(),
        color: Some(Color::Green),
        tags: vec!["a".into()],
    };
    let map = swatch.to_property_map();
    assert_eq!(map.get_value("label"), Some(&Value::from("sky")));
    assert_eq!(map.get_value("color"), Some(&Value::from("GREEN")));
    assert_eq!(map.get_value("tags"), Some(&Value::from(vec!["a"])));
}

#[test]
fn record_round_trips_through_typed_value() {
    let swatch = Swatch {
        label: "sky".into(),
        color: None,
        tags: Vec::new(),
    };
    assert_eq!(Swatch::from_typed(swatch.to_typed()).unwrap(), swatch);
}

#[test]
fn field_tokens_read_records() {
    let swatch = Swatch {
        label: "sky".into(),
        color: Some(Color::Red),
        tags: Vec::new(),
    };
    assert_eq!(Swatch::LABEL.name(), "label");
    assert_eq!(Swatch::LABEL.get(&swatch), "sky");
    assert_eq!(Swatch::COLOR.get(&swatch).as_present(), Some(&Color::Red));
    assert!(Swatch::COLOR.is_nullable());
}

#[test]
fn update_schema_filters_updatable() {
    let names: Vec<_> = Swatch::UPDATE_SCHEMA.updatable().map(|f| f.name).collect();
    assert_eq!(names, ["label", "color"]);
    assert_eq!(<Option<Swatch>>::UPDATE_SCHEMA.type_identifier, "Swatch");
}

#[test]
fn nested_errors_name_the_field() {
    let record = RecordValue::new()
        .with("label", TypedValue::Integer(3))
        .with("color", TypedValue::Null);
    let err = Swatch::from_typed(TypedValue::Record(record)).unwrap_err();
    assert_eq!(err.path, ["label"]);
    assert!(err.is_type_mismatch());
}
