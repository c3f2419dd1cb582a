use chrono::{DateTime, FixedOffset, Utc};

use crate::{ConversionError, Def, Shape, TemporalKind, Typed, TypedValue, present_is_self};

impl Typed for DateTime<Utc> {
    const SHAPE: &'static Shape =
        &const { Shape::new("DateTime<Utc>", Def::Temporal(TemporalKind::Instant)) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Instant(*self)
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Instant(dt) => Ok(dt),
            TypedValue::OffsetDateTime(dt) => Ok(dt.with_timezone(&Utc)),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

impl Typed for DateTime<FixedOffset> {
    const SHAPE: &'static Shape = &const {
        Shape::new(
            "DateTime<FixedOffset>",
            Def::Temporal(TemporalKind::OffsetDateTime),
        )
    };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::OffsetDateTime(*self)
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::OffsetDateTime(dt) => Ok(dt),
            TypedValue::Instant(dt) => Ok(dt.fixed_offset()),
            other => Err(other.mismatch::<Self>()),
        }
    }
}
