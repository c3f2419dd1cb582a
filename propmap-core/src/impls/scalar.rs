use crate::{ConversionError, Def, ScalarKind, Shape, Typed, TypedValue, present_is_self};

impl Typed for bool {
    const SHAPE: &'static Shape = &const { Shape::new("bool", Def::Scalar(ScalarKind::Bool)) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Bool(*self)
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Bool(b) => Ok(b),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

impl Typed for i64 {
    const SHAPE: &'static Shape = &const { Shape::new("i64", Def::Scalar(ScalarKind::Integer)) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Integer(*self)
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Integer(i) => Ok(i),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

impl Typed for i32 {
    const SHAPE: &'static Shape = &const { Shape::new("i32", Def::Scalar(ScalarKind::Integer)) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Integer(i64::from(*self))
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Integer(i) => i32::try_from(i)
                .map_err(|_| ConversionError::parse_failure(format!("{i} is out of range for i32"))),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

impl Typed for f64 {
    const SHAPE: &'static Shape = &const { Shape::new("f64", Def::Scalar(ScalarKind::Double)) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Double(*self)
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Double(d) => Ok(d),
            TypedValue::Integer(i) => Ok(i as f64),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

impl Typed for String {
    const SHAPE: &'static Shape = &const { Shape::new("String", Def::Scalar(ScalarKind::String)) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::String(self.clone())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::String(s) => Ok(s),
            other => Err(other.mismatch::<Self>()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConversionErrorKind;

    #[test]
    fn i32_range_checks() {
        assert_eq!(i32::from_typed(TypedValue::Integer(42)).unwrap(), 42);
        let err = i32::from_typed(TypedValue::Integer(i64::from(i32::MAX) + 1)).unwrap_err();
        assert!(matches!(err.kind, ConversionErrorKind::ParseFailure { .. }));
    }

    #[test]
    fn null_is_not_a_string() {
        let err = String::from_typed(TypedValue::Null).unwrap_err();
        assert_eq!(err.to_string(), "must not be null");
    }

    #[test]
    fn wrong_variant_is_mismatch() {
        let err = bool::from_typed(TypedValue::Integer(1)).unwrap_err();
        assert_eq!(
            err.kind,
            ConversionErrorKind::TypeMismatch {
                expected: "bool",
                received: "integer"
            }
        );
    }
}
