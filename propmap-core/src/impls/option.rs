use crate::{ConversionError, Shape, Typed, TypedValue};

impl<T: Typed> Typed for Option<T> {
    const SHAPE: &'static Shape = &const { T::SHAPE.to_nullable() };
    type Present = T::Present;

    fn to_typed(&self) -> TypedValue {
        match self {
            Some(v) => v.to_typed(),
            None => TypedValue::Null,
        }
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Null => Ok(None),
            other => T::from_typed(other).map(Some),
        }
    }

    fn into_present(self) -> Option<Self::Present> {
        self.and_then(T::into_present)
    }

    fn as_present(&self) -> Option<&Self::Present> {
        self.as_ref().and_then(T::as_present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_is_nullable_copy_of_inner() {
        let shape = <Option<i64>>::SHAPE;
        assert!(shape.nullable);
        assert!(!i64::SHAPE.nullable);
        assert_eq!(shape.type_identifier, "i64");
    }

    #[test]
    fn null_is_none() {
        assert_eq!(<Option<bool>>::from_typed(TypedValue::Null).unwrap(), None);
        assert_eq!(
            <Option<bool>>::from_typed(TypedValue::Bool(true)).unwrap(),
            Some(true)
        );
    }
}
