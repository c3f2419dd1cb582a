use crate::{ConversionError, Def, PairDef, Shape, Typed, TypedValue, present_is_self};

impl<A: Typed, B: Typed> Typed for (A, B) {
    const SHAPE: &'static Shape =
        &const { Shape::new("tuple", Def::Pair(PairDef::new(A::SHAPE, B::SHAPE))) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Pair(Box::new((self.0.to_typed(), self.1.to_typed())))
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Pair(pair) => {
                let (first, second) = *pair;
                Ok((A::from_typed(first)?, B::from_typed(second)?))
            }
            other => Err(other.mismatch::<Self>()),
        }
    }
}
