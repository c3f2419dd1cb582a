use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use crate::{
    ConversionError, Def, ListDef, SetDef, Shape, Typed, TypedValue, present_is_self,
};

/// List and set sources are interchangeable; the target decides the container.
fn items<C: Typed>(value: TypedValue) -> Result<Vec<TypedValue>, ConversionError> {
    match value {
        TypedValue::List(items) | TypedValue::Set(items) => Ok(items),
        other => Err(other.mismatch::<C>()),
    }
}

impl<T: Typed> Typed for Vec<T> {
    const SHAPE: &'static Shape = &const { Shape::new("Vec", Def::List(ListDef::new(T::SHAPE))) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::List(self.iter().map(Typed::to_typed).collect())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        items::<Self>(value)?.into_iter().map(T::from_typed).collect()
    }
}

impl<T: Typed + Eq + Hash> Typed for HashSet<T> {
    const SHAPE: &'static Shape =
        &const { Shape::new("HashSet", Def::Set(SetDef::new(T::SHAPE))) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Set(self.iter().map(Typed::to_typed).collect())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        items::<Self>(value)?.into_iter().map(T::from_typed).collect()
    }
}

impl<T: Typed + Ord> Typed for BTreeSet<T> {
    const SHAPE: &'static Shape =
        &const { Shape::new("BTreeSet", Def::Set(SetDef::new(T::SHAPE))) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Set(self.iter().map(Typed::to_typed).collect())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        items::<Self>(value)?.into_iter().map(T::from_typed).collect()
    }
}
