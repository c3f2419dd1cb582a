use propmap_value::PropertyMap;

use crate::{ConversionError, Def, Shape, Typed, TypedValue, present_is_self};

impl Typed for PropertyMap {
    const SHAPE: &'static Shape = &const { Shape::new("PropertyMap", Def::DynamicMap) };
    present_is_self!();

    fn to_typed(&self) -> TypedValue {
        TypedValue::Map(self.clone())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Map(map) => Ok(map),
            TypedValue::Record(record) => Ok(record.into_property_map()),
            other => Err(other.mismatch::<Self>()),
        }
    }
}
