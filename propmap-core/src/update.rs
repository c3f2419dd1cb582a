use crate::{Shape, Typed};

/// Which fields of a record may appear in a validated patch.
///
/// Generated by `#[derive(Typed)]` from `#[propmap(updatable)]` and
/// `#[propmap(updatable, mapped)]`, or declared by hand as `const` data.
#[derive(Clone, Copy, Debug)]
pub struct UpdateSchema {
    /// Name of the record type.
    pub type_identifier: &'static str,

    /// Every field of the record, updatable or not, in declaration order.
    pub fields: &'static [FieldMeta],
}

impl UpdateSchema {
    /// Creates a schema.
    pub const fn new(type_identifier: &'static str, fields: &'static [FieldMeta]) -> Self {
        Self {
            type_identifier,
            fields,
        }
    }

    /// Fields that may appear in a patch.
    pub fn updatable(&self) -> impl Iterator<Item = &'static FieldMeta> {
        self.fields.iter().filter(|f| f.updatable)
    }

    /// Updatable fields that hold a nested record validated recursively.
    pub fn mapped(&self) -> impl Iterator<Item = (&'static FieldMeta, &'static UpdateSchema)> {
        self.fields
            .iter()
            .filter(|f| f.updatable)
            .filter_map(|f| f.mapped.map(|schema| (f, schema())))
    }
}

/// Update metadata for one record field.
#[derive(Clone, Copy)]
pub struct FieldMeta {
    /// Key of the field in property maps.
    pub name: &'static str,

    /// Shape of the field, consulted for nullability.
    pub shape: fn() -> &'static Shape,

    /// Whether the field may appear in a patch.
    pub updatable: bool,

    /// Schema of the nested record, for fields validated recursively.
    pub mapped: Option<fn() -> &'static UpdateSchema>,
}

impl FieldMeta {
    /// A field that is not updatable.
    pub const fn new(name: &'static str, shape: fn() -> &'static Shape) -> Self {
        Self {
            name,
            shape,
            updatable: false,
            mapped: None,
        }
    }

    /// Marks the field updatable.
    pub const fn updatable(self) -> Self {
        Self {
            updatable: true,
            ..self
        }
    }

    /// Marks the field as a nested record validated against `schema`. Implies updatable.
    pub const fn mapped(self, schema: fn() -> &'static UpdateSchema) -> Self {
        Self {
            updatable: true,
            mapped: Some(schema),
            ..self
        }
    }

    /// Shape of the field.
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }

    /// Whether the field accepts null.
    pub fn is_nullable(&self) -> bool {
        self.shape().nullable
    }
}

impl core::fmt::Debug for FieldMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldMeta")
            .field("name", &self.name)
            .field("updatable", &self.updatable)
            .field("mapped", &self.mapped.map(|s| s().type_identifier))
            .finish()
    }
}

/// A record with update metadata.
pub trait Updatable: Typed {
    /// The record's update schema.
    const UPDATE_SCHEMA: &'static UpdateSchema;
}

impl<T: Updatable> Updatable for Option<T> {
    const UPDATE_SCHEMA: &'static UpdateSchema = T::UPDATE_SCHEMA;
}
