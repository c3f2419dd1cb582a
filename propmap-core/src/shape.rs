use crate::TypedValue;

/// A static description of a target type: what it is made of and whether it admits null.
///
/// Every [`Typed`](crate::Typed) type has exactly one, available as `T::SHAPE`.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// Name of the type as it appears in messages, e.g. `i32`, `Vec` or `Address`.
    pub type_identifier: &'static str,

    /// What the type is made of.
    pub def: Def,

    /// Whether null (or absence) is an acceptable value.
    pub nullable: bool,
}

impl Shape {
    /// A non-nullable shape.
    pub const fn new(type_identifier: &'static str, def: Def) -> Self {
        Self {
            type_identifier,
            def,
            nullable: false,
        }
    }

    /// The same shape, accepting null.
    pub const fn to_nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Returns the record definition if this is a record.
    pub const fn as_record(&self) -> Option<&RecordDef> {
        match &self.def {
            Def::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns `true` if this shape describes a record.
    pub const fn is_record(&self) -> bool {
        matches!(self.def, Def::Record(_))
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_identifier)?;
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// The semantic definition of a shape.
#[derive(Clone, Copy, Debug)]
pub enum Def {
    /// Boolean, integer, double or string.
    Scalar(ScalarKind),

    /// A point in time, carried as an RFC 3339 string in property maps.
    Temporal(TemporalKind),

    /// A fieldless enum, matched by case name.
    Enum(EnumDef),

    /// Ordered sequence of one item shape.
    List(ListDef),

    /// Collection of distinct items of one shape.
    Set(SetDef),

    /// Exactly two values, carried as a two-element list.
    Pair(PairDef),

    /// A nested property map that is kept as-is.
    DynamicMap,

    /// A structured record with named fields.
    Record(RecordDef),
}

/// Kinds of [`Def::Scalar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    /// `bool`
    Bool,
    /// Signed integers. Narrower targets range-check on materialization.
    Integer,
    /// Floating point. Integers widen into it.
    Double,
    /// `String`
    String,
}

/// Kinds of [`Def::Temporal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemporalKind {
    /// An instant on the UTC timeline.
    Instant,
    /// A date-time that keeps the offset it was written with.
    OffsetDateTime,
}

/// Cases of an enum, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct EnumDef {
    /// Case names as they appear in property maps.
    pub variants: &'static [&'static str],
}

impl EnumDef {
    /// Creates an enum definition.
    pub const fn new(variants: &'static [&'static str]) -> Self {
        Self { variants }
    }

    /// Finds a case by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.variants
            .iter()
            .position(|v| v.eq_ignore_ascii_case(name))
    }
}

/// Definition of a list.
#[derive(Clone, Copy, Debug)]
pub struct ListDef {
    /// Shape of the items. Its `nullable` flag says whether null items are allowed.
    pub item: &'static Shape,
}

impl ListDef {
    /// Creates a list definition.
    pub const fn new(item: &'static Shape) -> Self {
        Self { item }
    }

    /// Whether items may be null.
    pub const fn item_nullable(&self) -> bool {
        self.item.nullable
    }
}

/// Definition of a set.
#[derive(Clone, Copy, Debug)]
pub struct SetDef {
    /// Shape of the items. Its `nullable` flag says whether null items are allowed.
    pub item: &'static Shape,
}

impl SetDef {
    /// Creates a set definition.
    pub const fn new(item: &'static Shape) -> Self {
        Self { item }
    }

    /// Whether items may be null.
    pub const fn item_nullable(&self) -> bool {
        self.item.nullable
    }
}

/// Definition of a pair.
#[derive(Clone, Copy, Debug)]
pub struct PairDef {
    /// Shape of the first element.
    pub first: &'static Shape,
    /// Shape of the second element.
    pub second: &'static Shape,
}

impl PairDef {
    /// Creates a pair definition.
    pub const fn new(first: &'static Shape, second: &'static Shape) -> Self {
        Self { first, second }
    }
}

/// Fields of a record, in declaration order.
#[derive(Clone, Copy, Debug)]
pub struct RecordDef {
    /// The fields.
    pub fields: &'static [FieldDef],
}

impl RecordDef {
    /// Creates a record definition.
    pub const fn new(fields: &'static [FieldDef]) -> Self {
        Self { fields }
    }

    /// Looks up a field by its map key.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.name)
    }
}

/// A single field of a record.
#[derive(Clone, Copy)]
pub struct FieldDef {
    /// Key of the field in property maps.
    pub name: &'static str,

    /// Shape of the field. A function so that records can refer to themselves.
    pub shape: fn() -> &'static Shape,

    /// Value used when the field is neither supplied nor inherited.
    pub default: Option<fn() -> TypedValue>,
}

impl FieldDef {
    /// A field without a default.
    pub const fn new(name: &'static str, shape: fn() -> &'static Shape) -> Self {
        Self {
            name,
            shape,
            default: None,
        }
    }

    /// Sets the default fallback.
    pub const fn with_default(self, default: fn() -> TypedValue) -> Self {
        Self {
            default: Some(default),
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

impl core::fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("shape", &self.shape().type_identifier)
            .field("default", &self.default.is_some())
            .finish()
    }
}
