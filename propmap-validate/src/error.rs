use propmap_core::{ConversionError, ConversionErrorKind};

/// Why a property map was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidInputData {
    /// A field that must have a value is null or absent.
    FieldRequired,
    /// A field may not be supplied for this operation.
    FieldNotAllowed,
    /// A field holds a value of the right kind that is still unusable.
    FieldContentInvalid,
    /// A field holds a value of the wrong kind.
    FieldTypeInvalid,
    /// The input as a whole has the wrong kind.
    TypeInvalid,
}

impl InvalidInputData {
    /// Machine-readable code, stable across releases.
    pub const fn code(&self) -> &'static str {
        match self {
            InvalidInputData::FieldRequired => "field_required",
            InvalidInputData::FieldNotAllowed => "field_not_allowed",
            InvalidInputData::FieldContentInvalid => "field_content_invalid",
            InvalidInputData::FieldTypeInvalid => "field_type_invalid",
            InvalidInputData::TypeInvalid => "type_invalid",
        }
    }
}

impl core::fmt::Display for InvalidInputData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// A property map failed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// What went wrong.
    pub reason: InvalidInputData,

    /// The offending fields, at the level named by `path`.
    pub fields: Vec<String>,

    /// Fields leading from the root map to the map holding `fields`, outermost first.
    pub path: Vec<String>,

    /// Human readable description.
    pub message: String,
}

/// `a, b @ outer.inner`
fn field_string(fields: &[String], path: &[String]) -> String {
    let mut s = fields.join(", ");
    if !path.is_empty() {
        s.push_str(" @ ");
        s.push_str(&path.join("."));
    }
    s
}

impl ValidationError {
    /// Fields that must have a value are null or absent.
    pub fn field_required(fields: Vec<String>, path: Vec<String>) -> Self {
        let message = format!(
            "Field(s) [{}] required for this operation.",
            field_string(&fields, &path)
        );
        Self {
            reason: InvalidInputData::FieldRequired,
            fields,
            path,
            message,
        }
    }

    /// Fields were supplied that may not be.
    pub fn field_not_allowed(fields: Vec<String>, path: Vec<String>) -> Self {
        let message = format!(
            "Field(s) [{}] not allowed for this operation.",
            field_string(&fields, &path)
        );
        Self {
            reason: InvalidInputData::FieldNotAllowed,
            fields,
            path,
            message,
        }
    }

    /// `field` holds an unusable value, described by `detail`.
    pub fn field_content_invalid(
        field: impl Into<String>,
        path: Vec<String>,
        detail: &str,
    ) -> Self {
        let fields = vec![field.into()];
        let message = format!(
            "Field [{}] is invalid: {detail}.",
            field_string(&fields, &path)
        );
        Self {
            reason: InvalidInputData::FieldContentInvalid,
            fields,
            path,
            message,
        }
    }

    /// `field` holds a value of kind `received` where `expected` was wanted.
    pub fn field_type_invalid(
        field: impl Into<String>,
        path: Vec<String>,
        expected: &str,
        received: &str,
    ) -> Self {
        let fields = vec![field.into()];
        let message = format!(
            "Field [{}] has an invalid data type, expected {expected} but received {received}.",
            field_string(&fields, &path)
        );
        Self {
            reason: InvalidInputData::FieldTypeInvalid,
            fields,
            path,
            message,
        }
    }

    /// The input as a whole is of kind `received` where `expected` was wanted.
    pub fn type_invalid(expected: &str, received: &str) -> Self {
        Self {
            reason: InvalidInputData::TypeInvalid,
            fields: Vec::new(),
            path: Vec::new(),
            message: format!("Invalid data type, expected {expected} but received {received}."),
        }
    }

    /// Shorthand for `self.reason.code()`.
    pub const fn code(&self) -> &'static str {
        self.reason.code()
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

impl core::error::Error for ValidationError {}

/// Type mismatches become `field_type_invalid` (`type_invalid` at the root), parse
/// failures `field_content_invalid`. The last path element is the field, the rest its path.
impl From<ConversionError> for ValidationError {
    fn from(err: ConversionError) -> Self {
        let mut path = err.path;
        let field = path.pop();
        match (err.kind, field) {
            (ConversionErrorKind::TypeMismatch { expected, received }, Some(field)) => {
                ValidationError::field_type_invalid(field, path, expected, received)
            }
            (ConversionErrorKind::TypeMismatch { expected, received }, None) => {
                ValidationError::type_invalid(expected, received)
            }
            (ConversionErrorKind::ParseFailure { message }, Some(field)) => {
                ValidationError::field_content_invalid(field, path, &message)
            }
            (ConversionErrorKind::ParseFailure { message }, None) => ValidationError {
                reason: InvalidInputData::FieldContentInvalid,
                fields: Vec::new(),
                path: Vec::new(),
                message: format!("Content is invalid: {message}."),
            },
        }
    }
}
