use core::fmt;

/// A value in a property map could not be converted to its target shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionError {
    /// Field names from the outermost record down to the failing value.
    pub path: Vec<String>,

    /// What went wrong.
    pub kind: ConversionErrorKind,
}

/// Kinds of [`ConversionError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionErrorKind {
    /// The value is of a kind the target cannot be built from.
    TypeMismatch {
        /// Type the target expected
        expected: &'static str,
        /// Kind of the value actually present
        received: &'static str,
    },

    /// The value is of an acceptable kind but its content is invalid.
    ParseFailure {
        /// Description of the problem
        message: String,
    },
}

impl ConversionError {
    /// A type mismatch with an empty path.
    pub fn type_mismatch(expected: &'static str, received: &'static str) -> Self {
        Self {
            path: Vec::new(),
            kind: ConversionErrorKind::TypeMismatch { expected, received },
        }
    }

    /// A parse failure with an empty path.
    pub fn parse_failure(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            kind: ConversionErrorKind::ParseFailure {
                message: message.into(),
            },
        }
    }

    /// Prepends a field name to the path. Called once per enclosing level while unwinding.
    pub fn with_path(mut self, field: impl Into<String>) -> Self {
        self.path.insert(0, field.into());
        self
    }

    /// The path joined with dots, e.g. `val2.val1`.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// The innermost field name, if any.
    pub fn field(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Returns `true` for [`ConversionErrorKind::TypeMismatch`].
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ConversionErrorKind::TypeMismatch { .. })
    }

    /// Returns `true` for [`ConversionErrorKind::ParseFailure`].
    pub fn is_parse_failure(&self) -> bool {
        matches!(self.kind, ConversionErrorKind::ParseFailure { .. })
    }
}

impl fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionErrorKind::TypeMismatch { expected, received } => {
                write!(f, "type mismatch: expected {expected}, received {received}")
            }
            ConversionErrorKind::ParseFailure { message } => f.write_str(message),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path_string(), self.kind)
        }
    }
}

impl core::error::Error for ConversionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_grows_outward() {
        let err = ConversionError::parse_failure("invalid date/time")
            .with_path("instantRegular")
            .with_path("val1");
        assert_eq!(err.path, ["val1", "instantRegular"]);
        assert_eq!(err.field(), Some("instantRegular"));
        assert_eq!(err.to_string(), "at val1.instantRegular: invalid date/time");
    }

    #[test]
    fn root_errors_have_no_prefix() {
        let err = ConversionError::type_mismatch("i64", "string");
        assert_eq!(err.to_string(), "type mismatch: expected i64, received string");
    }
}
