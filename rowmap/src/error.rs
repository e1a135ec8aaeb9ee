use std::error;
use std::fmt;

use rowmap_config::shared::ValidationError;

/// Convenient result type for row loading operations using [`RowMapError`] as the error type.
pub type RowMapResult<T> = Result<T, RowMapError>;

/// Main error type for row loading operations.
///
/// A [`RowMapError`] carries an [`ErrorKind`] for programmatic handling, a static
/// description, and optionally a dynamic detail describing the offending input.
#[derive(Debug, Clone)]
pub struct RowMapError {
    repr: ErrorRepr,
}

/// Internal representation of error data.
#[derive(Debug, Clone)]
enum ErrorRepr {
    /// Error with kind and static description
    WithDescription(ErrorKind, &'static str),
    /// Error with kind, static description, and dynamic detail
    WithDescriptionAndDetail(ErrorKind, &'static str, String),
}

/// Specific categories of errors that can occur while loading rows.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    // Batch & Schema Errors
    MalformedBatch,
    SchemaMismatch,
    DuplicateField,

    // Field Access Errors
    UnknownField,
    FieldTypeMismatch,
    ConversionError,

    // Resource Errors
    RowLimitExceeded,

    // Source Errors
    SourceError,

    // Configuration Errors
    ConfigError,

    // Unknown / Uncategorized
    Unknown,
}

impl RowMapError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self.repr {
            ErrorRepr::WithDescription(kind, _)
            | ErrorRepr::WithDescriptionAndDetail(kind, _, _) => kind,
        }
    }

    /// Returns the static description of this error.
    pub fn description(&self) -> &'static str {
        match self.repr {
            ErrorRepr::WithDescription(_, desc)
            | ErrorRepr::WithDescriptionAndDetail(_, desc, _) => desc,
        }
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        match self.repr {
            ErrorRepr::WithDescriptionAndDetail(_, _, ref detail) => Some(detail.as_str()),
            ErrorRepr::WithDescription(_, _) => None,
        }
    }
}

/// Two errors are equal when their kinds are equal, descriptions and details are ignored.
impl PartialEq for RowMapError {
    fn eq(&self, other: &RowMapError) -> bool {
        self.kind() == other.kind()
    }
}

impl fmt::Display for RowMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.repr {
            ErrorRepr::WithDescription(kind, desc) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;

                Ok(())
            }
            ErrorRepr::WithDescriptionAndDetail(kind, desc, ref detail) => {
                fmt::Debug::fmt(&kind, f)?;
                f.write_str(": ")?;
                desc.fmt(f)?;
                f.write_str(" -> ")?;
                detail.fmt(f)?;

                Ok(())
            }
        }
    }
}

impl error::Error for RowMapError {}

/// Creates a [`RowMapError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for RowMapError {
    fn from((kind, desc): (ErrorKind, &'static str)) -> RowMapError {
        RowMapError {
            repr: ErrorRepr::WithDescription(kind, desc),
        }
    }
}

/// Creates a [`RowMapError`] from an error kind, static description, and dynamic detail.
impl From<(ErrorKind, &'static str, String)> for RowMapError {
    fn from((kind, desc, detail): (ErrorKind, &'static str, String)) -> RowMapError {
        RowMapError {
            repr: ErrorRepr::WithDescriptionAndDetail(kind, desc, detail),
        }
    }
}

/// Converts a loader [`ValidationError`] to [`RowMapError`] with [`ErrorKind::ConfigError`].
impl From<ValidationError> for RowMapError {
    fn from(err: ValidationError) -> RowMapError {
        RowMapError {
            repr: ErrorRepr::WithDescriptionAndDetail(
                ErrorKind::ConfigError,
                "Invalid loader configuration",
                err.to_string(),
            ),
        }
    }
}
