//! Error types for the groundwater GIS utilities.

use thiserror::Error;

/// Result type alias using GwError.
pub type GwResult<T> = Result<T, GwError>;

/// Primary error type for every utility in the workspace.
#[derive(Debug, Error)]
pub enum GwError {
    /// Malformed call parameters (e.g. only one of rows/cols given).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A valid request for functionality that is not implemented.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// An input file does not match its expected schema.
    #[error("Format error: {0}")]
    FormatError(String),

    /// A file or dataset was not found or could not be read/written.
    #[error("I/O error: {0}")]
    Io(String),

    /// Array dimensions are incompatible with the target grid.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Discriminant of [`GwError`], for matching without the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    UnsupportedFeature,
    FormatError,
    Io,
    ShapeMismatch,
}

impl GwError {
    /// Get the taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GwError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            GwError::UnsupportedFeature(_) => ErrorKind::UnsupportedFeature,
            GwError::FormatError(_) => ErrorKind::FormatError,
            GwError::Io(_) => ErrorKind::Io,
            GwError::ShapeMismatch(_) => ErrorKind::ShapeMismatch,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        GwError::InvalidArgument(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        GwError::FormatError(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        GwError::Io(msg.into())
    }
}

impl From<std::io::Error> for GwError {
    fn from(err: std::io::Error) -> Self {
        GwError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_io_kind() {
        let err: GwError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            GwError::invalid_argument("rows without cols").kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            GwError::UnsupportedFeature("layer 2".into()).kind(),
            ErrorKind::UnsupportedFeature
        );
        assert_eq!(GwError::format("bad").kind(), ErrorKind::FormatError);
        assert_eq!(
            GwError::ShapeMismatch("too few".into()).kind(),
            ErrorKind::ShapeMismatch
        );
    }
}
