//! Error types for codec operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing editor files.
///
/// Every decoding failure aborts the whole file; callers never receive a
/// partially populated structure.
#[derive(Debug, Error)]
pub enum CodecError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Reading or writing the file failed.
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Leading magic/version is not one of the known values for the family.
    #[error("unsupported {family} version {version:#x} at offset {offset:#x}")]
    UnsupportedVersion {
        offset: usize,
        family: &'static str,
        version: u32,
    },

    /// A fixed control constant did not match; the cursor is desynchronized.
    #[error("{what} mismatch at offset {offset:#x}: expected {expected}, found {found}")]
    StructuralMismatch {
        offset: usize,
        what: &'static str,
        expected: u32,
        found: u32,
    },

    /// Tagged payload discriminant absent from its table.
    #[error("unknown {table} type {discriminant} at offset {offset:#x}")]
    UnknownVariant {
        offset: usize,
        table: &'static str,
        discriminant: u8,
    },

    /// Read or write past the available buffer.
    #[error("out of bounds at offset {offset:#x}: need {need} bytes, have {have}")]
    OutOfBounds {
        offset: usize,
        need: usize,
        have: usize,
    },

    /// Tile grid dimensions address more cells than a file can hold.
    #[error(
        "tile grid {width}x{height} with chunk width {chunk_width} at offset {offset:#x} is too large"
    )]
    GridTooLarge {
        offset: usize,
        width: u32,
        height: u32,
        chunk_width: u32,
    },

    /// Nested flows exceed the configured depth.
    #[error("flow nesting deeper than {limit} at offset {offset:#x}")]
    RecursionLimit { offset: usize, limit: usize },

    /// JSON export or import failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create an OutOfBounds error.
    pub fn out_of_bounds(offset: usize, need: usize, have: usize) -> Self {
        Self::OutOfBounds { offset, need, have }
    }

    /// Create a StructuralMismatch error.
    pub fn mismatch(offset: usize, what: &'static str, expected: u32, found: u32) -> Self {
        Self::StructuralMismatch {
            offset,
            what,
            expected,
            found,
        }
    }

    /// Map an I/O error on `path`, keeping NotFound distinct.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Byte offset at which the failure occurred, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnsupportedVersion { offset, .. }
            | Self::StructuralMismatch { offset, .. }
            | Self::UnknownVariant { offset, .. }
            | Self::OutOfBounds { offset, .. }
            | Self::GridTooLarge { offset, .. }
            | Self::RecursionLimit { offset, .. } => Some(*offset),
            Self::FileNotFound { .. } | Self::Io { .. } | Self::Json(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::out_of_bounds(0x10, 4, 2);
        assert_eq!(
            err.to_string(),
            "out of bounds at offset 0x10: need 4 bytes, have 2"
        );

        let err = CodecError::UnknownVariant {
            offset: 0x2a,
            table: "command",
            discriminant: 40,
        };
        assert_eq!(err.to_string(), "unknown command type 40 at offset 0x2a");

        let err = CodecError::UnsupportedVersion {
            offset: 0,
            family: "asset catalog",
            version: 0x1234,
        };
        assert_eq!(
            err.to_string(),
            "unsupported asset catalog version 0x1234 at offset 0x0"
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(CodecError::mismatch(12, "flow header", 10, 9).offset(), Some(12));
        let err = CodecError::io(
            "missing.dat",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, CodecError::FileNotFound { .. }));
        assert_eq!(err.offset(), None);
    }
}
