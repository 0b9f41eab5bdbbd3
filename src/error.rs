//! Error types for genolens

use std::fmt;

/// Result type alias for genolens operations
pub type Result<T> = std::result::Result<T, GenolensError>;

/// Error types that can occur in genolens
#[derive(Debug)]
pub enum GenolensError {
    /// I/O error
    Io(std::io::Error),

    /// Byte stream could not be decoded as text
    Decode {
        /// Line number where decoding failed (1-based)
        line: usize,
        /// Error message
        msg: String,
    },
}

impl fmt::Display for GenolensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenolensError::Io(e) => write!(f, "I/O error: {}", e),
            GenolensError::Decode { line, msg } => {
                write!(f, "Decode error at line {}: {}", line, msg)
            }
        }
    }
}

impl std::error::Error for GenolensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenolensError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GenolensError {
    fn from(error: std::io::Error) -> Self {
        GenolensError::Io(error)
    }
}
