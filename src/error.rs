//! Error types for unresume library.

use std::io;
use thiserror::Error;

/// Result type alias for unresume operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning a document into a résumé record.
///
/// Heuristic mismatches (an undetected section, an empty field) are never
/// errors; they surface as default values in the record.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The declared format is neither page-based nor flow-text.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The engine could not open or read the byte buffer.
    #[error("Text extraction error: {0}")]
    Extraction(String),

    /// Extraction succeeded but produced too little text to be a résumé.
    #[error("Insufficient content: extracted {found} characters, at least {required} required")]
    InsufficientContent {
        /// Characters actually extracted
        found: usize,
        /// Configured minimum
        required: usize,
    },

    /// Error while serializing a record.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether the caller may reasonably ask the user for a different upload.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFormat(_) | Error::Extraction(_) | Error::InsufficientContent { .. }
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => {
                Error::Extraction("document is encrypted".to_string())
            }
            _ => Error::Extraction(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Extraction(format!("invalid word-processor container: {}", err))
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Extraction(format!("malformed document body: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedFormat("rtf".to_string());
        assert_eq!(err.to_string(), "Unsupported document format: rtf");

        let err = Error::InsufficientContent {
            found: 12,
            required: 50,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient content: extracted 12 characters, at least 50 required"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn test_user_facing() {
        assert!(Error::Extraction("bad xref".into()).is_user_facing());
        assert!(!Error::Render("x".into()).is_user_facing());
    }
}
