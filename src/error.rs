//! Error types for pagecodec library.

use std::io;
use thiserror::Error;

/// Result type alias for pagecodec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, capturing, or rendering documents.
///
/// Capture and style-resolution failures are not represented here: they
/// degrade to an absent result or a diagnostic instead of aborting.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A markup snapshot could not be read.
    #[error("Markup error: {0}")]
    Markup(String),

    /// A template file is structurally valid JSON but not a template.
    #[error("Invalid template file: {0}")]
    InvalidTemplate(String),

    /// A style registry payload is not a mapping of set names to dictionaries.
    #[error("Invalid style registry: {0}")]
    InvalidRegistry(String),

    /// Error during source rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Markup(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRegistry("expected an object".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid style registry: expected an object"
        );

        let err = Error::Markup("unexpected end of input".to_string());
        assert_eq!(err.to_string(), "Markup error: unexpected end of input");
    }

    #[test]
    fn test_markup_error_conversion() {
        let xml_err = quick_xml::Error::Syntax(quick_xml::errors::SyntaxError::UnclosedTag);
        let err: Error = xml_err.into();
        assert!(matches!(err, Error::Markup(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
