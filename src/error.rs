use std::path::PathBuf;

use thiserror::Error;

/// Main application error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum SchemakerError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Schema parsing failures. Always fatal for the current request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed schema: {details}")]
    Malformed { details: String },
}

impl ParseError {
    pub fn malformed(details: impl Into<String>) -> Self {
        ParseError::Malformed {
            details: details.into(),
        }
    }
}

/// Argument extraction conditions that are recovered locally
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Attribute '{attribute}' has no complex-type wrapper with a wildcard")]
    MissingWrapper { attribute: String },
}

/// Schema source failures
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Schema not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cache-specific error types
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache read error: {key} - {details}")]
    Read { key: String, details: String },

    #[error("Cache write error: {key} - {details}")]
    Write { key: String, details: String },

    #[error("Cache corruption detected: {key} - {details}")]
    Corruption { key: String, details: String },

    #[error("Cache serialization error: {key} - {details}")]
    Serialization { key: String, details: String },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SchemakerError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::malformed("unexpected end of stream");
        assert!(err.to_string().contains("Malformed schema"));
        assert!(err.to_string().contains("unexpected end of stream"));

        let wrapped: SchemakerError = err.into();
        assert!(matches!(wrapped, SchemakerError::Parse(_)));
        assert!(wrapped.to_string().contains("Malformed schema"));
    }

    #[test]
    fn test_extraction_error_display() {
        let err = ExtractionError::MissingWrapper {
            attribute: "value".to_string(),
        };
        assert!(err.to_string().contains("'value'"));
    }

    #[test]
    fn test_source_error_display() {
        let not_found = SourceError::NotFound {
            path: PathBuf::from("/schemas/vhs-master.xsd"),
        };
        assert!(not_found.to_string().contains("vhs-master.xsd"));

        let io = SourceError::Io {
            path: PathBuf::from("/schemas/vhs-master.xsd"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(std::error::Error::source(&io).is_some());
    }

    #[test]
    fn test_cache_error_display() {
        let err = CacheError::Write {
            key: "tree.vhsmaster".to_string(),
            details: "disk full".to_string(),
        };
        assert!(err.to_string().contains("tree.vhsmaster"));
        assert!(err.to_string().contains("disk full"));
    }
}
