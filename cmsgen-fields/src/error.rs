//! Error types for the field model

use thiserror::Error;

/// Result type for field model operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while building a collection registry
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Registry override names a collection outside the known universe
    #[error("unknown collection: {name}")]
    UnknownCollection { name: String },

    /// Registry override is malformed
    #[error("invalid registry entry '{name}': {message}")]
    InvalidEntry { name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::UnknownCollection {
            name: "widgets".into(),
        };
        assert_eq!(err.to_string(), "unknown collection: widgets");
    }

    #[test]
    fn test_invalid_entry() {
        let err = FieldsError::InvalidEntry {
            name: "news".into(),
            message: "path must not be empty".into(),
        };
        assert!(err.to_string().contains("news"));
        assert!(err.to_string().contains("path must not be empty"));
    }
}
