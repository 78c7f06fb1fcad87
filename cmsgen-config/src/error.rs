//! Error types for site configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read a file or directory
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError { source: Box<figment::Error> },

    /// Configuration file format not supported
    #[error("Unsupported configuration file format: {format}")]
    UnsupportedFormat { format: String },

    /// A layout schema file is not valid layout JSON
    #[error("Invalid layout schema {path}: {source}")]
    Layout {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A registry override was rejected
    #[error(transparent)]
    Registry(#[from] cmsgen_fields::FieldsError),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}

impl ConfigError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::FileRead {
            path: path.into(),
            source,
        }
    }
}
