//! Error types for document rendering

use thiserror::Error;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors raised while turning a document into YAML.
///
/// Composition itself cannot fail; only serialization and alias
/// resolution can.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Document could not be converted to a YAML value
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// An alias names an anchor that was never defined before it
    #[error("unresolved alias: *{anchor}")]
    UnresolvedAlias { anchor: String },
}
