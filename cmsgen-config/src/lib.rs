//! Site configuration for cmsgen
//!
//! Loads a project's [`SiteConfig`] through figment (defaults, then
//! `.cms/cmsgen.{toml,yaml,yml,json}`, then `CMSGEN_` environment
//! variables) and its page-layout schemas from `.cms/layouts/*.json`.

pub mod discovery;
pub mod error;
pub mod layouts;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, FileDiscovery, CONFIG_DIR};
pub use error::ConfigError;
pub use layouts::load_layouts;
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{SiteConfig, DEFAULT_LAYOUTS_DIR, DEFAULT_OUTPUT};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
