//! Configuration file discovery
//!
//! A project keeps its site configuration under `.cms/` as `cmsgen.toml`,
//! `cmsgen.yaml`, `cmsgen.yml` or `cmsgen.json`. Every file found is loaded,
//! in that order, so later formats override earlier ones.

use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::ConfigResult;

/// Directory holding per-project cmsgen files.
pub const CONFIG_DIR: &str = ".cms";

/// Base name of the configuration file.
pub const CONFIG_STEM: &str = "cmsgen";

const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A configuration file and its detected format
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

impl ConfigFile {
    /// Describe an explicitly named file.
    ///
    /// Fails if the file is missing or its extension is not a known format.
    pub fn explicit(path: &Path) -> ConfigResult<Self> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = ConfigFormat::from_extension(ext).ok_or_else(|| {
            ConfigError::UnsupportedFormat {
                format: ext.to_string(),
            }
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
        })
    }
}

/// Finds configuration files in a project directory
pub struct FileDiscovery {
    project_root: PathBuf,
}

impl FileDiscovery {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Discover all configuration files, lowest precedence first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let dir = self.project_root.join(CONFIG_DIR);
        debug!("Discovering configuration in {}", dir.display());

        let files: Vec<ConfigFile> = EXTENSIONS
            .iter()
            .filter_map(|ext| {
                let path = dir.join(format!("{CONFIG_STEM}.{ext}"));
                if !path.is_file() {
                    return None;
                }
                trace!("Found config file: {}", path.display());
                let format = ConfigFormat::from_extension(ext)?;
                Some(ConfigFile { path, format })
            })
            .collect();

        debug!("Discovered {} configuration files", files.len());
        files
    }
}
