//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    types::SiteConfig,
    ConfigResult,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

/// Prefix of environment variables read as configuration.
///
/// Nested keys are separated by a double underscore, so
/// `CMSGEN_FEATURES__FAQS=true` sets `features.faqs`.
pub const ENV_PREFIX: &str = "CMSGEN_";

/// Loads [`SiteConfig`] for one project.
///
/// Sources in precedence order (later override earlier):
/// 1. [`SiteConfig::default`]
/// 2. the explicit file if one was given, else `.cms/cmsgen.*` files
/// 3. `CMSGEN_` environment variables
///
/// Nothing is cached; every call reads the sources afresh.
pub struct ConfigProvider {
    project_root: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigProvider {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            explicit: None,
        }
    }

    /// Read this file instead of discovering one.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn load(&self) -> ConfigResult<SiteConfig> {
        let config: SiteConfig = self.build_figment()?.extract()?;
        info!(
            collections = config.collections.len(),
            dedupe = config.dedupe,
            "loaded site configuration"
        );
        Ok(config)
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        debug!("Building figment configuration with precedence order");
        let figment = Figment::new()
            .merge(Serialized::defaults(SiteConfig::default()))
            .merge(self.load_config_files()?)
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Ok(figment)
    }

    fn load_config_files(&self) -> ConfigResult<Figment> {
        let files = match &self.explicit {
            Some(path) => vec![ConfigFile::explicit(path)?],
            None => FileDiscovery::new(&self.project_root).discover_all(),
        };

        let mut figment = Figment::new();
        for file in files {
            trace!(
                "Loading config file: {} ({:?})",
                file.path.display(),
                file.format
            );
            figment = figment.merge(load_config_file(&file));
        }
        Ok(figment)
    }
}

fn load_config_file(file: &ConfigFile) -> Figment {
    let path = &file.path;
    match file.format {
        ConfigFormat::Toml => Figment::from(Toml::file(path)),
        ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
        ConfigFormat::Json => Figment::from(Json::file(path)),
    }
}
