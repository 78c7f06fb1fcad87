//! Site configuration types

use std::path::{Path, PathBuf};

use cmsgen_compiler::{CompileInput, CompileOptions, MediaConfig, PageLayoutSchema};
use cmsgen_fields::{BuiltinRegistry, CollectionInfo, EnabledCollections, FeatureFlags};
use serde::{Deserialize, Serialize};

use crate::ConfigResult;

/// Default location of layout schema files, relative to the project root.
pub const DEFAULT_LAYOUTS_DIR: &str = ".cms/layouts";

/// Default output path, relative to the project root.
pub const DEFAULT_OUTPUT: &str = ".pages.yml";

/// Everything one site sets for compilation.
///
/// Every key is optional in configuration sources; missing keys take the
/// values of [`SiteConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub features: FeatureFlags,
    pub collections: EnabledCollections,
    pub custom_homepage: bool,
    pub dedupe: bool,
    pub layouts_dir: PathBuf,
    pub output: PathBuf,
    pub media: MediaConfig,
    /// Replacements for built-in registry entries, matched by name.
    pub registry: Vec<CollectionInfo>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            features: FeatureFlags::default(),
            collections: EnabledCollections::default(),
            custom_homepage: false,
            dedupe: false,
            layouts_dir: PathBuf::from(DEFAULT_LAYOUTS_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            media: MediaConfig::default(),
            registry: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// The built-in registry with this site's overrides applied.
    pub fn build_registry(&self) -> ConfigResult<BuiltinRegistry> {
        let mut registry = BuiltinRegistry::new();
        for entry in &self.registry {
            registry.insert(entry.clone())?;
        }
        Ok(registry)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            custom_homepage: self.custom_homepage,
            dedupe: self.dedupe,
            media: self.media.clone(),
        }
    }

    pub fn compile_input(&self, layouts: Vec<PageLayoutSchema>) -> CompileInput {
        CompileInput {
            flags: self.features.clone(),
            collections: self.collections.clone(),
            layouts,
        }
    }

    /// Layouts directory, anchored at `root` when relative.
    pub fn layouts_path(&self, root: &Path) -> PathBuf {
        root.join(&self.layouts_dir)
    }

    /// Output file, anchored at `root` when relative.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmsgen_fields::{CollectionRegistry, Feature};

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.layouts_dir, PathBuf::from(".cms/layouts"));
        assert_eq!(config.output, PathBuf::from(".pages.yml"));
        assert!(!config.dedupe);
        assert!(config.collections.is_empty());
    }

    #[test]
    fn test_registry_overrides_replace_entries() {
        let mut news = CollectionInfo::new("news", "Blog");
        news.path = "src/blog".into();
        let config = SiteConfig {
            registry: vec![news],
            ..Default::default()
        };
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.lookup("news").unwrap().path, "src/blog");
        assert_eq!(registry.lookup("pages").unwrap().path, "src/pages");
    }

    #[test]
    fn test_registry_override_outside_universe_fails() {
        let config = SiteConfig {
            registry: vec![CollectionInfo::new("widgets", "Widgets")],
            ..Default::default()
        };
        assert!(config.build_registry().is_err());
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = SiteConfig {
            output: PathBuf::from("/srv/site/.pages.yml"),
            ..Default::default()
        };
        assert_eq!(
            config.output_path(Path::new("/project")),
            PathBuf::from("/srv/site/.pages.yml")
        );
        assert_eq!(
            config.layouts_path(Path::new("/project")),
            PathBuf::from("/project/.cms/layouts")
        );
    }

    #[test]
    fn test_compile_input_carries_flags() {
        let config = SiteConfig {
            features: FeatureFlags::new().enable(Feature::Faqs),
            collections: EnabledCollections::new(["pages"]),
            dedupe: true,
            ..Default::default()
        };
        let input = config.compile_input(Vec::new());
        assert!(input.flags.is_enabled(Feature::Faqs));
        assert!(input.collections.contains("pages"));
        assert!(config.compile_options().dedupe);
    }
}
