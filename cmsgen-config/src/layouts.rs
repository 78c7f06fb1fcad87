//! Page-layout schema loading.

use std::fs;
use std::path::Path;

use cmsgen_compiler::PageLayoutSchema;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::ConfigResult;

/// Load every `*.json` layout schema in `dir`, sorted by file name.
///
/// A missing directory means the site has no layouts. A layout without a
/// `slug` takes its file stem.
pub fn load_layouts(dir: &Path) -> ConfigResult<Vec<PageLayoutSchema>> {
    if !dir.is_dir() {
        debug!("No layouts directory at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| ConfigError::file_read(dir, e))? {
        let path = entry.map_err(|e| ConfigError::file_read(dir, e))?.path();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut layouts = Vec::with_capacity(paths.len());
    for path in paths {
        trace!("Loading layout schema: {}", path.display());
        let text = fs::read_to_string(&path).map_err(|e| ConfigError::file_read(&path, e))?;
        let mut layout: PageLayoutSchema =
            serde_json::from_str(&text).map_err(|source| ConfigError::Layout {
                path: path.clone(),
                source,
            })?;
        if layout.slug.is_empty() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                layout.slug = stem.to_string();
            }
        }
        layouts.push(layout);
    }

    debug!("Loaded {} layout schemas from {}", layouts.len(), dir.display());
    Ok(layouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dir_yields_no_layouts() {
        let temp = TempDir::new().unwrap();
        let layouts = load_layouts(&temp.path().join("nope")).unwrap();
        assert!(layouts.is_empty());
    }

    #[test]
    fn test_layouts_sorted_with_stem_slugs() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("landing.json"),
            r#"{"label": "Landing", "blocks": [{"type": "hero", "fields": {"heading": {"type": "string"}}}]}"#,
        )
        .unwrap();
        fs::write(
            temp.path().join("about.json"),
            r#"{"slug": "about-us", "label": "About"}"#,
        )
        .unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let layouts = load_layouts(temp.path()).unwrap();
        let slugs: Vec<_> = layouts.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, vec!["about-us", "landing"]);
        assert_eq!(layouts[1].blocks[0].type_, "hero");
    }

    #[test]
    fn test_invalid_layout_names_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.json"), "{").unwrap();
        let err = load_layouts(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Layout { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
