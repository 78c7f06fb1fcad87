//! Collection registry: name → label, storage path, capability flags.
//!
//! The compiler only reads the registry through [`CollectionRegistry`], so
//! tests and callers can inject any table they like. [`BuiltinRegistry`]
//! carries the fixed collection universe with its default capabilities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldsError, Result};

/// Every collection name the template knows how to model.
pub const COLLECTION_UNIVERSE: [&str; 15] = [
    "pages",
    "categories",
    "team",
    "news",
    "products",
    "reviews",
    "events",
    "locations",
    "properties",
    "menus",
    "menu-categories",
    "menu-items",
    "guide-categories",
    "guide-pages",
    "snippets",
];

/// A registry entry describing one collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub supports_gallery: bool,
    #[serde(default)]
    pub supports_specs: bool,
    #[serde(default)]
    pub supports_add_ons: bool,
    #[serde(default)]
    pub supports_tabs: bool,
    #[serde(default)]
    pub subfolders: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl CollectionInfo {
    /// An entry stored under `src/<name>` with every capability off.
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            path: format!("src/{name}"),
            supports_gallery: false,
            supports_specs: false,
            supports_add_ons: false,
            supports_tabs: false,
            subfolders: false,
            exclude: Vec::new(),
        }
    }

    /// Entries get an image gallery when galleries are switched on.
    pub fn gallery(mut self) -> Self {
        self.supports_gallery = true;
        self
    }

    pub fn specs(mut self) -> Self {
        self.supports_specs = true;
        self
    }

    pub fn add_ons(mut self) -> Self {
        self.supports_add_ons = true;
        self
    }

    /// Tabbed content sections.
    pub fn tabs(mut self) -> Self {
        self.supports_tabs = true;
        self
    }

    /// Entries may live in nested folders under `path`.
    pub fn subfolders(mut self) -> Self {
        self.subfolders = true;
        self
    }

    /// File names under `path` the editor should not list, such as an
    /// index page that is edited elsewhere.
    pub fn excluding(mut self, names: &[&str]) -> Self {
        self.exclude = names.iter().map(|n| n.to_string()).collect();
        self
    }
}

/// Read-only lookup from collection name to its registry entry.
pub trait CollectionRegistry {
    /// Look up a collection. Unknown names yield `None`, never an error.
    fn lookup(&self, name: &str) -> Option<&CollectionInfo>;
}

/// The built-in collection table, optionally overridden per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinRegistry {
    entries: BTreeMap<String, CollectionInfo>,
}

impl BuiltinRegistry {
    /// Every collection of [`COLLECTION_UNIVERSE`] with its default capabilities.
    pub fn new() -> Self {
        let entries = [
            CollectionInfo::new("pages", "Pages").subfolders().excluding(&["index.md"]),
            CollectionInfo::new("categories", "Categories").gallery(),
            CollectionInfo::new("team", "Team"),
            CollectionInfo::new("news", "News"),
            CollectionInfo::new("products", "Products")
                .gallery()
                .specs()
                .add_ons()
                .tabs(),
            CollectionInfo::new("reviews", "Reviews"),
            CollectionInfo::new("events", "Events").gallery(),
            CollectionInfo::new("locations", "Locations").gallery(),
            CollectionInfo::new("properties", "Properties")
                .gallery()
                .specs()
                .tabs(),
            CollectionInfo::new("menus", "Menus"),
            CollectionInfo::new("menu-categories", "Menu Categories"),
            CollectionInfo::new("menu-items", "Menu Items"),
            CollectionInfo::new("guide-categories", "Guide Categories"),
            CollectionInfo::new("guide-pages", "Guide Pages"),
            CollectionInfo::new("snippets", "Snippets"),
        ];
        Self::empty().with_entries(entries)
    }

    /// A registry with no entries at all.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add or replace entries by name.
    pub fn with_entries(mut self, entries: impl IntoIterator<Item = CollectionInfo>) -> Self {
        for entry in entries {
            self.entries.insert(entry.name.clone(), entry);
        }
        self
    }

    /// Replace an entry of the known universe.
    ///
    /// Overrides may only target names the composer knows how to shape.
    pub fn insert(&mut self, entry: CollectionInfo) -> Result<()> {
        if !COLLECTION_UNIVERSE.contains(&entry.name.as_str()) {
            return Err(FieldsError::UnknownCollection { name: entry.name });
        }
        if entry.path.trim().is_empty() {
            return Err(FieldsError::InvalidEntry {
                name: entry.name,
                message: "path must not be empty".into(),
            });
        }
        debug!(name = %entry.name, path = %entry.path, "registry entry overridden");
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Entries in universe order.
    pub fn entries(&self) -> impl Iterator<Item = &CollectionInfo> {
        COLLECTION_UNIVERSE
            .iter()
            .filter_map(|name| self.entries.get(*name))
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionRegistry for BuiltinRegistry {
    fn lookup(&self, name: &str) -> Option<&CollectionInfo> {
        self.entries.get(name)
    }
}

impl CollectionRegistry for BTreeMap<String, CollectionInfo> {
    fn lookup(&self, name: &str) -> Option<&CollectionInfo> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_universe() {
        let registry = BuiltinRegistry::new();
        for name in COLLECTION_UNIVERSE {
            let info = registry.lookup(name).unwrap();
            assert_eq!(info.path, format!("src/{name}"));
        }
        assert_eq!(registry.entries().count(), COLLECTION_UNIVERSE.len());
    }

    #[test]
    fn unknown_lookup_is_none() {
        assert!(BuiltinRegistry::new().lookup("widgets").is_none());
    }

    #[test]
    fn insert_overrides_known_entry() {
        let mut registry = BuiltinRegistry::new();
        registry
            .insert(CollectionInfo::new("team", "Staff").gallery())
            .unwrap();
        let team = registry.lookup("team").unwrap();
        assert_eq!(team.label, "Staff");
        assert!(team.supports_gallery);
    }

    #[test]
    fn insert_rejects_names_outside_universe() {
        let mut registry = BuiltinRegistry::new();
        let err = registry
            .insert(CollectionInfo::new("widgets", "Widgets"))
            .unwrap_err();
        assert!(matches!(err, FieldsError::UnknownCollection { .. }));
    }

    #[test]
    fn insert_rejects_empty_path() {
        let mut registry = BuiltinRegistry::new();
        let mut entry = CollectionInfo::new("news", "News");
        entry.path = "  ".into();
        assert!(matches!(
            registry.insert(entry),
            Err(FieldsError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn map_registry_is_injectable() {
        let mut map = BTreeMap::new();
        map.insert("news".to_string(), CollectionInfo::new("news", "Posts"));
        assert_eq!(map.lookup("news").unwrap().label, "Posts");
        assert!(map.lookup("pages").is_none());
    }
}
