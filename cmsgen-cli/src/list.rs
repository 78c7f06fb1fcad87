//! The `collections` and `features` listings.

use cmsgen_fields::{BuiltinRegistry, Feature};
use comfy_table::{presets::UTF8_FULL, Table};

fn mark(on: bool) -> &'static str {
    if on {
        "yes"
    } else {
        ""
    }
}

/// Table of every registry entry with its capabilities.
pub fn collections_table(registry: &BuiltinRegistry) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Name", "Label", "Path", "Gallery", "Specs", "Add-ons", "Tabs",
    ]);
    for info in registry.entries() {
        table.add_row(vec![
            info.name.as_str(),
            info.label.as_str(),
            info.path.as_str(),
            mark(info.supports_gallery),
            mark(info.supports_specs),
            mark(info.supports_add_ons),
            mark(info.supports_tabs),
        ]);
    }
    table.to_string()
}

/// One feature flag name per line.
pub fn feature_list() -> String {
    Feature::ALL
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
