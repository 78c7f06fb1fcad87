//! Document assembly: collections, layouts and the fixed file entries.

use std::collections::HashSet;

use cmsgen_fields::{
    catalog, drop_dangling_references, field_names, CollectionInfo, CollectionRegistry,
    EnabledCollections, FeatureFlags, Field, FieldType,
};
use tracing::{debug, info, warn};

use crate::blocks::{compile_blocks, PageLayoutSchema};
use crate::composer::FieldComposer;
use crate::schema::{CollectionSchema, Document, FileFormat, MediaConfig, SchemaKind, Settings};
use crate::view::{raw_view, validate};

/// Filename template for collection entries.
pub const ENTRY_FILENAME: &str = "{primary}.md";

/// Combines every schema source into one [`Document`].
pub struct DocumentAssembler<'r, R: CollectionRegistry + ?Sized> {
    registry: &'r R,
    custom_homepage: bool,
    media: MediaConfig,
}

impl<'r, R: CollectionRegistry + ?Sized> DocumentAssembler<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self {
            registry,
            custom_homepage: false,
            media: MediaConfig::default(),
        }
    }

    /// A site with its own homepage gets no homepage settings entry.
    pub fn custom_homepage(mut self, custom: bool) -> Self {
        self.custom_homepage = custom;
        self
    }

    pub fn media(mut self, media: MediaConfig) -> Self {
        self.media = media;
        self
    }

    /// Assemble the document.
    ///
    /// `content` order: enabled collections as given, layouts, homepage,
    /// site, meta, alt-tags. Names missing from the registry are skipped,
    /// as are layouts with an empty or already-used slug.
    pub fn assemble(
        &self,
        flags: &FeatureFlags,
        enabled: &EnabledCollections,
        layouts: &[PageLayoutSchema],
    ) -> Document {
        let composer = FieldComposer::new(self.registry);
        let mut content = Vec::with_capacity(enabled.len() + layouts.len() + 4);

        for name in enabled.iter() {
            let Some(info) = self.registry.lookup(name) else {
                debug!(collection = name, "not in registry, skipped");
                continue;
            };
            let fields = composer.compose(name, flags, enabled);
            debug!(collection = name, fields = fields.len(), "compiled collection");
            content.push(collection_schema(info, fields));
        }

        let mut slugs = HashSet::new();
        for layout in layouts {
            if layout.slug.is_empty() {
                warn!(label = %layout.label, "layout without a slug skipped");
                continue;
            }
            if !slugs.insert(layout.slug.as_str()) {
                warn!(slug = %layout.slug, "duplicate layout slug skipped");
                continue;
            }
            content.push(layout_schema(layout, enabled));
        }

        if !self.custom_homepage {
            content.push(homepage_schema());
        }
        content.push(site_schema());
        content.push(meta_schema());
        content.push(alt_tags_schema());

        info!(
            entries = content.len(),
            layouts = layouts.len(),
            "assembled content model"
        );

        Document {
            media: self.media.clone(),
            settings: Settings::default(),
            content,
        }
    }
}

fn collection_schema(info: &CollectionInfo, fields: Vec<Field>) -> CollectionSchema {
    let view = raw_view(&info.name).map(|raw| validate(&raw, &field_names(&fields)));
    CollectionSchema {
        name: info.name.clone(),
        label: info.label.clone(),
        kind: SchemaKind::Collection,
        path: info.path.clone(),
        format: None,
        subfolders: info.subfolders.then_some(true),
        filename: Some(ENTRY_FILENAME.to_string()),
        exclude: (!info.exclude.is_empty()).then(|| info.exclude.clone()),
        view,
        fields,
    }
}

/// Path of a layout's singleton file.
pub fn layout_path(slug: &str) -> String {
    format!("src/_layouts/{slug}.md")
}

fn layout_schema(layout: &PageLayoutSchema, enabled: &EnabledCollections) -> CollectionSchema {
    let name = format!("layout-{}", layout.slug);
    let fields = vec![catalog::title(), compile_blocks(layout)];
    let fields = drop_dangling_references(&name, fields, enabled);
    CollectionSchema::file(
        &name,
        &layout.label,
        &layout_path(&layout.slug),
        FileFormat::YamlFrontmatter,
        fields,
    )
}

fn homepage_schema() -> CollectionSchema {
    CollectionSchema::file(
        "homepage",
        "Homepage",
        "src/index.md",
        FileFormat::YamlFrontmatter,
        vec![
            catalog::title(),
            catalog::subtitle(),
            catalog::header_image(),
            catalog::header_text(),
            catalog::body(false),
            catalog::meta_title(),
            catalog::meta_description(),
        ],
    )
}

fn site_schema() -> CollectionSchema {
    CollectionSchema::file(
        "site",
        "Site settings",
        "src/_data/site.json",
        FileFormat::Json,
        vec![
            Field::new("name", "Site name", FieldType::String).required(),
            Field::new("url", "Site URL", FieldType::String),
            Field::new("description", "Description", FieldType::Text),
            Field::new("email", "Email", FieldType::String),
            Field::new("phone", "Phone", FieldType::String),
            Field::new("address", "Address", FieldType::Text),
            Field::new("logo", "Logo", FieldType::Image),
            Field::new("socials", "Social links", FieldType::Object)
                .list()
                .with_fields(vec![
                    Field::new("name", "Platform", FieldType::String),
                    Field::new("url", "URL", FieldType::String),
                ]),
        ],
    )
}

fn meta_schema() -> CollectionSchema {
    CollectionSchema::file(
        "meta",
        "Metadata",
        "src/_data/meta.json",
        FileFormat::Json,
        vec![
            Field::new("language", "Language", FieldType::String).with_default("en-GB"),
            Field::new("title_suffix", "Title suffix", FieldType::String),
            Field::new("default_image", "Default share image", FieldType::Image),
        ],
    )
}

fn alt_tags_schema() -> CollectionSchema {
    CollectionSchema::file(
        "alt-tags",
        "Alt tags",
        "src/_data/alt-tags.json",
        FileFormat::Json,
        vec![Field::new("images", "Images", FieldType::Object)
            .list()
            .with_fields(vec![
                Field::new("path", "Image", FieldType::Image).required(),
                Field::new("alt", "Alt text", FieldType::String).required(),
            ])],
    )
}
