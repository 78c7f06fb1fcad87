//! End-to-end compilation: inputs in, YAML text out.

use cmsgen_fields::{CollectionRegistry, EnabledCollections, FeatureFlags};
use tracing::warn;

use crate::assemble::DocumentAssembler;
use crate::blocks::PageLayoutSchema;
use crate::dedup::{dedupe, SharedDocument};
use crate::emit;
use crate::error::Result;
use crate::node::Node;
use crate::schema::{Document, MediaConfig};

/// Switches that shape the output but not the field lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub custom_homepage: bool,
    /// Share repeated field definitions through anchors and aliases.
    pub dedupe: bool,
    pub media: MediaConfig,
}

/// Everything that varies per site.
#[derive(Debug, Clone, Default)]
pub struct CompileInput {
    pub flags: FeatureFlags,
    pub collections: EnabledCollections,
    pub layouts: Vec<PageLayoutSchema>,
}

/// A configured compiler over an injected registry.
///
/// Compilation is pure: the same registry, options and input always render
/// byte-identical output.
pub struct Compiler<'r, R: CollectionRegistry + ?Sized> {
    registry: &'r R,
    options: CompileOptions,
}

impl<'r, R: CollectionRegistry + ?Sized> Compiler<'r, R> {
    pub fn new(registry: &'r R, options: CompileOptions) -> Self {
        Self { registry, options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    pub fn document(&self, input: &CompileInput) -> Document {
        for name in input.flags.unknown_names() {
            warn!(feature = name, "unknown feature flag ignored");
        }
        DocumentAssembler::new(self.registry)
            .custom_homepage(self.options.custom_homepage)
            .media(self.options.media.clone())
            .assemble(&input.flags, &input.collections, &input.layouts)
    }

    /// The deduplicated form of the document, regardless of options.
    pub fn shared(&self, input: &CompileInput) -> Result<SharedDocument> {
        dedupe(&self.document(input))
    }

    pub fn render(&self, input: &CompileInput) -> Result<String> {
        self.render_assembled(&self.document(input))
    }

    /// Render a document already built by [`Compiler::document`].
    ///
    /// Callers that also inspect the document use this to assemble once.
    pub fn render_assembled(&self, document: &Document) -> Result<String> {
        if self.options.dedupe {
            return Ok(dedupe(document)?.to_yaml());
        }
        render_document(document)
    }
}

/// Plain rendering of an assembled document.
pub fn render_document(document: &Document) -> Result<String> {
    let value = serde_yaml_ng::to_value(document)?;
    Ok(emit::to_yaml(&Node::from_value(&value)))
}
