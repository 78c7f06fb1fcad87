//! Page-layout block schemas and their merge into one `blocks` field.
//!
//! Layout authors describe each block type with a map of field schemas.
//! The admin tool wants a single list-of-objects field whose items carry a
//! `type` discriminator, with one definition per field name.

use cmsgen_fields::{dedupe_by_name, Field, FieldType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};
use tracing::{trace, warn};

/// Name of the merged field emitted per layout.
pub const BLOCKS_FIELD: &str = "blocks";

/// Name of the per-block discriminator field.
pub const DISCRIMINATOR_FIELD: &str = "type";

/// An externally authored layout schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLayoutSchema {
    /// Addresses the layout's file; loaders fill it from the file name.
    #[serde(default)]
    pub slug: String,
    pub label: String,
    #[serde(default)]
    pub blocks: Vec<BlockSchema>,
}

/// One block type and its fields, keyed by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSchema {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub fields: IndexMap<String, BlockField>,
}

/// A field as written in a layout schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockField {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub list: bool,
    #[serde(default)]
    pub options: Mapping,
    #[serde(default)]
    pub fields: IndexMap<String, BlockField>,
}

impl BlockField {
    pub fn new(type_: &str) -> Self {
        Self {
            type_: type_.to_string(),
            label: None,
            description: None,
            required: false,
            default: None,
            list: false,
            options: Mapping::new(),
            fields: IndexMap::new(),
        }
    }

    pub fn labelled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(Value::from(key), value.into());
        self
    }

    /// Nest a child field, as for `object` types.
    pub fn with_field(mut self, name: &str, field: BlockField) -> Self {
        self.fields.insert(name.to_string(), field);
        self
    }
}

/// `hero_image` → `Hero image`
fn humanize(name: &str) -> String {
    let spaced = name.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert one layout field schema, recursing into nested fields.
pub fn convert_field(name: &str, schema: &BlockField) -> Field {
    let type_ = FieldType::parse(&schema.type_).unwrap_or_else(|| {
        warn!(field = name, ty = %schema.type_, "unknown block field type, using string");
        FieldType::String
    });
    let label = schema.label.clone().unwrap_or_else(|| humanize(name));
    let mut field = Field::new(name, label, type_);
    field.description = schema.description.clone();
    field.required = schema.required;
    field.default = schema.default.clone();
    field.list = schema.list;
    field.options = schema.options.clone();
    field.fields = schema
        .fields
        .iter()
        .map(|(child, child_schema)| convert_field(child, child_schema))
        .collect();
    field
}

/// The fields emitted for a single block: discriminator first.
fn block_fields(block: &BlockSchema) -> impl Iterator<Item = Field> + '_ {
    let discriminator = Field::new(DISCRIMINATOR_FIELD, "Block type", FieldType::String)
        .with_default(block.type_.as_str());
    std::iter::once(discriminator).chain(
        block
            .fields
            .iter()
            .map(|(name, schema)| convert_field(name, schema)),
    )
}

/// Merge every block of a layout into one `blocks` list field.
///
/// Field names shared between blocks keep the first block's definition.
pub fn compile_blocks(layout: &PageLayoutSchema) -> Field {
    let merged: Vec<Field> = layout.blocks.iter().flat_map(block_fields).collect();
    let (fields, dropped) = dedupe_by_name(merged);
    trace!(
        layout = %layout.slug,
        kept = fields.len(),
        merged = dropped.len(),
        "compiled layout blocks"
    );
    Field::new(BLOCKS_FIELD, "Blocks", FieldType::Object)
        .list()
        .with_fields(fields)
}
