//! Core field types for the content model.
//!
//! All types serialize to YAML via serde in the shape the admin tool reads:
//! a field is a named, typed attribute, optionally nested (`object`) or
//! repeated (`list`). Empty members are never written.

use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};
use tracing::warn;

use crate::flags::EnabledCollections;

/// The type of a field, as understood by the admin tool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    String,
    /// Multi-line plain text.
    Text,
    /// WYSIWYG body editor.
    RichText,
    Number,
    Boolean,
    Image,
    Date,
    /// Container for nested `fields`.
    Object,
    /// Source editor; `options.language` selects the syntax.
    Code,
    /// Points at entries of another collection via `options.collection`.
    Reference,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::RichText => "rich-text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Image => "image",
            FieldType::Date => "date",
            FieldType::Object => "object",
            FieldType::Code => "code",
            FieldType::Reference => "reference",
        }
    }

    /// Parse a type name, accepting the handful of aliases layout authors use.
    pub fn parse(name: &str) -> Option<Self> {
        let ty = match name {
            "string" => FieldType::String,
            "text" => FieldType::Text,
            "rich-text" | "richtext" | "markdown" => FieldType::RichText,
            "number" => FieldType::Number,
            "boolean" | "bool" => FieldType::Boolean,
            "image" | "file" => FieldType::Image,
            "date" => FieldType::Date,
            "object" => FieldType::Object,
            "code" => FieldType::Code,
            "reference" => FieldType::Reference,
            _ => return None,
        };
        Some(ty)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A field definition: the complete schema for a single named attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub type_: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub list: bool,
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub options: Mapping,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Field {
    /// A bare optional field; the builder methods below fill in the rest.
    pub fn new(name: impl Into<String>, label: impl Into<String>, type_: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            type_,
            description: None,
            required: false,
            default: None,
            list: false,
            options: Mapping::new(),
            fields: Vec::new(),
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Repeatable: the editor stores a list of values.
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    /// Help text shown under the input.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set a single entry in `options`, replacing any previous value.
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(Value::String(key.to_string()), value.into());
        self
    }

    /// Child fields of an `object`. Replaces any already set.
    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }

    /// The target collection of a reference field, if this is one.
    pub fn reference_target(&self) -> Option<&str> {
        if self.type_ != FieldType::Reference {
            return None;
        }
        self.options.get("collection").and_then(Value::as_str)
    }

    /// Visit this field and every nested field, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Field)) {
        visit(self);
        for child in &self.fields {
            child.walk(visit);
        }
    }
}

/// Names of a field list, in order.
pub fn field_names(fields: &[Field]) -> Vec<String> {
    fields.iter().map(|f| f.name.clone()).collect()
}

/// Drop every field whose name was already seen, keeping the first.
///
/// Returns the names that were dropped so callers can report them.
pub fn dedupe_by_name(fields: Vec<Field>) -> (Vec<Field>, Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    let mut kept = Vec::with_capacity(fields.len());
    let mut dropped = Vec::new();
    for field in fields {
        if seen.insert(field.name.clone()) {
            kept.push(field);
        } else {
            dropped.push(field.name);
        }
    }
    (kept, dropped)
}

/// Remove reference fields, at any depth, whose target is not enabled.
///
/// `owner` names the entry the fields belong to, for the log.
pub fn drop_dangling_references(
    owner: &str,
    fields: Vec<Field>,
    enabled: &EnabledCollections,
) -> Vec<Field> {
    fields
        .into_iter()
        .filter_map(|mut field| {
            if let Some(target) = field.reference_target() {
                if !enabled.contains(target) {
                    warn!(owner, field = %field.name, referenced = target, "dropped dangling reference");
                    return None;
                }
            }
            field.fields = drop_dangling_references(owner, field.fields, enabled);
            Some(field)
        })
        .collect()
}
