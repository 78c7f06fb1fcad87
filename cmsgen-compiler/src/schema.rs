//! Output document types.

use cmsgen_fields::Field;
use serde::{Deserialize, Serialize};

use crate::view::ViewSpec;

/// Whether an entry is a folder of content or a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    Collection,
    File,
}

/// How a file-backed entry stores its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileFormat {
    YamlFrontmatter,
    Json,
}

/// One entry of the document's `content` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: SchemaKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FileFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subfolders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewSpec>,
    pub fields: Vec<Field>,
}

impl CollectionSchema {
    /// A single-file entry.
    pub fn file(name: &str, label: &str, path: &str, format: FileFormat, fields: Vec<Field>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: SchemaKind::File,
            path: path.to_string(),
            format: Some(format),
            subfolders: None,
            filename: None,
            exclude: None,
            view: None,
            fields,
        }
    }
}

/// Where uploaded media lives in the repository and on the built site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConfig {
    pub input: String,
    pub output: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            input: "src/images".into(),
            output: "/images".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSettings {
    pub merge: bool,
}

/// Editor behaviour: hide unlisted fields, merge on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub hide: bool,
    pub content: ContentSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hide: true,
            content: ContentSettings { merge: true },
        }
    }
}

/// The compiled content model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub media: MediaConfig,
    pub settings: Settings,
    pub content: Vec<CollectionSchema>,
}

impl Document {
    pub fn entry(&self, name: &str) -> Option<&CollectionSchema> {
        self.content.iter().find(|c| c.name == name)
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.content.iter().map(|c| c.name.as_str()).collect()
    }
}
