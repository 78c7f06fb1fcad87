//! CMS schema compiler
//!
//! Turns feature flags, enabled collections and page-layout block schemas
//! into the editor configuration document (`.pages.yml`).
//!
//! Compilation runs in fixed stages, none of which touch the filesystem:
//!
//! 1. [`FieldComposer`] builds each collection's field list from its shape
//! 2. [`view::validate`] trims each list view to fields that exist
//! 3. [`compile_blocks`] turns layout block schemas into a `blocks` field
//! 4. [`DocumentAssembler`] orders everything into a [`Document`]
//! 5. optionally [`dedupe`] shares repeated definitions via anchors
//!
//! ```
//! use cmsgen_compiler::{CompileInput, CompileOptions, Compiler};
//! use cmsgen_fields::{BuiltinRegistry, EnabledCollections};
//!
//! let registry = BuiltinRegistry::new();
//! let input = CompileInput {
//!     collections: EnabledCollections::new(["pages"]),
//!     ..Default::default()
//! };
//! let yaml = Compiler::new(&registry, CompileOptions::default())
//!     .render(&input)
//!     .unwrap();
//! assert!(yaml.contains("name: pages"));
//! ```

pub mod assemble;
pub mod blocks;
pub mod compile;
pub mod composer;
pub mod dedup;
pub mod emit;
pub mod error;
pub mod node;
pub mod schema;
pub mod view;

pub use assemble::DocumentAssembler;
pub use blocks::{compile_blocks, BlockField, BlockSchema, PageLayoutSchema};
pub use compile::{render_document, CompileInput, CompileOptions, Compiler};
pub use composer::{shape_for, FieldComposer};
pub use dedup::{dedupe, dedupe_value, SharedDocument, DEFINITIONS_KEY};
pub use error::{CompileError, Result};
pub use node::Node;
pub use schema::{CollectionSchema, Document, FileFormat, MediaConfig, SchemaKind, Settings};
pub use view::{RawView, ViewSpec};
