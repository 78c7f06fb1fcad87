//! Field model for the CMS schema compiler
//!
//! `cmsgen-fields` is a schema-only crate. It owns the vocabulary the
//! compiler works in and knows nothing about how documents are assembled.
//!
//! # Architecture
//!
//! - **Field catalog**: factories for the reusable field shapes (`title`, `body`, meta, ...)
//! - **Inputs**: [`FeatureFlags`] and [`EnabledCollections`], immutable per compilation
//! - **Registry**: [`CollectionRegistry`] is injected; [`BuiltinRegistry`] is the default table

pub mod catalog;
pub mod error;
pub mod flags;
pub mod registry;
pub mod types;

pub use error::{FieldsError, Result};
pub use flags::{EnabledCollections, Feature, FeatureFlags};
pub use registry::{BuiltinRegistry, CollectionInfo, CollectionRegistry, COLLECTION_UNIVERSE};
pub use types::{dedupe_by_name, drop_dangling_references, field_names, Field, FieldType};
