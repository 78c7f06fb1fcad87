//! Reusable field shapes.
//!
//! Plain factories: every call returns a fresh [`Field`], so callers can
//! adjust a copy without touching anyone else's.

use serde_yaml_ng::{Mapping, Value};

use crate::types::{Field, FieldType};

pub fn title() -> Field {
    Field::new("title", "Title", FieldType::String).required()
}

pub fn subtitle() -> Field {
    Field::new("subtitle", "Subtitle", FieldType::String)
}

pub fn thumbnail() -> Field {
    Field::new("thumbnail", "Thumbnail", FieldType::Image)
}

pub fn order() -> Field {
    Field::new("order", "Order", FieldType::Number).with_default(0)
}

/// Main content. The visual editor gets a rich-text field, otherwise a
/// markdown source editor.
pub fn body(visual_editor: bool) -> Field {
    if visual_editor {
        Field::new("body", "Body", FieldType::RichText)
    } else {
        Field::new("body", "Body", FieldType::Code).with_option("language", "markdown")
    }
}

pub fn header_image() -> Field {
    Field::new("header_image", "Header image", FieldType::Image)
}

pub fn header_text() -> Field {
    Field::new("header_text", "Header text", FieldType::String)
}

pub fn meta_title() -> Field {
    Field::new("meta_title", "Meta title", FieldType::String)
        .described("Overrides the page title in search results")
}

pub fn meta_description() -> Field {
    Field::new("meta_description", "Meta description", FieldType::Text)
}

pub fn no_index() -> Field {
    Field::new("no_index", "Hide from search engines", FieldType::Boolean).with_default(false)
}

pub fn permalink() -> Field {
    Field::new("permalink", "Permalink", FieldType::String)
        .described("Custom URL path, e.g. /about-us/")
}

pub fn redirect_from() -> Field {
    Field::new("redirect_from", "Redirect from", FieldType::String)
        .list()
        .described("Old URLs that should redirect here")
}

pub fn faqs() -> Field {
    Field::new("faqs", "FAQs", FieldType::Object)
        .list()
        .with_fields(vec![
            Field::new("question", "Question", FieldType::String).required(),
            Field::new("answer", "Answer", FieldType::Text).required(),
        ])
}

pub fn gallery() -> Field {
    Field::new("gallery", "Gallery", FieldType::Image).with_option("multiple", true)
}

pub fn specs() -> Field {
    Field::new("specs", "Specifications", FieldType::Object)
        .list()
        .with_fields(vec![
            Field::new("name", "Name", FieldType::String).required(),
            Field::new("value", "Value", FieldType::String).required(),
        ])
}

pub fn add_ons() -> Field {
    Field::new("add_ons", "Add-ons", FieldType::Object)
        .list()
        .with_fields(vec![
            Field::new("name", "Name", FieldType::String).required(),
            Field::new("price", "Price", FieldType::String),
        ])
}

pub fn tabs() -> Field {
    Field::new("tabs", "Tabs", FieldType::Object)
        .list()
        .with_fields(vec![
            Field::new("title", "Title", FieldType::String),
            Field::new("body", "Content", FieldType::Text),
        ])
}

pub fn keywords() -> Field {
    Field::new("keywords", "Keywords", FieldType::String).list()
}

pub fn features() -> Field {
    Field::new("features", "Features", FieldType::String).list()
}

pub fn videos() -> Field {
    Field::new("videos", "Videos", FieldType::Object)
        .list()
        .with_fields(vec![
            Field::new("title", "Title", FieldType::String),
            Field::new("url", "Video URL", FieldType::String).required(),
        ])
}

/// A reference to entries of another collection, labelled and searched by
/// their title.
pub fn reference(name: &str, label: &str, collection: &str, multiple: bool) -> Field {
    let mut options = Mapping::new();
    options.insert("collection".into(), collection.into());
    options.insert("search".into(), "title".into());
    options.insert("value".into(), "{path}".into());
    options.insert("label".into(), "{title}".into());
    if multiple {
        options.insert("multiple".into(), Value::Bool(true));
    }
    let mut field = Field::new(name, label, FieldType::Reference);
    field.options = options;
    field
}

/// Site navigation entry. External URLs add a `url` override.
pub fn navigation(external_urls: bool) -> Field {
    let mut fields = vec![
        Field::new("key", "Menu label", FieldType::String),
        Field::new("parent", "Parent", FieldType::String),
        Field::new("order", "Menu order", FieldType::Number),
    ];
    if external_urls {
        fields.push(Field::new("url", "External URL", FieldType::String));
    }
    Field::new("eleventyNavigation", "Navigation", FieldType::Object).with_fields(fields)
}
