//! Whole-pipeline properties of the compiler.

use cmsgen_compiler::{
    compile_blocks, dedupe, render_document, view, BlockField, BlockSchema, CompileInput,
    CompileOptions, Compiler, Document, PageLayoutSchema, RawView, ViewSpec,
};
use cmsgen_fields::{
    field_names, BuiltinRegistry, EnabledCollections, Feature, FeatureFlags, COLLECTION_UNIVERSE,
};
use indexmap::IndexMap;
use serde_yaml_ng::Value;

fn layout(slug: &str, blocks: Vec<BlockSchema>) -> PageLayoutSchema {
    PageLayoutSchema {
        slug: slug.into(),
        label: slug.into(),
        blocks,
    }
}

fn block(type_: &str, fields: &[(&str, BlockField)]) -> BlockSchema {
    BlockSchema {
        type_: type_.into(),
        fields: fields
            .iter()
            .map(|(name, f)| (name.to_string(), f.clone()))
            .collect::<IndexMap<_, _>>(),
    }
}

fn sample_layouts() -> Vec<PageLayoutSchema> {
    vec![layout(
        "landing",
        vec![
            block(
                "hero",
                &[
                    ("heading", BlockField::new("string").labelled("Hero heading")),
                    ("image", BlockField::new("image")),
                ],
            ),
            block(
                "cta",
                &[
                    ("heading", BlockField::new("string").labelled("CTA heading")),
                    ("link", BlockField::new("string")),
                ],
            ),
        ],
    ),
    layout(
        "shop",
        vec![block(
            "picks",
            &[
                ("heading", BlockField::new("string")),
                (
                    "featured",
                    BlockField::new("reference").with_option("collection", "products"),
                ),
                (
                    "filters",
                    BlockField::new("object").list().with_field(
                        "category",
                        BlockField::new("reference").with_option("collection", "categories"),
                    ),
                ),
            ],
        )],
    )]
}

/// A fixed matrix of flag sets and collection sets.
fn matrix() -> Vec<CompileInput> {
    let flag_sets = vec![
        FeatureFlags::new(),
        FeatureFlags::all_enabled(),
        FeatureFlags::new()
            .enable(Feature::Faqs)
            .enable(Feature::Permalinks),
        Feature::ALL
            .into_iter()
            .enumerate()
            .map(|(i, f)| (f, i % 2 == 0))
            .collect(),
    ];
    let collection_sets: Vec<Vec<&str>> = vec![
        vec![],
        COLLECTION_UNIVERSE.to_vec(),
        vec!["pages", "news"],
        vec!["products", "categories"],
        vec!["events", "locations", "team"],
        vec!["properties", "reviews", "snippets"],
        COLLECTION_UNIVERSE.iter().rev().copied().collect(),
    ];

    let mut inputs = Vec::new();
    for flags in &flag_sets {
        for names in &collection_sets {
            inputs.push(CompileInput {
                flags: flags.clone(),
                collections: EnabledCollections::new(names.iter().copied()),
                layouts: sample_layouts(),
            });
        }
    }
    inputs
}

fn option_sets() -> Vec<CompileOptions> {
    vec![
        CompileOptions::default(),
        CompileOptions {
            custom_homepage: true,
            dedupe: true,
            ..Default::default()
        },
    ]
}

#[test]
fn compiling_twice_is_identical() {
    let registry = BuiltinRegistry::new();
    for options in option_sets() {
        let compiler = Compiler::new(&registry, options);
        for input in matrix() {
            assert_eq!(compiler.document(&input), compiler.document(&input));
            assert_eq!(
                compiler.render(&input).unwrap(),
                compiler.render(&input).unwrap()
            );
        }
    }
}

#[test]
fn every_reference_targets_an_enabled_collection() {
    let registry = BuiltinRegistry::new();
    let compiler = Compiler::new(&registry, CompileOptions::default());
    for input in matrix() {
        let doc = compiler.document(&input);
        for entry in &doc.content {
            for field in &entry.fields {
                field.walk(&mut |f| {
                    if let Some(target) = f.reference_target() {
                        assert!(
                            input.collections.contains(target),
                            "{}.{} points at disabled {target}",
                            entry.name,
                            f.name
                        );
                    }
                });
            }
        }
    }
}

#[test]
fn references_appear_when_targets_are_enabled() {
    let registry = BuiltinRegistry::new();
    let compiler = Compiler::new(&registry, CompileOptions::default());
    let input = CompileInput {
        flags: FeatureFlags::all_enabled(),
        collections: EnabledCollections::new(COLLECTION_UNIVERSE),
        layouts: vec![],
    };
    let doc = compiler.document(&input);
    let mut references = 0;
    for entry in &doc.content {
        for field in &entry.fields {
            field.walk(&mut |f| {
                if f.reference_target().is_some() {
                    references += 1;
                }
            });
        }
    }
    assert!(references > 0);
}

#[test]
fn layout_references_follow_the_enabled_collections() {
    let registry = BuiltinRegistry::new();
    let compiler = Compiler::new(&registry, CompileOptions::default());
    let layout_blocks = |names: &[&str]| {
        let input = CompileInput {
            collections: EnabledCollections::new(names.iter().copied()),
            layouts: sample_layouts(),
            ..Default::default()
        };
        compiler.document(&input).entry("layout-shop").unwrap().fields[1].clone()
    };

    let blocks = layout_blocks(&["pages"]);
    assert_eq!(field_names(&blocks.fields), vec!["type", "heading", "filters"]);
    assert!(blocks.fields[2].fields.is_empty());

    let blocks = layout_blocks(&["products", "categories"]);
    assert_eq!(
        field_names(&blocks.fields),
        vec!["type", "heading", "featured", "filters"]
    );
    assert_eq!(field_names(&blocks.fields[3].fields), vec!["category"]);
}

#[test]
fn unknown_collections_are_omitted() {
    let registry = BuiltinRegistry::new();
    let compiler = Compiler::new(&registry, CompileOptions::default());
    let input = CompileInput {
        collections: EnabledCollections::new(["pages", "retired-widgets", "news"]),
        ..Default::default()
    };
    let doc = compiler.document(&input);
    assert!(doc.entry("retired-widgets").is_none());
    assert_eq!(&doc.entry_names()[..2], &["pages", "news"]);
}

#[test]
fn view_falls_back_to_title() {
    let raw = RawView::new(&["nonexistent"], "nonexistent", &["nonexistent"]);
    let available = vec!["title".to_string(), "subtitle".to_string()];
    assert_eq!(
        view::validate(&raw, &available),
        ViewSpec {
            fields: vec!["title".into()],
            primary: "title".into(),
            sort: vec!["title".into()],
        }
    );
}

#[test]
fn view_primary_falls_back_to_first_surviving_column() {
    let raw = RawView::new(&["thumbnail", "title"], "thumbnail", &["title"]);
    assert_eq!(
        view::validate(&raw, &["title".to_string()]),
        ViewSpec {
            fields: vec!["title".into()],
            primary: "title".into(),
            sort: vec!["title".into()],
        }
    );
}

#[test]
fn compiled_views_only_name_existing_fields() {
    let registry = BuiltinRegistry::new();
    let compiler = Compiler::new(&registry, CompileOptions::default());
    for input in matrix() {
        let doc = compiler.document(&input);
        for entry in doc.content.iter().filter(|e| !e.fields.is_empty()) {
            let Some(view) = &entry.view else { continue };
            let names = field_names(&entry.fields);
            assert!(!view.fields.is_empty());
            assert!(!view.sort.is_empty());
            for column in view.fields.iter().chain(&view.sort) {
                assert!(names.contains(column), "{}: {column}", entry.name);
            }
            assert!(names.contains(&view.primary), "{}", entry.name);
        }
    }
}

#[test]
fn shared_block_field_keeps_first_definition() {
    let blocks = compile_blocks(&sample_layouts()[0]);
    let headings: Vec<_> = blocks.fields.iter().filter(|f| f.name == "heading").collect();
    assert_eq!(headings.len(), 1);
    assert_eq!(headings[0].label, "Hero heading");
    assert_eq!(field_names(&blocks.fields), vec!["type", "heading", "image", "link"]);
}

#[test]
fn snippets_get_only_base_fields() {
    let registry = BuiltinRegistry::new();
    let compiler = Compiler::new(&registry, CompileOptions::default());
    let input = CompileInput {
        flags: FeatureFlags::all_enabled(),
        collections: EnabledCollections::new(COLLECTION_UNIVERSE),
        layouts: vec![],
    };
    let doc = compiler.document(&input);
    let snippets = doc.entry("snippets").unwrap();
    assert_eq!(field_names(&snippets.fields), vec!["name", "body"]);
}

#[test]
fn dedup_expands_back_to_the_document() {
    let registry = BuiltinRegistry::new();
    for options in option_sets() {
        let compiler = Compiler::new(&registry, options);
        for input in matrix() {
            let doc = compiler.document(&input);
            let plain = serde_yaml_ng::to_value(&doc).unwrap();
            let shared = dedupe(&doc).unwrap();
            assert_eq!(shared.resolve().unwrap(), plain);
        }
    }
}

#[test]
fn dedup_output_parses_back_through_yaml() {
    let registry = BuiltinRegistry::new();
    let options = CompileOptions {
        dedupe: true,
        ..Default::default()
    };
    let compiler = Compiler::new(&registry, options);
    for input in matrix() {
        let doc = compiler.document(&input);
        let text = compiler.render(&input).unwrap();
        let mut parsed: Value = serde_yaml_ng::from_str(&text).unwrap();
        if let Value::Mapping(map) = &mut parsed {
            map.remove("fieldDefinitions");
        }
        assert_eq!(parsed, serde_yaml_ng::to_value(&doc).unwrap());
    }
}

#[test]
fn dedup_shrinks_a_full_site() {
    let registry = BuiltinRegistry::new();
    let input = CompileInput {
        flags: FeatureFlags::all_enabled(),
        collections: EnabledCollections::new(COLLECTION_UNIVERSE),
        layouts: sample_layouts(),
    };
    let doc = Compiler::new(&registry, CompileOptions::default()).document(&input);
    let shared = dedupe(&doc).unwrap();
    assert!(shared.definition_count() > 0);
    assert!(shared.to_yaml().len() < render_document(&doc).unwrap().len());
}

#[test]
fn plain_render_deserializes_to_the_document() {
    let registry = BuiltinRegistry::new();
    let compiler = Compiler::new(&registry, CompileOptions::default());
    for input in matrix() {
        let text = compiler.render(&input).unwrap();
        let parsed: Document = serde_yaml_ng::from_str(&text).unwrap();
        assert_eq!(parsed, compiler.document(&input));
    }
}
