//! Field composition per collection.
//!
//! Every collection has a fixed [`Shape`]: a top segment (title, subtitle,
//! thumbnail, order), a middle segment of collection-specific attributes and
//! cross-references, a bottom segment (body, header, meta) and the optional
//! tail. Each segment is a list of [`Item`]s, and every item pairs a [`Gate`]
//! with a builder. Gates are evaluated first; an item whose gate is closed
//! is never built.

use cmsgen_fields::{
    catalog, dedupe_by_name, drop_dangling_references, CollectionInfo, CollectionRegistry,
    EnabledCollections, Feature, FeatureFlags, Field, FieldType,
};
use tracing::{debug, trace, warn};

/// A registry-level capability of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Gallery,
    Specs,
    AddOns,
    Tabs,
}

impl Capability {
    fn of(self, info: &CollectionInfo) -> bool {
        match self {
            Capability::Gallery => info.supports_gallery,
            Capability::Specs => info.supports_specs,
            Capability::AddOns => info.supports_add_ons,
            Capability::Tabs => info.supports_tabs,
        }
    }
}

/// The condition under which an item is part of a field list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// A feature switch is on.
    Feature(Feature),
    /// Another collection is enabled.
    Collection(&'static str),
    /// The registry grants the capability to the collection being composed.
    Capability(Capability),
    /// Every inner gate is open.
    All(&'static [Gate]),
}

impl Gate {
    pub fn allows(&self, cx: &ComposeContext<'_>) -> bool {
        match self {
            Gate::Always => true,
            Gate::Feature(feature) => cx.flags.is_enabled(*feature),
            Gate::Collection(name) => cx.enabled.contains(name),
            Gate::Capability(capability) => cx.info.is_some_and(|info| capability.of(info)),
            Gate::All(gates) => gates.iter().all(|g| g.allows(cx)),
        }
    }
}

/// What gates and builders can see.
#[derive(Debug, Clone, Copy)]
pub struct ComposeContext<'a> {
    pub collection: &'a str,
    pub flags: &'a FeatureFlags,
    pub enabled: &'a EnabledCollections,
    pub info: Option<&'a CollectionInfo>,
}

pub type Build = fn(&ComposeContext<'_>) -> Field;

/// One gated entry of a segment.
#[derive(Clone, Copy)]
pub struct Item {
    pub name: &'static str,
    pub gate: Gate,
    pub build: Build,
}

impl std::fmt::Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("gate", &self.gate)
            .finish()
    }
}

impl Item {
    pub fn always(name: &'static str, build: Build) -> Self {
        Self::gated(name, Gate::Always, build)
    }

    pub fn when(name: &'static str, feature: Feature, build: Build) -> Self {
        Self::gated(name, Gate::Feature(feature), build)
    }

    /// A cross-reference, present only while its target collection is enabled.
    pub fn linking(name: &'static str, collection: &'static str, build: Build) -> Self {
        Self::gated(name, Gate::Collection(collection), build)
    }

    pub fn gated(name: &'static str, gate: Gate, build: Build) -> Self {
        Self { name, gate, build }
    }
}

/// The ordered segments of one collection's field list.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    pub top: Vec<Item>,
    pub middle: Vec<Item>,
    pub bottom: Vec<Item>,
    pub tail: Vec<Item>,
}

impl Shape {
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.top
            .iter()
            .chain(&self.middle)
            .chain(&self.bottom)
            .chain(&self.tail)
    }
}

fn title() -> Item {
    Item::always("title", |_| catalog::title())
}

fn subtitle() -> Item {
    Item::always("subtitle", |_| catalog::subtitle())
}

fn thumbnail() -> Item {
    Item::always("thumbnail", |_| catalog::thumbnail())
}

fn order() -> Item {
    Item::always("order", |_| catalog::order())
}

fn body() -> Item {
    Item::always("body", |cx| {
        catalog::body(cx.flags.is_enabled(Feature::UseVisualEditor))
    })
}

fn bottom() -> Vec<Item> {
    vec![
        body(),
        Item::when("header_image", Feature::HeaderImages, |_| {
            catalog::header_image()
        }),
        Item::when("header_text", Feature::HeaderImages, |_| catalog::header_text()),
        Item::always("meta_title", |_| catalog::meta_title()),
        Item::always("meta_description", |_| catalog::meta_description()),
        Item::when("no_index", Feature::NoIndex, |_| catalog::no_index()),
    ]
}

fn tail() -> Vec<Item> {
    vec![
        Item::when("permalink", Feature::Permalinks, |_| catalog::permalink()),
        Item::when("redirect_from", Feature::Redirects, |_| {
            catalog::redirect_from()
        }),
        Item::when("faqs", Feature::Faqs, |_| catalog::faqs()),
        Item::gated(
            "gallery",
            Gate::All(&[
                Gate::Feature(Feature::Galleries),
                Gate::Capability(Capability::Gallery),
            ]),
            |_| catalog::gallery(),
        ),
        Item::gated(
            "specs",
            Gate::All(&[
                Gate::Feature(Feature::Specs),
                Gate::Capability(Capability::Specs),
            ]),
            |_| catalog::specs(),
        ),
        Item::gated(
            "add_ons",
            Gate::All(&[
                Gate::Feature(Feature::AddOns),
                Gate::Capability(Capability::AddOns),
            ]),
            |_| catalog::add_ons(),
        ),
        Item::gated("tabs", Gate::Capability(Capability::Tabs), |_| {
            catalog::tabs()
        }),
    ]
}

fn middle(collection: &str) -> Option<Vec<Item>> {
    let items = match collection {
        "pages" => vec![
            Item::always("eleventyNavigation", |cx| {
                catalog::navigation(cx.flags.is_enabled(Feature::ExternalNavigationUrls))
            }),
            Item::always("layout", |_| {
                Field::new("layout", "Layout", FieldType::String)
                    .with_default("page.html")
            }),
        ],
        "categories" => vec![
            Item::gated(
                "parent",
                Gate::All(&[
                    Gate::Feature(Feature::ParentCategories),
                    Gate::Collection("categories"),
                ]),
                |_| catalog::reference("parent", "Parent category", "categories", false),
            ),
            Item::always("featured", |_| boolean("featured", "Featured")),
        ],
        "team" => vec![
            Item::always("role", |_| string("role", "Role")),
            Item::always("email", |_| string("email", "Email")),
        ],
        "news" => vec![
            Item::always("date", |_| date("date", "Date").required()),
            Item::linking("author", "team", |_| {
                catalog::reference("author", "Author", "team", false)
            }),
        ],
        "products" => vec![
            Item::always("price", |_| string("price", "Price")),
            Item::linking("categories", "categories", |_| {
                catalog::reference("categories", "Categories", "categories", true)
            }),
            Item::linking("events", "events", |_| {
                catalog::reference("events", "Events", "events", true)
            }),
            Item::when("keywords", Feature::Keywords, |_| catalog::keywords()),
            Item::when("features", Feature::Features, |_| catalog::features()),
            Item::when("purchase_url", Feature::ExternalPurchases, |_| {
                string("purchase_url", "External purchase URL")
            }),
            Item::when("videos", Feature::Videos, |_| catalog::videos()),
        ],
        "reviews" => vec![
            Item::always("rating", |_| {
                number("rating", "Rating").with_option("min", 1).with_option("max", 5)
            }),
            Item::always("date", |_| date("date", "Date")),
            Item::linking("products", "products", |_| {
                catalog::reference("products", "Products", "products", true)
            }),
            Item::linking("properties", "properties", |_| {
                catalog::reference("properties", "Properties", "properties", true)
            }),
        ],
        "events" => vec![
            Item::when("event_date", Feature::EventLocationsAndDates, |_| {
                date("event_date", "Event date")
            }),
            Item::when("event_location", Feature::EventLocationsAndDates, |_| {
                string("event_location", "Event location")
            }),
            Item::always("recurring_date", |_| {
                string("recurring_date", "Recurring date")
                    .described("e.g. Every Tuesday, 7pm")
            }),
            Item::linking("locations", "locations", |_| {
                catalog::reference("locations", "Locations", "locations", true)
            }),
        ],
        "locations" => vec![
            Item::always("address", |_| {
                Field::new("address", "Address", FieldType::Text)
            }),
            Item::always("phone", |_| string("phone", "Phone")),
            Item::always("map_url", |_| string("map_url", "Map URL")),
            Item::linking("categories", "categories", |_| {
                catalog::reference("categories", "Categories", "categories", true)
            }),
        ],
        "properties" => vec![
            Item::always("bedrooms", |_| number("bedrooms", "Bedrooms")),
            Item::always("bathrooms", |_| number("bathrooms", "Bathrooms")),
            Item::always("sleeps", |_| number("sleeps", "Sleeps")),
            Item::always("price_per_night", |_| {
                string("price_per_night", "Price per night")
            }),
            Item::linking("locations", "locations", |_| {
                catalog::reference("locations", "Locations", "locations", false)
            }),
            Item::when("features", Feature::Features, |_| catalog::features()),
        ],
        "menus" | "guide-categories" => Vec::new(),
        "menu-categories" => vec![Item::linking("menus", "menus", |_| {
            catalog::reference("menus", "Menus", "menus", true)
        })],
        "menu-items" => vec![
            Item::always("price", |_| string("price", "Price")),
            Item::linking("menu_categories", "menu-categories", |_| {
                catalog::reference("menu_categories", "Menu categories", "menu-categories", true)
            }),
            Item::always("is_vegan", |_| boolean("is_vegan", "Vegan")),
            Item::always("is_gluten_free", |_| boolean("is_gluten_free", "Gluten free")),
        ],
        "guide-pages" => vec![Item::linking("guide_category", "guide-categories", |_| {
            catalog::reference("guide_category", "Guide category", "guide-categories", false)
        })],
        _ => return None,
    };
    Some(items)
}

fn top(collection: &str) -> Vec<Item> {
    match collection {
        "pages" | "guide-pages" => vec![title(), subtitle(), order()],
        "menu-categories" => vec![title(), order()],
        "menu-items" => vec![title(), thumbnail(), order()],
        "news" | "events" => vec![title(), subtitle(), thumbnail()],
        "reviews" => vec![Item::always("title", |_| {
            catalog::title().described("Reviewer name")
        })],
        _ => vec![title(), subtitle(), thumbnail(), order()],
    }
}

/// The shape of a known collection; `None` for names outside the universe.
pub fn shape_for(collection: &str) -> Option<Shape> {
    if collection == "snippets" {
        return Some(Shape {
            top: vec![Item::always("name", |_| {
                Field::new("name", "Name", FieldType::String).required()
            })],
            middle: Vec::new(),
            bottom: vec![body()],
            tail: Vec::new(),
        });
    }
    let middle = middle(collection)?;
    Some(Shape {
        top: top(collection),
        middle,
        bottom: bottom(),
        tail: tail(),
    })
}

fn string(name: &str, label: &str) -> Field {
    Field::new(name, label, FieldType::String)
}

fn number(name: &str, label: &str) -> Field {
    Field::new(name, label, FieldType::Number)
}

fn boolean(name: &str, label: &str) -> Field {
    Field::new(name, label, FieldType::Boolean).with_default(false)
}

fn date(name: &str, label: &str) -> Field {
    Field::new(name, label, FieldType::Date)
}

/// Builds a collection's field list from its shape.
pub struct FieldComposer<'r, R: CollectionRegistry + ?Sized> {
    registry: &'r R,
}

impl<'r, R: CollectionRegistry + ?Sized> FieldComposer<'r, R> {
    pub fn new(registry: &'r R) -> Self {
        Self { registry }
    }

    /// Compose the ordered field list of `collection`.
    ///
    /// Names outside the collection universe compose to an empty list.
    pub fn compose(
        &self,
        collection: &str,
        flags: &FeatureFlags,
        enabled: &EnabledCollections,
    ) -> Vec<Field> {
        let Some(shape) = shape_for(collection) else {
            debug!(collection, "no field shape for collection");
            return Vec::new();
        };
        let cx = ComposeContext {
            collection,
            flags,
            enabled,
            info: self.registry.lookup(collection),
        };

        let fields: Vec<Field> = shape
            .items()
            .filter(|item| {
                let open = item.gate.allows(&cx);
                if !open {
                    trace!(collection, item = item.name, gate = ?item.gate, "gated off");
                }
                open
            })
            .map(|item| (item.build)(&cx))
            .collect();

        let fields = drop_dangling_references(collection, fields, enabled);
        let (fields, dropped) = dedupe_by_name(fields);
        for name in dropped {
            warn!(collection, field = %name, "dropped duplicate field");
        }
        fields
    }
}
