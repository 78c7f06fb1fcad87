//! List-view configuration and its validation against real field lists.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Primary and column fallback when nothing else survives.
pub const FALLBACK_FIELD: &str = "title";

/// A view as authored, before optional fields are pruned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawView {
    pub fields: Vec<String>,
    pub primary: String,
    pub sort: Vec<String>,
}

impl RawView {
    pub fn new(fields: &[&str], primary: &str, sort: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            primary: primary.to_string(),
            sort: sort.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A view whose columns, primary and sort keys are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub fields: Vec<String>,
    pub primary: String,
    pub sort: Vec<String>,
}

/// Filter `raw` against the fields a collection actually has.
///
/// Order is preserved. The primary resolves to, in turn: the raw primary,
/// the first surviving column, the first available field, `"title"`.
/// Empty columns become `["title"]`; an empty sort becomes `[primary]`.
pub fn validate(raw: &RawView, available: &[String]) -> ViewSpec {
    let has = |name: &String| available.contains(name);

    let mut fields: Vec<String> = raw.fields.iter().filter(|f| has(*f)).cloned().collect();
    let sort: Vec<String> = raw.sort.iter().filter(|f| has(*f)).cloned().collect();

    let primary = if has(&raw.primary) {
        raw.primary.clone()
    } else if let Some(first) = fields.first() {
        first.clone()
    } else if let Some(first) = available.first() {
        first.clone()
    } else {
        warn!(primary = %raw.primary, "no fields available; view primary does not resolve");
        FALLBACK_FIELD.to_string()
    };

    if fields.is_empty() {
        fields.push(FALLBACK_FIELD.to_string());
    }
    let sort = if sort.is_empty() {
        vec![primary.clone()]
    } else {
        sort
    };

    ViewSpec {
        fields,
        primary,
        sort,
    }
}

/// The authored view of a collection. `snippets` has none.
pub fn raw_view(collection: &str) -> Option<RawView> {
    let view = match collection {
        "pages" => RawView::new(&["title", "permalink"], "title", &["title"]),
        "categories" => RawView::new(&["thumbnail", "title", "order"], "title", &["order", "title"]),
        "team" => RawView::new(&["thumbnail", "title", "role"], "title", &["order", "title"]),
        "news" => RawView::new(&["thumbnail", "title", "date"], "title", &["date"]),
        "products" => RawView::new(&["thumbnail", "title", "price"], "title", &["order", "title"]),
        "reviews" => RawView::new(&["title", "rating", "date"], "title", &["date"]),
        "events" => RawView::new(
            &["thumbnail", "title", "event_date"],
            "title",
            &["event_date", "title"],
        ),
        "locations" => RawView::new(&["thumbnail", "title", "address"], "title", &["order", "title"]),
        "properties" => RawView::new(
            &["thumbnail", "title", "price_per_night"],
            "title",
            &["order", "title"],
        ),
        "menus" | "guide-categories" => {
            RawView::new(&["thumbnail", "title"], "title", &["order", "title"])
        }
        "menu-categories" => RawView::new(&["title"], "title", &["order", "title"]),
        "menu-items" => RawView::new(&["thumbnail", "title", "price"], "title", &["order", "title"]),
        "guide-pages" => RawView::new(&["title", "guide_category"], "title", &["order", "title"]),
        _ => return None,
    };
    Some(view)
}
