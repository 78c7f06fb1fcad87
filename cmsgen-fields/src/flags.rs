//! Compilation inputs: feature switches and the enabled-collection list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A known feature switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    HeaderImages,
    Permalinks,
    Redirects,
    Faqs,
    Galleries,
    Specs,
    AddOns,
    Keywords,
    Features,
    ExternalPurchases,
    EventLocationsAndDates,
    ExternalNavigationUrls,
    UseVisualEditor,
    ParentCategories,
    NoIndex,
    Videos,
}

impl Feature {
    pub const ALL: [Feature; 16] = [
        Feature::HeaderImages,
        Feature::Permalinks,
        Feature::Redirects,
        Feature::Faqs,
        Feature::Galleries,
        Feature::Specs,
        Feature::AddOns,
        Feature::Keywords,
        Feature::Features,
        Feature::ExternalPurchases,
        Feature::EventLocationsAndDates,
        Feature::ExternalNavigationUrls,
        Feature::UseVisualEditor,
        Feature::ParentCategories,
        Feature::NoIndex,
        Feature::Videos,
    ];

    /// The flag name as written in site configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Feature::HeaderImages => "header_images",
            Feature::Permalinks => "permalinks",
            Feature::Redirects => "redirects",
            Feature::Faqs => "faqs",
            Feature::Galleries => "galleries",
            Feature::Specs => "specs",
            Feature::AddOns => "add_ons",
            Feature::Keywords => "keywords",
            Feature::Features => "features",
            Feature::ExternalPurchases => "external_purchases",
            Feature::EventLocationsAndDates => "event_locations_and_dates",
            Feature::ExternalNavigationUrls => "external_navigation_urls",
            Feature::UseVisualEditor => "use_visual_editor",
            Feature::ParentCategories => "parent_categories",
            Feature::NoIndex => "no_index",
            Feature::Videos => "videos",
        }
    }

    /// Inverse of [`Feature::as_str`]. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named boolean switches for one compilation.
///
/// Absent names read as `false`. Unknown names are carried but never
/// consulted, so a stale site configuration still compiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureFlags {
    flags: BTreeMap<String, bool>,
}

impl FeatureFlags {
    /// No flags set, so every feature reads as off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known feature switched on.
    pub fn all_enabled() -> Self {
        Feature::ALL.into_iter().map(|f| (f, true)).collect()
    }

    /// Set a feature explicitly, overriding an earlier value.
    pub fn set(mut self, feature: Feature, enabled: bool) -> Self {
        self.flags.insert(feature.as_str().to_string(), enabled);
        self
    }

    pub fn enable(self, feature: Feature) -> Self {
        self.set(feature, true)
    }

    /// `true` only when the flag is present and on.
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.flags.get(feature.as_str()).copied().unwrap_or(false)
    }

    /// Names present in the input that match no known feature.
    pub fn unknown_names(&self) -> Vec<&str> {
        self.flags
            .keys()
            .map(String::as_str)
            .filter(|name| Feature::from_name(name).is_none())
            .collect()
    }
}

impl FromIterator<(Feature, bool)> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = (Feature, bool)>>(iter: I) -> Self {
        let flags = iter
            .into_iter()
            .map(|(f, on)| (f.as_str().to_string(), on))
            .collect();
        Self { flags }
    }
}

impl From<BTreeMap<String, bool>> for FeatureFlags {
    fn from(flags: BTreeMap<String, bool>) -> Self {
        Self { flags }
    }
}

/// The collections a site turns on, in caller order.
///
/// Repeated names collapse onto their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EnabledCollections {
    names: Vec<String>,
}

impl EnabledCollections {
    /// Collect names in order, keeping the first of any repeats.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self { names: out }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names in caller order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for EnabledCollections {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<EnabledCollections> for Vec<String> {
    fn from(enabled: EnabledCollections) -> Self {
        enabled.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_flags_read_false() {
        let flags = FeatureFlags::new().enable(Feature::Faqs);
        assert!(flags.is_enabled(Feature::Faqs));
        assert!(!flags.is_enabled(Feature::Galleries));
    }

    #[test]
    fn all_enabled_covers_every_feature() {
        let flags = FeatureFlags::all_enabled();
        assert!(Feature::ALL.iter().all(|f| flags.is_enabled(*f)));
    }

    #[test]
    fn feature_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.as_str()), Some(feature));
        }
    }

    #[test]
    fn flags_deserialize_from_plain_map_and_keep_unknown_names() {
        let flags: FeatureFlags =
            serde_yaml_ng::from_str("permalinks: true\nsparkles: true\nfaqs: false\n").unwrap();
        assert!(flags.is_enabled(Feature::Permalinks));
        assert!(!flags.is_enabled(Feature::Faqs));
        assert_eq!(flags.unknown_names(), vec!["sparkles"]);
    }

    #[test]
    fn enabled_collections_dedupe_preserving_order() {
        let enabled = EnabledCollections::new(["news", "pages", "news", "team"]);
        assert_eq!(enabled.iter().collect::<Vec<_>>(), vec!["news", "pages", "team"]);
        assert!(enabled.contains("team"));
        assert!(!enabled.contains("events"));
    }

    #[test]
    fn enabled_collections_deserialize_from_list() {
        let enabled: EnabledCollections = serde_yaml_ng::from_str("- pages\n- pages\n- news\n").unwrap();
        assert_eq!(enabled.len(), 2);
    }
}
