//! Structural sharing of repeated field definitions.
//!
//! A field-definition node is a mapping with string `name` and `type`
//! entries. Every definition that occurs more than once, structurally
//! identical, is hoisted into a `fieldDefinitions` table under an anchor and
//! each occurrence becomes an alias. Identical nodes are counted once per
//! occurrence that survives rewriting: the walk does not descend into a
//! repeat, since a repeat becomes a single alias.
//!
//! Definitions sharing a name but differing in content are separate
//! variants; each repeated variant gets its own anchor (`title`, `title-2`).

use std::collections::{HashMap, HashSet};

use serde_yaml_ng::Value;
use tracing::debug;

use crate::emit;
use crate::error::Result;
use crate::node::Node;
use crate::schema::Document;

/// Top-level key of the shared definitions table.
pub const DEFINITIONS_KEY: &str = "fieldDefinitions";

/// A document with repeated field definitions shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedDocument {
    pub root: Node,
}

impl SharedDocument {
    /// Number of hoisted definitions.
    pub fn definition_count(&self) -> usize {
        match self.root.get(DEFINITIONS_KEY) {
            Some(Node::Mapping(entries)) => entries.len(),
            _ => 0,
        }
    }

    pub fn to_yaml(&self) -> String {
        emit::to_yaml(&self.root)
    }

    /// The alias-resolved document without the definitions table.
    pub fn resolve(&self) -> Result<Value> {
        let mut value = self.root.expand()?;
        if let Value::Mapping(map) = &mut value {
            map.remove(DEFINITIONS_KEY);
        }
        Ok(value)
    }
}

/// Run the pass over an assembled document.
pub fn dedupe(document: &Document) -> Result<SharedDocument> {
    let value = serde_yaml_ng::to_value(document)?;
    Ok(SharedDocument {
        root: dedupe_value(&value),
    })
}

fn field_name(value: &Value) -> Option<&str> {
    let Value::Mapping(map) = value else {
        return None;
    };
    map.get("type").and_then(Value::as_str)?;
    map.get("name").and_then(Value::as_str)
}

struct Variant<'a> {
    value: &'a Value,
    count: usize,
    anchor: Option<String>,
}

#[derive(Default)]
struct Census<'a> {
    /// name → indices into `variants`
    by_name: HashMap<&'a str, Vec<usize>>,
    variants: Vec<Variant<'a>>,
    /// Variant indices, children before parents.
    post_order: Vec<usize>,
}

impl<'a> Census<'a> {
    fn count(&mut self, value: &'a Value) {
        if let Some(name) = field_name(value) {
            let seen = self.by_name.entry(name).or_default();
            if let Some(&idx) = seen.iter().find(|&&i| self.variants[i].value == value) {
                self.variants[idx].count += 1;
                return;
            }
            let idx = self.variants.len();
            seen.push(idx);
            self.variants.push(Variant {
                value,
                count: 1,
                anchor: None,
            });
            self.count_children(value);
            self.post_order.push(idx);
            return;
        }
        self.count_children(value);
    }

    fn count_children(&mut self, value: &'a Value) {
        match value {
            Value::Sequence(items) => items.iter().for_each(|item| self.count(item)),
            Value::Mapping(map) => map.values().for_each(|v| self.count(v)),
            _ => {}
        }
    }

    fn assign_anchors(&mut self) {
        let mut taken = HashSet::new();
        let mut per_name: HashMap<String, usize> = HashMap::new();
        for &idx in &self.post_order {
            if self.variants[idx].count < 2 {
                continue;
            }
            let Some(name) = field_name(self.variants[idx].value) else {
                continue;
            };
            let base = anchor_base(name);
            let nth = per_name.entry(base.clone()).or_insert(0);
            let mut anchor = base.clone();
            loop {
                *nth += 1;
                if *nth > 1 {
                    anchor = format!("{base}-{nth}");
                }
                if taken.insert(anchor.clone()) {
                    break;
                }
            }
            self.variants[idx].anchor = Some(anchor);
        }
    }

    fn anchor_of(&self, value: &Value) -> Option<&str> {
        let name = field_name(value)?;
        self.by_name
            .get(name)?
            .iter()
            .map(|&i| &self.variants[i])
            .find(|v| v.value == value)
            .and_then(|v| v.anchor.as_deref())
    }

    fn rewrite(&self, value: &Value) -> Node {
        match self.anchor_of(value) {
            Some(anchor) => Node::Alias(anchor.to_string()),
            None => self.rewrite_children(value),
        }
    }

    fn rewrite_children(&self, value: &Value) -> Node {
        match value {
            Value::Sequence(items) => Node::Sequence(items.iter().map(|i| self.rewrite(i)).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.rewrite(v)))
                    .collect(),
            ),
            other => Node::Scalar(other.clone()),
        }
    }

    fn table(&self) -> Vec<(Value, Node)> {
        self.post_order
            .iter()
            .map(|&idx| &self.variants[idx])
            .filter_map(|variant| {
                let anchor = variant.anchor.as_ref()?;
                let node = Node::Anchor {
                    name: anchor.clone(),
                    node: Box::new(self.rewrite_children(variant.value)),
                };
                Some((Value::String(anchor.clone()), node))
            })
            .collect()
    }
}

/// Anchors allow any non-space, non-flow character; stay conservative.
fn anchor_base(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "field".to_string()
    } else {
        cleaned
    }
}

/// Hoist repeated field definitions of an arbitrary YAML tree.
///
/// A root that is not a mapping, or that has nothing repeated, comes back
/// unchanged apart from representation.
pub fn dedupe_value(value: &Value) -> Node {
    let mut census = Census::default();
    census.count(value);
    census.assign_anchors();

    let table = census.table();
    let rewritten = census.rewrite(value);
    debug!(definitions = table.len(), "hoisted shared field definitions");

    match rewritten {
        Node::Mapping(entries) if !table.is_empty() => {
            let mut root = Vec::with_capacity(entries.len() + 1);
            root.push((Value::String(DEFINITIONS_KEY.to_string()), Node::Mapping(table)));
            root.extend(entries);
            Node::Mapping(root)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml_ng::from_str(text).unwrap()
    }

    fn resolve(node: &Node) -> Value {
        SharedDocument { root: node.clone() }.resolve().unwrap()
    }

    #[test]
    fn repeated_definition_is_hoisted() {
        let value = yaml(
            "content:\n\
             - fields:\n  - {name: title, type: string}\n  - {name: body, type: code}\n\
             - fields:\n  - {name: title, type: string}\n",
        );
        let node = dedupe_value(&value);
        let doc = SharedDocument { root: node.clone() };
        assert_eq!(doc.definition_count(), 1);
        assert_eq!(node.alias_count(), 2);
        assert_eq!(resolve(&node), value);
    }

    #[test]
    fn single_occurrences_stay_inline() {
        let value = yaml("content:\n- {name: title, type: string}\n- {name: body, type: code}\n");
        let node = dedupe_value(&value);
        assert!(node.get(DEFINITIONS_KEY).is_none());
        assert_eq!(node, Node::from_value(&value));
    }

    #[test]
    fn differing_variants_get_separate_anchors() {
        let value = yaml(
            "a:\n- {name: title, type: string}\n- {name: title, type: string}\n\
             b:\n- {name: title, type: text}\n- {name: title, type: text}\n\
             c:\n- {name: title, type: number}\n",
        );
        let node = dedupe_value(&value);
        let Some(Node::Mapping(table)) = node.get(DEFINITIONS_KEY) else {
            panic!("expected a definitions table");
        };
        let keys: Vec<_> = table.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "title-2"]);
        assert_eq!(resolve(&node), value);
    }

    #[test]
    fn nested_shares_are_counted_once_per_surviving_occurrence() {
        // `question` only ever appears inside the shared `faqs`, so after
        // hoisting `faqs` it occurs once and stays inline.
        let faqs = "{name: faqs, type: object, fields: [{name: question, type: string}]}";
        let value = yaml(&format!("a:\n- {faqs}\nb:\n- {faqs}\n"));
        let node = dedupe_value(&value);
        let doc = SharedDocument { root: node.clone() };
        assert_eq!(doc.definition_count(), 1);
        assert_eq!(resolve(&node), value);
    }

    #[test]
    fn inner_definitions_precede_outer_in_table() {
        let faqs = "{name: faqs, type: object, fields: [{name: title, type: string}]}";
        let value = yaml(&format!(
            "a:\n- {faqs}\n- {{name: title, type: string}}\nb:\n- {faqs}\n"
        ));
        let node = dedupe_value(&value);
        let Some(Node::Mapping(table)) = node.get(DEFINITIONS_KEY) else {
            panic!("expected a definitions table");
        };
        let keys: Vec<_> = table.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "faqs"]);
        assert_eq!(resolve(&node), value);
    }

    #[test]
    fn mappings_without_type_are_not_definitions() {
        let value = yaml("a:\n- {name: x}\n- {name: x}\n");
        let node = dedupe_value(&value);
        assert!(node.get(DEFINITIONS_KEY).is_none());
    }

    #[test]
    fn anchor_names_are_sanitized() {
        assert_eq!(anchor_base("seo.title"), "seo_title");
        assert_eq!(anchor_base("hero-image"), "hero-image");
        assert_eq!(anchor_base(""), "field");
    }

    #[test]
    fn sanitized_collisions_stay_unique() {
        let value = yaml(
            "a:\n- {name: a.b, type: string}\n- {name: a.b, type: string}\n\
             - {name: a_b, type: string}\n- {name: a_b, type: string}\n",
        );
        let node = dedupe_value(&value);
        let Some(Node::Mapping(table)) = node.get(DEFINITIONS_KEY) else {
            panic!("expected a definitions table");
        };
        let keys: Vec<_> = table.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a_b", "a_b-2"]);
        assert_eq!(resolve(&node), value);
    }
}
