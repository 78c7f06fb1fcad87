//! A YAML tree that can carry anchors and aliases.
//!
//! `serde_yaml_ng::Value` has no notion of node identity, so shared nodes
//! are represented here and resolved back into plain values by
//! [`Node::expand`].

use std::collections::HashMap;

use serde_yaml_ng::{Mapping, Value};

use crate::error::{CompileError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Null, boolean, number, string or tagged value.
    Scalar(Value),
    Sequence(Vec<Node>),
    /// Entries in insertion order. Keys are plain scalars.
    Mapping(Vec<(Value, Node)>),
    /// Defines `name` as the value of `node`.
    Anchor { name: String, node: Box<Node> },
    /// Refers back to an earlier anchor.
    Alias(String),
}

impl Node {
    pub fn from_value(value: &Value) -> Node {
        match value {
            Value::Sequence(items) => Node::Sequence(items.iter().map(Node::from_value).collect()),
            Value::Mapping(map) => Node::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::from_value(v)))
                    .collect(),
            ),
            other => Node::Scalar(other.clone()),
        }
    }

    /// Resolve every alias, in document order, into a plain value.
    pub fn expand(&self) -> Result<Value> {
        let mut anchors = HashMap::new();
        self.expand_with(&mut anchors)
    }

    fn expand_with(&self, anchors: &mut HashMap<String, Value>) -> Result<Value> {
        match self {
            Node::Scalar(value) => Ok(value.clone()),
            Node::Sequence(items) => items
                .iter()
                .map(|item| item.expand_with(anchors))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            Node::Mapping(entries) => {
                let mut map = Mapping::with_capacity(entries.len());
                for (key, node) in entries {
                    map.insert(key.clone(), node.expand_with(anchors)?);
                }
                Ok(Value::Mapping(map))
            }
            Node::Anchor { name, node } => {
                let value = node.expand_with(anchors)?;
                anchors.insert(name.clone(), value.clone());
                Ok(value)
            }
            Node::Alias(name) => anchors
                .get(name)
                .cloned()
                .ok_or_else(|| CompileError::UnresolvedAlias {
                    anchor: name.clone(),
                }),
        }
    }

    /// Look up a mapping entry by string key.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            Node::Anchor { node, .. } => node.get(key),
            _ => None,
        }
    }

    /// Count alias nodes anywhere in the tree.
    pub fn alias_count(&self) -> usize {
        match self {
            Node::Alias(_) => 1,
            Node::Scalar(_) => 0,
            Node::Sequence(items) => items.iter().map(Node::alias_count).sum(),
            Node::Mapping(entries) => entries.iter().map(|(_, v)| v.alias_count()).sum(),
            Node::Anchor { node, .. } => node.alias_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_round_trip() {
        let value: Value = serde_yaml_ng::from_str("a: 1\nb:\n- x\n- true\nc: {}\n").unwrap();
        assert_eq!(Node::from_value(&value).expand().unwrap(), value);
    }

    #[test]
    fn alias_expands_to_anchored_value() {
        let tree = Node::Sequence(vec![
            Node::Anchor {
                name: "a".into(),
                node: Box::new(Node::Scalar(Value::from("shared"))),
            },
            Node::Alias("a".into()),
        ]);
        let expanded = tree.expand().unwrap();
        assert_eq!(
            expanded,
            Value::Sequence(vec![Value::from("shared"), Value::from("shared")])
        );
        assert_eq!(tree.alias_count(), 1);
    }

    #[test]
    fn alias_before_anchor_is_an_error() {
        let tree = Node::Sequence(vec![
            Node::Alias("a".into()),
            Node::Anchor {
                name: "a".into(),
                node: Box::new(Node::Scalar(Value::Null)),
            },
        ]);
        assert!(matches!(
            tree.expand(),
            Err(CompileError::UnresolvedAlias { anchor }) if anchor == "a"
        ));
    }

    #[test]
    fn get_looks_through_anchors() {
        let tree = Node::Anchor {
            name: "m".into(),
            node: Box::new(Node::Mapping(vec![(
                Value::from("name"),
                Node::Scalar(Value::from("title")),
            )])),
        };
        assert_eq!(tree.get("name"), Some(&Node::Scalar(Value::from("title"))));
        assert!(tree.get("label").is_none());
    }
}
