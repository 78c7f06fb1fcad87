//! Block-style YAML writer for [`Node`] trees.
//!
//! `serde_yaml_ng` cannot write anchors or aliases, so both the plain and the
//! shared rendering go through this writer. Scalars are still formatted by
//! `serde_yaml_ng` so quoting matches what the library would produce.

use serde_yaml_ng::Value;

use crate::node::Node;

const INDENT: usize = 2;

/// Render a tree as a YAML document ending in a newline.
pub fn to_yaml(node: &Node) -> String {
    let mut emitter = Emitter::default();
    emitter.root(node);
    emitter.out
}

#[derive(Default)]
struct Emitter {
    out: String,
}

impl Emitter {
    fn root(&mut self, node: &Node) {
        match node {
            Node::Mapping(entries) if !entries.is_empty() => self.entries(entries, 0, false),
            Node::Sequence(items) if !items.is_empty() => self.items(items, 0),
            Node::Anchor { name, node } => {
                self.out.push('&');
                self.out.push_str(name);
                self.out.push('\n');
                self.root(node);
            }
            other => {
                self.inline(other);
                self.out.push('\n');
            }
        }
    }

    fn entries(&mut self, entries: &[(Value, Node)], indent: usize, first_on_line: bool) {
        for (i, (key, node)) in entries.iter().enumerate() {
            if !(first_on_line && i == 0) {
                self.pad(indent);
            }
            self.out.push_str(&scalar(key));
            self.out.push(':');
            self.value(node, indent, false);
        }
    }

    fn items(&mut self, items: &[Node], indent: usize) {
        for item in items {
            self.pad(indent);
            self.out.push('-');
            self.value(item, indent, true);
        }
    }

    /// Write `node` after a `key:` or `-` already on the line at `indent`.
    fn value(&mut self, node: &Node, indent: usize, after_dash: bool) {
        match node {
            Node::Mapping(entries) if !entries.is_empty() => {
                if after_dash {
                    self.out.push(' ');
                    self.entries(entries, indent + INDENT, true);
                } else {
                    self.out.push('\n');
                    self.entries(entries, indent + INDENT, false);
                }
            }
            Node::Sequence(items) if !items.is_empty() => {
                self.out.push('\n');
                self.items(items, indent + INDENT);
            }
            Node::Anchor { name, node } => {
                self.out.push_str(" &");
                self.out.push_str(name);
                match node.as_ref() {
                    Node::Mapping(entries) if !entries.is_empty() => {
                        self.out.push('\n');
                        self.entries(entries, indent + INDENT, false);
                    }
                    Node::Sequence(items) if !items.is_empty() => {
                        self.out.push('\n');
                        self.items(items, indent + INDENT);
                    }
                    other => {
                        self.out.push(' ');
                        self.inline(other);
                        self.out.push('\n');
                    }
                }
            }
            other => {
                self.out.push(' ');
                self.inline(other);
                self.out.push('\n');
            }
        }
    }

    /// Scalars, aliases and empty collections.
    fn inline(&mut self, node: &Node) {
        match node {
            Node::Scalar(value) => self.out.push_str(&scalar(value)),
            Node::Alias(name) => {
                self.out.push('*');
                self.out.push_str(name);
            }
            Node::Mapping(_) => self.out.push_str("{}"),
            Node::Sequence(_) => self.out.push_str("[]"),
            Node::Anchor { name, node } => {
                self.out.push('&');
                self.out.push_str(name);
                self.out.push(' ');
                self.inline(node);
            }
        }
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat_n(' ', indent));
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string(s),
        other => match serde_yaml_ng::to_string(other) {
            Ok(text) if is_single_line(&text) => text.trim_end().to_string(),
            _ => "null".to_string(),
        },
    }
}

fn is_single_line(text: &str) -> bool {
    let trimmed = text.trim_end_matches('\n');
    !trimmed.contains('\n') && !trimmed.starts_with('|') && !trimmed.starts_with('>')
}

/// Plain or quoted as the library would write it, unless that needs a block
/// scalar, in which case double-quoted.
fn string(s: &str) -> String {
    match serde_yaml_ng::to_string(s) {
        Ok(text) if is_single_line(&text) => text.trim_end_matches('\n').to_string(),
        _ => double_quoted(s),
    }
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
