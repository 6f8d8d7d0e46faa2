//! The Translation Tree: the nested key/value content of one locale file.
//!
//! A tree is an ordered mapping whose values are either strings (leaves) or
//! nested trees. Key order is preserved exactly as read from disk and is part
//! of a tree's identity: two trees with the same entries in a different order
//! are not equal.

use std::io::{BufRead, Write};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{error::Error, traits::Parser};

/// A single value in a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// A translated string.
    Leaf(String),
    /// A nested mapping of keys.
    Branch(Tree),
}

impl Node {
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Tree> {
        match self {
            Node::Branch(tree) => Some(tree),
            Node::Leaf(_) => None,
        }
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Leaf(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Leaf(value)
    }
}

impl From<Tree> for Node {
    fn from(value: Tree) -> Self {
        Node::Branch(value)
    }
}

/// An ordered, nested mapping of translation keys.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Tree {
    entries: IndexMap<String, Node>,
}

impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Inserts `node` under `key`.
    ///
    /// An existing key keeps its position and has its value replaced; a new key
    /// is appended at the end.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), node.into())
    }

    /// Builder-style [`Tree::insert`].
    pub fn with(mut self, key: impl Into<String>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }

    /// Iterates the top-level entries in order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.entries.iter()
    }

    /// Counts the string leaves reachable from this tree.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Leaf(_) => 1,
                Node::Branch(child) => child.leaf_count(),
            })
            .sum()
    }

    /// Dot-joined locations of nested objects that hold no keys at all.
    ///
    /// These carry no flat key path, so they do not survive a flatten/unflatten
    /// cycle.
    pub fn empty_branches(&self) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_empty_branches(None, &mut found);
        found
    }

    fn collect_empty_branches(&self, parent: Option<&str>, found: &mut Vec<String>) {
        for (key, node) in &self.entries {
            if let Node::Branch(child) = node {
                let path = match parent {
                    Some(parent) => format!("{}.{}", parent, key),
                    None => key.clone(),
                };
                if child.is_empty() {
                    found.push(path);
                } else {
                    child.collect_empty_branches(Some(&path), found);
                }
            }
        }
    }

    /// Sets the leaf addressed by `segments`, creating intermediate levels as needed.
    ///
    /// Conflicts resolve last-write-wins: an intermediate segment that currently
    /// holds a leaf is replaced by a new empty branch, and a final segment that
    /// currently holds a branch is replaced by the leaf. A replaced key keeps its
    /// original position.
    pub(crate) fn insert_path(&mut self, segments: &[&str], value: String) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };

        if rest.is_empty() {
            self.entries.insert((*first).to_string(), Node::Leaf(value));
            return;
        }

        let node = self
            .entries
            .entry((*first).to_string())
            .or_insert_with(|| Node::Branch(Tree::new()));
        if matches!(node, Node::Leaf(_)) {
            tracing::debug!(key = %first, "replacing leaf with nested keys");
            *node = Node::Branch(Tree::new());
        }
        if let Node::Branch(child) = node {
            child.insert_path(rest, value);
        }
    }

    /// Renders the tree as 2-space indented JSON with non-ASCII text kept literal.
    pub fn to_pretty_string(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        self.to_writer(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|err| Error::validation_error(format!("output is not UTF-8: {}", err)))
    }

    /// Shape errors name the offending value by its dot-joined JSON location;
    /// the sync delimiter is not known at parse time.
    fn from_object(map: Map<String, Value>, parent: Option<&str>) -> Result<Self, Error> {
        let mut tree = Tree::new();
        for (key, value) in map {
            let path = match parent {
                Some(parent) => format!("{}.{}", parent, key),
                None => key.clone(),
            };
            let node = match value {
                Value::String(text) => Node::Leaf(text),
                Value::Object(inner) => Node::Branch(Tree::from_object(inner, Some(&path))?),
                other => {
                    return Err(Error::Shape {
                        key: path,
                        found: value_kind(&other),
                    });
                }
            };
            tree.entries.insert(key, node);
        }
        Ok(tree)
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Tree {}

impl TryFrom<Value> for Tree {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Tree::from_object(map, None),
            other => Err(Error::Shape {
                key: "(root)".to_string(),
                found: value_kind(&other),
            }),
        }
    }
}

impl Parser for Tree {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader)?;
        Tree::try_from(value)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush().map_err(Error::Io)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
