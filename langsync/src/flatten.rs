//! Conversion between nested [`Tree`]s and flat, delimiter-joined key maps.
//!
//! `flatten` walks a tree depth-first, parent before children, and records one
//! entry per string leaf under its key path (`menu.file.open`). `unflatten`
//! reverses the walk. The round trip is the identity as long as no key in the
//! original tree contains the delimiter and no nested object is empty; neither
//! condition is checked.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::tree::{Node, Tree};

/// Delimiter used to join nested keys unless configured otherwise.
pub const DEFAULT_DELIMITER: char = '.';

/// An ordered mapping from key path to leaf string.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FlatKeyMap {
    entries: IndexMap<String, String>,
}

impl FlatKeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a value; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys present in `self` but absent from `other`, sorted lexicographically.
    pub fn missing_from(&self, other: &FlatKeyMap) -> Vec<String> {
        self.keys()
            .filter(|key| !other.contains_key(key))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

impl PartialEq for FlatKeyMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for FlatKeyMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatKeyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FlatKeyMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Flattens `tree` into a key-path map, one entry per reachable leaf.
pub fn flatten(tree: &Tree, delimiter: char) -> FlatKeyMap {
    let mut flat = FlatKeyMap::new();
    flatten_into(tree, None, delimiter, &mut flat);
    flat
}

fn flatten_into(tree: &Tree, parent: Option<&str>, delimiter: char, out: &mut FlatKeyMap) {
    for (key, node) in tree.iter() {
        let path = match parent {
            Some(parent) => format!("{}{}{}", parent, delimiter, key),
            None => key.clone(),
        };
        match node {
            Node::Leaf(value) => {
                out.insert(path, value.clone());
            }
            Node::Branch(child) => flatten_into(child, Some(&path), delimiter, out),
        }
    }
}

/// Rebuilds a nested tree from a key-path map.
///
/// Entries are applied in map order. When one key path is both a leaf and a
/// prefix of another (`a` and `a.b`), the entry applied last wins; see
/// [`Tree`] insertion rules.
pub fn unflatten(flat: &FlatKeyMap, delimiter: char) -> Tree {
    let mut tree = Tree::new();
    for (path, value) in flat.iter() {
        let segments: Vec<&str> = path.split(delimiter).collect();
        tree.insert_path(&segments, value.to_string());
    }
    tree
}
