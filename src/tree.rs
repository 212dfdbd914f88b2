//! The parsed tree: nodes, handles, and the document arena.
//!
//! This module provides [`Document`], which owns every [`Node`] of a parsed
//! tree in one arena, and [`NodeId`], the stable handle used everywhere a
//! reference-counted or borrowed node pointer would otherwise appear. A
//! node's parent link is a plain handle too, so the parent/child
//! back-references of the data model never form an ownership cycle.
//!
//! ## Why IndexMap?
//!
//! Node entries live in an [`IndexMap`] rather than a `HashMap`:
//!
//! - **Deterministic output**: serialization walks entries in insertion
//!   order, so the same parse always prints the same text
//! - **Stable iteration**: lookups stay O(1) while iteration order remains
//!   meaningful
//!
//! ## Examples
//!
//! ```rust
//! use tomlish::parse_str;
//!
//! let doc = parse_str("[server.tls]\nenabled = true\n").unwrap();
//!
//! let tls = doc.get_object("server.tls").unwrap();
//! assert_eq!(doc.full_key(tls), "server.tls");
//! assert_eq!(doc[tls].key(), "tls");
//!
//! // Lookup misses are `None`, never an error.
//! assert!(doc.get_object("server.missing").is_none());
//! ```

use std::ops::Index;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::value::{Value, ValueKind};

/// A stable handle to one node of a [`Document`].
///
/// Handles are plain indices into the document's arena: cheap to copy,
/// valid for the lifetime of the document that issued them, and never
/// invalidated by later inserts. Resolving the same dotted path twice
/// yields the same handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One table/section of a parsed document.
///
/// Holds the node's own key (the last segment of its dotted path, empty
/// for the root), a non-owning handle to its parent, and the named entries
/// in insertion order.
#[derive(Clone, Debug)]
pub struct Node {
    key: String,
    parent: Option<NodeId>,
    entries: IndexMap<String, Value>,
}

impl Node {
    fn new(key: String, parent: Option<NodeId>) -> Self {
        Node {
            key,
            parent,
            entries: IndexMap::new(),
        }
    }

    /// Returns this node's own key: the last segment of its dotted path,
    /// or the empty string for the root.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the handle of this node's parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the value bound to `name`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::{parse_str, Value};
    ///
    /// let doc = parse_str("port = 8080\n").unwrap();
    /// let root = &doc[doc.root()];
    /// assert_eq!(root.get("port"), Some(&Value::Integer(8080)));
    /// assert_eq!(root.get("missing"), None);
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Returns the number of entries in this node.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this node has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over entry names, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over entry values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Returns an iterator over `(name, value)` pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }
}

/// A parsed configuration tree.
///
/// The document owns all of its nodes; [`NodeId`] handles index into it.
/// There is exactly one root node, created with the document itself, with
/// the empty key and no parent. Every other node is created by parsing a
/// section header and stays reachable from the root through exactly one
/// chain of [`Value::Table`] entries.
///
/// A finished document is read-only: nothing in the public API mutates it,
/// so it can be shared freely across threads for lookup and serialization.
///
/// # Examples
///
/// ```rust
/// use tomlish::parse_str;
///
/// let doc = parse_str("[app]\nname = \"demo\"\n[app.limits]\nmax = 10\n").unwrap();
///
/// let limits = doc.get_object("app.limits").unwrap();
/// assert_eq!(doc[limits].get("max").unwrap().as_i64(), Some(10));
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Creates an empty document containing only the root node.
    ///
    /// Documents are normally produced by [`crate::parse_str`] or
    /// [`crate::parse_reader`]; an empty one serializes to the empty
    /// string.
    #[must_use]
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::new(String::new(), None)],
        }
    }

    /// Returns the handle of the root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the total number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the full dotted key of the node behind `id`.
    ///
    /// The root contributes nothing, so its full key is the empty string
    /// and every other node's is the `.`-joined chain of its ancestors'
    /// keys plus its own.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::parse_str;
    ///
    /// let doc = parse_str("[a.b.c]\n").unwrap();
    /// let c = doc.get_object("a.b.c").unwrap();
    /// assert_eq!(doc.full_key(c), "a.b.c");
    /// assert_eq!(doc.full_key(doc.root()), "");
    /// ```
    #[must_use]
    pub fn full_key(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            if node.parent.is_some() {
                segments.push(node.key.as_str());
            }
            cursor = node.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    /// Looks up the node named by a dotted key.
    ///
    /// Returns `None` when any segment is absent or bound to a non-table
    /// value; a miss is not an error. The empty (or all-whitespace) key
    /// names the root. Segments are trimmed, matching how section headers
    /// are read.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::parse_str;
    ///
    /// let doc = parse_str("[db]\nport = 5432\n").unwrap();
    ///
    /// assert!(doc.get_object("db").is_some());
    /// assert_eq!(doc.get_object(""), Some(doc.root()));
    /// assert!(doc.get_object("db.port").is_none()); // scalar, not a table
    /// assert!(doc.get_object("nope").is_none());
    /// ```
    #[must_use]
    pub fn get_object(&self, dotted: &str) -> Option<NodeId> {
        let path = dotted.trim();
        if path.is_empty() {
            return Some(self.root());
        }
        let mut current = self.root();
        for segment in path.split('.') {
            match self.node(current).entries.get(segment.trim()) {
                Some(Value::Table(child)) => current = *child,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Walks a dotted header path from the root, creating missing nodes.
    ///
    /// Empty segments reject the whole header; a segment bound to a
    /// scalar is a collision. Returns the terminal node's handle, the
    /// same one on every repeat resolution.
    pub(crate) fn resolve_or_create(&mut self, dotted: &str, line: usize) -> Result<NodeId> {
        let mut current = self.root();
        let mut walked = String::new();
        for segment in dotted.split('.') {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(Error::empty_section_name(line));
            }
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let existing = match self.node(current).entries.get(segment) {
                Some(Value::Table(child)) => Some(*child),
                Some(other) => {
                    return Err(Error::name_collision(line, walked, other.kind()));
                }
                None => None,
            };
            current = match existing {
                Some(child) => child,
                None => self.push_child(current, segment),
            };
        }
        Ok(current)
    }

    /// Binds `name` to a scalar value in the node behind `id`.
    ///
    /// Rebinding a scalar is last-write-wins; rebinding a table would
    /// orphan a reachable subtree and is a collision.
    pub(crate) fn set(&mut self, id: NodeId, name: String, value: Value, line: usize) -> Result<()> {
        if let Some(existing) = self.node(id).entries.get(&name) {
            if existing.is_table() {
                let key = self.entry_key(id, &name);
                return Err(Error::name_collision(line, key, ValueKind::Table));
            }
        }
        self.nodes[id.index()].entries.insert(name, value);
        Ok(())
    }

    /// Appends a fresh node and links it under `parent` as `key`.
    fn push_child(&mut self, parent: NodeId, key: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(key.to_string(), Some(parent)));
        self.nodes[parent.index()]
            .entries
            .insert(key.to_string(), Value::Table(id));
        id
    }

    fn entry_key(&self, id: NodeId, name: &str) -> String {
        let prefix = self.full_key(id);
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.node(id)
    }
}

/// Structural tree equivalence: same full keys, same scalar values, same
/// nesting. Entry order and arena layout are formatting detail and do not
/// participate, so a document and its reparsed serialization compare
/// equal.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        subtree_eq(self, self.root(), other, other.root())
    }
}

fn subtree_eq(left: &Document, li: NodeId, right: &Document, ri: NodeId) -> bool {
    let (ln, rn) = (left.node(li), right.node(ri));
    if ln.key != rn.key || ln.entries.len() != rn.entries.len() {
        return false;
    }
    ln.entries.iter().all(|(name, lv)| match rn.entries.get(name) {
        Some(rv) => match (lv, rv) {
            (Value::Table(lc), Value::Table(rc)) => subtree_eq(left, *lc, right, *rc),
            (lv, rv) => lv == rv,
        },
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_document_has_only_a_root() {
        let doc = Document::new();
        assert_eq!(doc.node_count(), 1);
        let root = &doc[doc.root()];
        assert_eq!(root.key(), "");
        assert_eq!(root.parent(), None);
        assert!(root.is_empty());
        assert_eq!(doc.full_key(doc.root()), "");
    }

    #[test]
    fn resolve_creates_each_missing_segment() {
        let mut doc = Document::new();
        let c = doc.resolve_or_create("a.b.c", 1).unwrap();
        assert_eq!(doc.node_count(), 4);
        assert_eq!(doc.full_key(c), "a.b.c");

        let b = doc[c].parent().unwrap();
        assert_eq!(doc[b].key(), "b");
        assert_eq!(doc.get_object("a.b"), Some(b));
    }

    #[test]
    fn resolve_is_idempotent_by_identity() {
        let mut doc = Document::new();
        let first = doc.resolve_or_create("a.b.c", 1).unwrap();
        let second = doc.resolve_or_create("a.b.c", 2).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn resolve_trims_segments() {
        let mut doc = Document::new();
        let id = doc.resolve_or_create(" a . b ", 1).unwrap();
        assert_eq!(doc.full_key(id), "a.b");
        assert_eq!(doc.get_object("a.b"), Some(id));
    }

    #[test]
    fn resolve_rejects_empty_segments() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.resolve_or_create("a..b", 3),
            Err(Error::EmptySectionName { line: 3 })
        ));
    }

    #[test]
    fn resolve_through_scalar_is_a_collision() {
        let mut doc = Document::new();
        let x = doc.resolve_or_create("x", 1).unwrap();
        doc.set(x, "s".to_string(), Value::Integer(1), 2).unwrap();

        match doc.resolve_or_create("x.s.z", 3) {
            Err(Error::NameCollision { key, found, line }) => {
                assert_eq!(key, "x.s");
                assert_eq!(found, ValueKind::Integer);
                assert_eq!(line, 3);
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn scalar_over_table_is_a_collision() {
        let mut doc = Document::new();
        doc.resolve_or_create("a.b", 1).unwrap();
        let a = doc.get_object("a").unwrap();

        match doc.set(a, "b".to_string(), Value::Boolean(true), 2) {
            Err(Error::NameCollision { key, found, .. }) => {
                assert_eq!(key, "a.b");
                assert_eq!(found, ValueKind::Table);
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn scalar_rebinding_is_last_write_wins() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set(root, "n".to_string(), Value::Integer(1), 1).unwrap();
        doc.set(root, "n".to_string(), Value::Integer(2), 2).unwrap();
        assert_eq!(doc[root].len(), 1);
        assert_eq!(doc[root].get("n"), Some(&Value::Integer(2)));
    }

    #[test]
    fn get_object_misses_are_none() {
        let mut doc = Document::new();
        doc.resolve_or_create("a", 1).unwrap();
        let a = doc.get_object("a").unwrap();
        doc.set(a, "s".to_string(), Value::Integer(1), 2).unwrap();

        assert_eq!(doc.get_object("missing"), None);
        assert_eq!(doc.get_object("a.s"), None);
        assert_eq!(doc.get_object("a.s.deeper"), None);
        assert_eq!(doc.get_object(""), Some(doc.root()));
        assert_eq!(doc.get_object("  "), Some(doc.root()));
        assert_eq!(doc.get_object(" a "), Some(a));
    }

    #[test]
    fn equality_is_structural_not_positional() {
        let mut one = Document::new();
        one.resolve_or_create("a", 1).unwrap();
        one.resolve_or_create("b", 2).unwrap();

        let mut two = Document::new();
        two.resolve_or_create("b", 1).unwrap();
        two.resolve_or_create("a", 2).unwrap();

        assert_eq!(one, two);

        let a = two.get_object("a").unwrap();
        two.set(a, "extra".to_string(), Value::Integer(1), 3).unwrap();
        assert_ne!(one, two);
    }
}
