//! Serialization of a finished tree back to text.
//!
//! ## Overview
//!
//! The serializer walks the tree depth-first from the root. For each node
//! with a non-empty full key it prints a `[full.key]` header, then the
//! node's scalar entries in insertion order as `"name": value` lines, then
//! its child tables in insertion order. The root prints no header, so its
//! scalars come first in the output, before any section.
//!
//! Field names are always quoted and escaped; that keeps names containing
//! dots, spaces, or comment markers unambiguous, and the parser unquotes
//! them on the way back in. Output is normalized (whitespace and quoting),
//! not byte-identical to the input, but it re-parses to an equivalent
//! tree.
//!
//! ## Usage
//!
//! ```rust
//! use tomlish::{parse_str, to_string};
//!
//! let doc = parse_str("[server]\nport=8080 # comment\n").unwrap();
//! assert_eq!(to_string(&doc), "[server]\n\"port\": 8080\n");
//! ```

use std::fmt;

use crate::tree::{Document, NodeId};
use crate::value::{escape_into, Value};

/// Serializes a document to its canonical text.
///
/// The output is stable: the same document always serializes to the same
/// string, because entries print in insertion order.
///
/// # Examples
///
/// ```rust
/// use tomlish::{parse_str, to_string};
///
/// let doc = parse_str("flag = true\n[limits]\nmax = 2.0\n").unwrap();
/// assert_eq!(to_string(&doc), "\"flag\": true\n[limits]\n\"max\": 2.0\n");
/// ```
#[must_use]
pub fn to_string(doc: &Document) -> String {
    let mut out = String::with_capacity(256);
    write_node(doc, doc.root(), &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let full_key = doc.full_key(id);
    if !full_key.is_empty() {
        out.push('[');
        out.push_str(&full_key);
        out.push_str("]\n");
    }
    let node = doc.node(id);
    for (name, value) in node.iter() {
        if !value.is_table() {
            out.push('"');
            escape_into(out, name);
            out.push_str("\": ");
            out.push_str(&value.to_string());
            out.push('\n');
        }
    }
    for value in node.values() {
        if let Value::Table(child) = value {
            write_node(doc, *child, out);
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string(self))
    }
}
