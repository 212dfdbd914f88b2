//! Serde interop for parsed documents.
//!
//! Compiled only with the `serde` feature. A [`Document`] serializes as
//! nested maps: each table becomes a map in entry insertion order, scalars
//! become their native serde types, and datetimes go through chrono as
//! RFC 3339 strings.
//!
//! # Examples
//!
//! Bridging a parsed document into JSON:
//!
//! ```rust
//! use tomlish::parse_str;
//!
//! let doc = parse_str("[server]\nport = 8080\nname = \"api\"\n").unwrap();
//! let json = serde_json::to_string(&doc).unwrap();
//! assert_eq!(json, r#"{"server":{"port":8080,"name":"api"}}"#);
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::tree::{Document, NodeId};
use crate::value::Value;

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        TableRef {
            doc: self,
            id: self.root(),
        }
        .serialize(serializer)
    }
}

/// One table of a document, carrying the document that owns it so the
/// arena can be followed into child tables.
struct TableRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl Serialize for TableRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let node = &self.doc[self.id];
        let mut map = serializer.serialize_map(Some(node.len()))?;
        for (name, value) in node.iter() {
            match value {
                Value::Integer(n) => map.serialize_entry(name, n)?,
                Value::Float(x) => map.serialize_entry(name, x)?,
                Value::Boolean(b) => map.serialize_entry(name, b)?,
                Value::String(s) => map.serialize_entry(name, s)?,
                Value::Datetime(dt) => map.serialize_entry(name, dt)?,
                Value::Table(child) => map.serialize_entry(
                    name,
                    &TableRef {
                        doc: self.doc,
                        id: *child,
                    },
                )?,
            }
        }
        map.end()
    }
}
