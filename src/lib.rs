//! # tomlish
//!
//! A streaming parser and serializer for a TOML-like configuration
//! dialect: `key = value` / `key: value` assignments, `[dotted.path]`
//! section headers, `#` and `//` line comments.
//!
//! ## Key Features
//!
//! - **Streaming input**: reads any [`std::io::Read`] in fixed-size
//!   chunks; a line split across read boundaries is reassembled, so the
//!   buffer size never changes what gets parsed
//! - **Dotted sections**: `[a.b.c]` creates intermediate tables on
//!   demand, and a child section may be declared before its parent
//! - **Typed values**: integers, floats, booleans, quoted strings, and
//!   RFC 3339 datetimes, classified by a fixed priority order
//! - **Round trip**: a parsed tree serializes to normalized text that
//!   re-parses to an equivalent tree
//! - **Handle-based tree**: nodes live in an arena owned by
//!   [`Document`]; [`NodeId`] handles make parent links cycle-free
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tomlish = "0.1"
//! ```
//!
//! ### Parsing and lookup
//!
//! ```rust
//! use tomlish::parse_str;
//!
//! let input = r#"
//! title = "demo"   # comments run to the end of the line
//!
//! [server]
//! host = "localhost"
//! port = 8080
//!
//! [server.tls]
//! enabled = true
//! "#;
//!
//! let doc = parse_str(input).unwrap();
//!
//! let server = doc.get_object("server").unwrap();
//! assert_eq!(doc[server].get("port").unwrap().as_i64(), Some(8080));
//!
//! let tls = doc.get_object("server.tls").unwrap();
//! assert_eq!(doc.full_key(tls), "server.tls");
//!
//! // Misses are `None`, not errors.
//! assert!(doc.get_object("server.missing").is_none());
//! ```
//!
//! ### Serializing back
//!
//! ```rust
//! use tomlish::{parse_str, to_string};
//!
//! let doc = parse_str("[a]\nx = 1\n").unwrap();
//! let text = to_string(&doc);
//! assert_eq!(text, "[a]\n\"x\": 1\n");
//! assert_eq!(parse_str(&text).unwrap(), doc);
//! ```
//!
//! ## Errors
//!
//! Every parse error is fatal: the parse returns [`Error`] and no partial
//! tree. Errors carry the 1-based line number of the offending input
//! line.
//!
//! ```rust
//! use tomlish::{parse_str, Error};
//!
//! let err = parse_str("[section]\noops\n").unwrap_err();
//! assert!(matches!(err, Error::MissingDelimiter { line: 2, .. }));
//! ```
//!
//! ## Dialect
//!
//! The accepted dialect is TOML-like, not TOML: see [`format`] for the
//! grammar, the value classification order, and the divergences. Arrays
//! and inline tables are recognized and rejected as unsupported.
//!
//! ## Cargo Features
//!
//! - **`serde`** (off by default): implements `serde::Serialize` for
//!   [`Document`], bridging parsed trees into `serde_json` and friends.
//!
//! ## Examples
//!
//! The `demos/` directory holds a runnable demo:
//!
//! - **`dump.rs`** - parse a file and print the normalized tree
//!
//! Run it with: `cargo run --example dump -- path/to/config.toml`

mod builder;
pub mod error;
pub mod format;
#[cfg(feature = "serde")]
pub mod impl_serde;
pub mod options;
mod reader;
pub mod ser;
mod tidy;
pub mod tree;
pub mod value;

pub use error::{Error, NumericError, Result};
pub use options::{ParseOptions, DEFAULT_BUFFER_SIZE};
pub use ser::to_string;
pub use tree::{Document, Node, NodeId};
pub use value::{Value, ValueKind};

use std::io;
use std::io::Cursor;

/// Parses a complete document from a string.
///
/// Equivalent to [`parse_reader`] over the string's bytes; the input is
/// still consumed through the chunked pipeline, so behavior cannot drift
/// between the two entry points.
///
/// # Examples
///
/// ```rust
/// use tomlish::parse_str;
///
/// let doc = parse_str("[owner]\nname = \"alice\"\n").unwrap();
/// let owner = doc.get_object("owner").unwrap();
/// assert_eq!(doc[owner].get("name").unwrap().as_str(), Some("alice"));
/// ```
///
/// # Errors
///
/// Returns the first parse error hit; no partial tree survives.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(input: &str) -> Result<Document> {
    parse_reader(Cursor::new(input))
}

/// Parses a complete document from any byte reader.
///
/// The reader is consumed in chunks of the default buffer size; the whole
/// input is never buffered at once.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tomlish::parse_reader;
///
/// let doc = parse_reader(Cursor::new("flag = true\n")).unwrap();
/// assert_eq!(doc[doc.root()].get("flag").unwrap().as_bool(), Some(true));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the reader fails, or the first parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R: io::Read>(reader: R) -> Result<Document> {
    parse_reader_with_options(reader, ParseOptions::default())
}

/// Parses a complete document from a reader with explicit options.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
/// use tomlish::{parse_reader_with_options, ParseOptions};
///
/// // A one-byte buffer exercises every chunk boundary there is; the
/// // parse result is identical to any other buffer size.
/// let options = ParseOptions::new().with_buffer_size(1);
/// let doc = parse_reader_with_options(Cursor::new("n = 1\n"), options).unwrap();
/// assert_eq!(doc[doc.root()].get("n").unwrap().as_i64(), Some(1));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the reader fails, or the first parse error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader_with_options<R: io::Read>(
    reader: R,
    options: ParseOptions,
) -> Result<Document> {
    builder::parse_lines(reader::LineSplitter::new(reader, options.buffer_size))
}
