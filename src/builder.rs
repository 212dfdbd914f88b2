//! Tree building: consumes tidied lines and grows the document.
//!
//! The builder is the single writer of the tree. It holds one piece of
//! state besides the document itself, the current node, which starts at
//! the root and moves on every section header. Assignments always land on
//! the current node; headers always resolve from the root, so a child
//! section may be declared before or after its parent and the final tree
//! comes out the same.

use std::io::Read;

use crate::error::{Error, Result};
use crate::reader::{Line, LineSplitter};
use crate::tidy::tidy;
use crate::tree::{Document, NodeId};
use crate::value::{parse_scalar, unescape};

/// Assignment delimiters, leftmost occurrence wins.
pub(crate) const KEY_DELIMITERS: [char; 2] = ['=', ':'];

/// Builds a [`Document`] from a stream of raw lines.
pub(crate) struct TreeBuilder {
    doc: Document,
    current: NodeId,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        let doc = Document::new();
        let current = doc.root();
        TreeBuilder { doc, current }
    }

    /// Consumes one raw line. Lines that tidy to nothing are skipped.
    pub(crate) fn feed(&mut self, line: &Line) -> Result<()> {
        let text = tidy(&line.text);
        if text.is_empty() {
            return Ok(());
        }
        if let Some(inner) = header_path(text) {
            let path = inner.trim();
            if path.is_empty() {
                return Err(Error::empty_section_name(line.number));
            }
            self.current = self.doc.resolve_or_create(path, line.number)?;
            return Ok(());
        }
        let Some(at) = text.find(&KEY_DELIMITERS[..]) else {
            return Err(Error::missing_delimiter(line.number, text));
        };
        let name = field_name(text[..at].trim());
        let value = parse_scalar(text[at + 1..].trim(), line.number)?;
        self.doc.set(self.current, name, value, line.number)
    }

    pub(crate) fn finish(self) -> Document {
        self.doc
    }
}

/// Returns the inner path when the whole line is a `[...]` header.
fn header_path(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.strip_suffix(']')
}

/// Unquotes and unescapes a quoted field name; bare names pass through
/// verbatim. The serializer always quotes names, so this is what closes
/// the round trip.
fn field_name(trimmed: &str) -> String {
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        unescape(&trimmed[1..trimmed.len() - 1])
    } else {
        trimmed.to_string()
    }
}

/// Drives a full parse: pulls each line, feeds the builder, returns the
/// finished tree. The first error of any kind aborts and is returned.
pub(crate) fn parse_lines<R: Read>(lines: LineSplitter<R>) -> Result<Document> {
    let mut builder = TreeBuilder::new();
    for line in lines {
        builder.feed(&line?)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::io::Cursor;

    fn build(input: &str) -> Result<Document> {
        parse_lines(LineSplitter::new(Cursor::new(input), 64))
    }

    #[test]
    fn assignments_before_any_header_land_on_root() {
        let doc = build("x = 1\ny: 2\n").unwrap();
        let root = &doc[doc.root()];
        assert_eq!(root.get("x"), Some(&Value::Integer(1)));
        assert_eq!(root.get("y"), Some(&Value::Integer(2)));
    }

    #[test]
    fn headers_move_the_current_node() {
        let doc = build("[a]\nx = 1\n[b]\ny = 2\n").unwrap();
        let a = doc.get_object("a").unwrap();
        let b = doc.get_object("b").unwrap();
        assert_eq!(doc[a].get("x"), Some(&Value::Integer(1)));
        assert!(doc[a].get("y").is_none());
        assert_eq!(doc[b].get("y"), Some(&Value::Integer(2)));
    }

    #[test]
    fn child_declared_before_parent_converges() {
        let forward = build("[a.b]\nx = 1\n[a]\ny = 2\n").unwrap();
        let backward = build("[a]\ny = 2\n[a.b]\nx = 1\n").unwrap();

        let ab = forward.get_object("a.b").unwrap();
        let a = forward.get_object("a").unwrap();
        assert_eq!(forward[ab].get("x"), Some(&Value::Integer(1)));
        assert_eq!(forward[a].get("y"), Some(&Value::Integer(2)));
        assert_eq!(forward[ab].parent(), Some(a));

        assert_eq!(forward, backward);
    }

    #[test]
    fn headers_resolve_from_the_root_not_the_current_node() {
        let doc = build("[a]\n[b]\n[a.c]\nx = 1\n").unwrap();
        assert!(doc.get_object("a.c").is_some());
        assert!(doc.get_object("b.a").is_none());
        assert!(doc.get_object("b.c").is_none());
    }

    #[test]
    fn delimiter_is_leftmost_equals_or_colon() {
        let doc = build("when: 2024-05-17T08:30:00Z\n").unwrap();
        let when = doc[doc.root()].get("when").unwrap();
        assert!(when.is_datetime());

        let doc = build("note = \"k: v\"\n").unwrap();
        assert_eq!(
            doc[doc.root()].get("note"),
            Some(&Value::String("k: v".to_string()))
        );
    }

    #[test]
    fn quoted_field_names_are_unquoted() {
        let doc = build("\"dotted.name\" = 1\n").unwrap();
        let root = &doc[doc.root()];
        assert_eq!(root.get("dotted.name"), Some(&Value::Integer(1)));
        // The scalar is an entry of the root, not a nested table.
        assert!(doc.get_object("dotted.name").is_none());
    }

    #[test]
    fn empty_field_name_is_allowed() {
        let doc = build("= 5\n").unwrap();
        assert_eq!(doc[doc.root()].get(""), Some(&Value::Integer(5)));
    }

    #[test]
    fn last_write_wins_for_scalars() {
        let doc = build("x = 1\nx = 2\n").unwrap();
        assert_eq!(doc[doc.root()].get("x"), Some(&Value::Integer(2)));
        assert_eq!(doc[doc.root()].len(), 1);
    }

    #[test]
    fn missing_delimiter_aborts_with_the_line_number() {
        match build("# comment\n\njustAWord\n") {
            Err(Error::MissingDelimiter { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "justAWord");
            }
            other => panic!("expected missing delimiter, got {:?}", other),
        }
    }

    #[test]
    fn empty_headers_fail() {
        assert!(matches!(
            build("[]\n"),
            Err(Error::EmptySectionName { line: 1 })
        ));
        assert!(matches!(
            build("[  ]\n"),
            Err(Error::EmptySectionName { line: 1 })
        ));
        assert!(matches!(
            build("[a..b]\n"),
            Err(Error::EmptySectionName { line: 1 })
        ));
    }

    #[test]
    fn scalar_then_header_is_a_collision() {
        match build("a = 1\n[a.b]\n") {
            Err(Error::NameCollision { line, key, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(key, "a");
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn header_then_scalar_is_a_collision() {
        match build("[a.b]\n[a]\nb = 2\n") {
            Err(Error::NameCollision { line, key, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(key, "a.b");
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn comments_and_blank_lines_have_no_effect() {
        let doc = build("# top\n\n[a] // section\nx = 1 # trailing\n\n// done\n").unwrap();
        let a = doc.get_object("a").unwrap();
        assert_eq!(doc[a].get("x"), Some(&Value::Integer(1)));
        assert_eq!(doc[a].len(), 1);
        assert_eq!(doc[doc.root()].len(), 1);
    }

    #[test]
    fn value_errors_carry_the_line_number() {
        match build("ok = 1\nbad = [1,2]\n") {
            Err(Error::UnsupportedValue { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected unsupported value, got {:?}", other),
        }
        match build("ok = 1\n\nbad = zzz\n") {
            Err(Error::UnparseableValue { line, literal }) => {
                assert_eq!(line, 3);
                assert_eq!(literal, "zzz");
            }
            other => panic!("expected unparseable value, got {:?}", other),
        }
    }

    #[test]
    fn header_lookalike_without_closing_bracket_is_an_assignment() {
        assert!(matches!(
            build("[not-closed\n"),
            Err(Error::MissingDelimiter { .. })
        ));
    }
}
