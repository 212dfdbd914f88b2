//! Input Dialect Reference
//!
//! This module documents the TOML-like configuration dialect accepted by
//! this library.
//!
//! # Overview
//!
//! The dialect covers the configuration-file core of TOML: line comments,
//! `[dotted.section]` headers, and scalar assignments. It is not TOML;
//! the divergences are listed under [Limitations](#limitations).
//!
//! # Lines
//!
//! Input is processed one line at a time. Lines end at `\n`; a preceding
//! `\r` is dropped, so CRLF input parses the same as LF input. A final
//! line without a trailing newline still counts. Line numbers are
//! 1-based and appear in every error.
//!
//! Each line is tidied before interpretation:
//!
//! - Leading and trailing whitespace is trimmed
//! - Everything from the first `#` or `//` onward is removed, whichever
//!   marker appears first
//! - A marker inside a double-quoted region does not start a comment, so
//!   `url = "https://example.com"` keeps its value intact
//! - Lines left empty after tidying are skipped
//!
//! ```text
//! # a full-line comment
//! port = 8080        // a trailing comment
//! path = "/srv/#1"   # the quoted '#' is data
//! ```
//!
//! # Section Headers
//!
//! A line of the form `[name]` opens a section. The name may be a dotted
//! path; each segment is trimmed of surrounding whitespace:
//!
//! ```text
//! [server]
//! [server.tls]
//! [ server . tls ]    # same section as the previous line
//! ```
//!
//! **Rules**:
//! - Paths are resolved from the root, never from the current section,
//!   so `[a.b]` names the same table wherever it appears
//! - Missing intermediate tables are created on demand; `[a.b.c]` works
//!   without `[a]` or `[a.b]` ever being declared
//! - Declaration order is free: a child section may precede its parent,
//!   and revisiting a header reopens the same table
//! - A segment that is empty after trimming (as in `[]` or `[a..b]`) is
//!   an error
//! - A path segment that already names a scalar is an error
//!
//! # Assignments
//!
//! Everything that is not a header must be an assignment. The field name
//! and the value are split at the first `=` or `:`, whichever comes
//! first; both sides are trimmed. A line with neither delimiter is an
//! error.
//!
//! ```text
//! name = "Alice"
//! port: 8080
//! ```
//!
//! Field names are taken literally, including inner whitespace. A name
//! wrapped in double quotes is unquoted first, which permits names
//! containing `#`, `[`, or dots. Assigning to a name twice keeps the
//! later value; assigning to a name that already names a section is an
//! error.
//!
//! # Values
//!
//! A value is classified by trying the forms below in order; the first
//! match wins. A value that matches none of them is an error.
//!
//! | Priority | Type | Syntax | Example |
//! |----------|------|--------|---------|
//! | 1 | Integer | Optional `-`, then digits | `42`, `-7` |
//! | 2 | Float | Digits `.` digits, optional `-` | `3.14`, `-0.5` |
//! | 3 | Boolean | `true`/`True`/`TRUE`, `false`/`False`/`FALSE` | `true` |
//! | 4 | String | Double-quoted | `"hello"` |
//! | 5 | Array | `[` ... `]` | rejected as unsupported |
//! | 6 | Inline table | `{` ... `}` | rejected as unsupported |
//! | 7 | Datetime | RFC 3339 | `1979-05-27T07:32:00Z` |
//!
//! The order is observable: `"42"` is a string because quoting wins over
//! nothing, and `1979-05-27T07:32:00Z` reaches the datetime rule only
//! because the inner `-` and `:` keep it from reading as a number.
//!
//! Integers must fit `i64` and floats must be finite; out-of-range
//! literals are errors, not silent truncations.
//!
//! **Escape sequences** (in quoted strings):
//!
//! ```text
//! \$  - dollar sign
//! \[  - left bracket
//! \]  - right bracket
//! \(  - left parenthesis
//! \)  - right parenthesis
//! \|  - pipe
//! \"  - quote
//! ```
//!
//! Any other backslash pair is kept as written.
//!
//! # Serialized Form
//!
//! [`to_string`](crate::to_string) renders a parsed tree back to text in
//! a normal form:
//!
//! - Sections print depth-first in creation order, each as `[full.path]`
//! - Fields print in assignment order as `"name": value`, names always
//!   quoted with the escapes above applied
//! - Strings are quoted and escaped; floats always carry a decimal
//!   point; datetimes render as RFC 3339
//! - The root's fields print first, before any header
//!
//! The output re-parses to a tree equivalent to the original, regardless
//! of the chunk size used to read either text.
//!
//! ```text
//! [server]
//! "host": "localhost"
//! "port": 8080
//! [server.tls]
//! "enabled": true
//! ```
//!
//! # Limitations
//!
//! - **Arrays and inline tables**: recognized but unsupported; both are
//!   reported as errors naming the offending literal
//! - **Multi-line values**: every value ends at its line
//! - **Single-quoted strings**: only double quotes delimit strings
//! - **Underscores in numbers**: `1_000` is not a number here
//! - **Exponent floats**: `1e6` is not a float here
//! - **Array-of-tables headers**: `[[name]]` is not recognized

// This module contains only documentation; no implementation code
