//! Error types for parsing and serialization.
//!
//! Every failure a parse can hit is a variant of [`Error`], and every parse
//! error is fatal: the parse call returns `Err` and no partial tree. Lookup
//! misses are deliberately NOT errors; [`crate::Document::get_object`]
//! returns `Option` instead.
//!
//! ## Error Categories
//!
//! - **Stream errors**: the underlying reader failed ([`Error::Io`]) or a
//!   completed line was not valid UTF-8 ([`Error::InvalidUtf8`])
//! - **Structure errors**: a line that is neither a section header nor a
//!   well-formed assignment ([`Error::MissingDelimiter`],
//!   [`Error::EmptySectionName`], [`Error::NameCollision`])
//! - **Value errors**: a right-hand side that cannot become a typed value
//!   ([`Error::UnparseableValue`], [`Error::UnsupportedValue`],
//!   [`Error::NumericConversion`])
//!
//! All variants except [`Error::Io`] carry the 1-based physical line number
//! of the offending input line.
//!
//! ## Examples
//!
//! ```rust
//! use tomlish::{parse_str, Error};
//!
//! let result = parse_str("justAWord\n");
//! match result {
//!     Err(Error::MissingDelimiter { line, .. }) => assert_eq!(line, 1),
//!     other => panic!("expected a missing-delimiter error, got {:?}", other),
//! }
//! ```

use std::io;
use std::num::{ParseFloatError, ParseIntError};
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::value::ValueKind;

/// Represents all possible errors that can occur while parsing a document.
///
/// Variants raised for a specific input line carry its 1-based number;
/// blank and comment-only lines count, so the number matches what an editor
/// shows for the source file.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying reader failed for a reason other than end-of-stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A completed input line is not valid UTF-8.
    #[error("line {line}: input is not valid UTF-8")]
    InvalidUtf8 {
        line: usize,
        #[source]
        source: FromUtf8Error,
    },

    /// An assignment line contains neither `=` nor `:`.
    #[error("line {line}: missing `=` or `:` delimiter in `{text}`")]
    MissingDelimiter { line: usize, text: String },

    /// A section header's inner path is empty, as in `[]`.
    #[error("line {line}: empty section name")]
    EmptySectionName { line: usize },

    /// A dotted path segment is already bound to an incompatible value.
    ///
    /// Raised when a header descends through a name bound to a scalar, and
    /// when an assignment would overwrite a name bound to a table.
    #[error("line {line}: name collision on `{key}`: already bound to a {found} value")]
    NameCollision {
        line: usize,
        key: String,
        found: ValueKind,
    },

    /// A right-hand side matches none of the recognized literal grammars.
    #[error("line {line}: unparseable value `{literal}`")]
    UnparseableValue { line: usize, literal: String },

    /// An array or inline-table literal was recognized; those value kinds
    /// are not supported.
    #[error("line {line}: unsupported {kind} value `{literal}`")]
    UnsupportedValue {
        line: usize,
        kind: ValueKind,
        literal: String,
    },

    /// A numeric literal matched the grammar but the conversion failed.
    #[error("line {line}: cannot convert numeric value `{literal}`: {source}")]
    NumericConversion {
        line: usize,
        literal: String,
        #[source]
        source: NumericError,
    },
}

/// The underlying cause of a [`Error::NumericConversion`].
#[derive(Debug, Error)]
pub enum NumericError {
    /// Integer conversion failed (out of `i64` range).
    #[error(transparent)]
    Int(#[from] ParseIntError),

    /// Float conversion failed outright.
    #[error(transparent)]
    Float(#[from] ParseFloatError),

    /// Float conversion succeeded but produced a non-finite value.
    #[error("magnitude exceeds the 64-bit float range")]
    NonFinite,
}

impl Error {
    /// Creates a missing-delimiter error for an assignment line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::Error;
    ///
    /// let err = Error::missing_delimiter(3, "justAWord");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn missing_delimiter(line: usize, text: &str) -> Self {
        Error::MissingDelimiter {
            line,
            text: text.to_string(),
        }
    }

    /// Creates an empty-section-name error for a `[]` header.
    pub fn empty_section_name(line: usize) -> Self {
        Error::EmptySectionName { line }
    }

    /// Creates a name-collision error for a dotted key bound to `found`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::{Error, ValueKind};
    ///
    /// let err = Error::name_collision(7, "server.port", ValueKind::Integer);
    /// assert!(err.to_string().contains("server.port"));
    /// ```
    pub fn name_collision(line: usize, key: impl Into<String>, found: ValueKind) -> Self {
        Error::NameCollision {
            line,
            key: key.into(),
            found,
        }
    }

    /// Creates an unparseable-value error naming the offending literal.
    pub fn unparseable(line: usize, literal: &str) -> Self {
        Error::UnparseableValue {
            line,
            literal: literal.to_string(),
        }
    }

    /// Creates an unsupported-value error for an array or inline-table
    /// literal.
    pub fn unsupported(line: usize, kind: ValueKind, literal: &str) -> Self {
        Error::UnsupportedValue {
            line,
            kind,
            literal: literal.to_string(),
        }
    }

    /// Creates a numeric-conversion error wrapping its cause.
    pub fn numeric(line: usize, literal: &str, source: NumericError) -> Self {
        Error::NumericConversion {
            line,
            literal: literal.to_string(),
            source,
        }
    }

    /// Creates an invalid-UTF-8 error for a completed line.
    pub fn invalid_utf8(line: usize, source: FromUtf8Error) -> Self {
        Error::InvalidUtf8 { line, source }
    }

    /// Returns the 1-based input line this error points at, if it has one.
    ///
    /// [`Error::Io`] carries no line: the failure belongs to the stream,
    /// not to a line of text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::Error;
    ///
    /// assert_eq!(Error::empty_section_name(4).line(), Some(4));
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Io(_) => None,
            Error::InvalidUtf8 { line, .. }
            | Error::MissingDelimiter { line, .. }
            | Error::EmptySectionName { line }
            | Error::NameCollision { line, .. }
            | Error::UnparseableValue { line, .. }
            | Error::UnsupportedValue { line, .. }
            | Error::NumericConversion { line, .. } => Some(*line),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
