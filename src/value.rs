//! Typed values and the scalar classification rules.
//!
//! This module provides the [`Value`] enum, the tagged union stored in every
//! node entry, together with the literal grammar that turns a raw
//! right-hand-side string into one of its variants.
//!
//! ## Core Types
//!
//! - [`Value`]: one parsed value (integer, float, boolean, string, datetime,
//!   or a handle to a child table)
//! - [`ValueKind`]: the bare discriminant, used in error reports and for
//!   the recognized-but-unsupported literal kinds (arrays, inline tables)
//!
//! ## Classification
//!
//! A trimmed right-hand side is matched against the literal grammars in a
//! fixed priority order, each anchored to the whole string: integer, float,
//! boolean, quoted string, array, inline table, RFC 3339 datetime. The
//! first match wins; array and inline-table literals are recognized but
//! rejected as unsupported rather than silently stored as text.
//!
//! ## Usage Patterns
//!
//! ### Inspecting parsed values
//!
//! ```rust
//! use tomlish::{parse_str, Value};
//!
//! let doc = parse_str("answer = 42\npi = 3.14\n").unwrap();
//! let root = doc.root();
//!
//! assert_eq!(doc[root].get("answer"), Some(&Value::Integer(42)));
//! assert!(doc[root].get("pi").unwrap().is_float());
//! ```
//!
//! ### Creating values
//!
//! ```rust
//! use tomlish::Value;
//!
//! let flag = Value::from(true);
//! let count = Value::from(42);
//! let name = Value::from("alice");
//!
//! assert!(flag.is_boolean());
//! assert_eq!(count.as_i64(), Some(42));
//! assert_eq!(name.as_str(), Some("alice"));
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::error::{Error, NumericError, Result};
use crate::tree::NodeId;

/// Characters that are backslash-escaped inside serialized strings.
pub(crate) const ESCAPED_CHARS: [char; 7] = ['$', '[', ']', '(', ')', '|', '"'];

/// Accepted spellings of the two boolean values.
pub(crate) const BOOLEAN_LITERALS: [(&str, bool); 6] = [
    ("true", true),
    ("True", true),
    ("TRUE", true),
    ("false", false),
    ("False", false),
    ("FALSE", false),
];

/// A single parsed value.
///
/// Scalar variants own their data; [`Value::Table`] is a handle into the
/// owning [`Document`](crate::Document)'s node arena and is the only way a
/// child table is reachable from its parent's entries.
///
/// Equality on [`Value::Datetime`] compares instants, so the same moment
/// written with different UTC offsets compares equal.
///
/// # Examples
///
/// ```rust
/// use tomlish::Value;
///
/// let port = Value::Integer(8080);
/// let host = Value::from("localhost");
///
/// assert!(port.is_integer());
/// assert_eq!(port.as_i64(), Some(8080));
/// assert_eq!(host.to_string(), "\"localhost\"");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Datetime(DateTime<FixedOffset>),
    Table(NodeId),
}

/// The discriminant of a [`Value`], plus the two literal kinds that are
/// recognized by the classifier but never stored.
///
/// Used in error reports: a name collision names the kind it collided
/// with, and an unsupported literal names what it was recognized as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
    String,
    /// A `[...]` literal; recognized, not supported.
    Array,
    /// A `{...}` literal; recognized, not supported.
    InlineTable,
    Datetime,
    Table,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::InlineTable => "inline table",
            ValueKind::Datetime => "datetime",
            ValueKind::Table => "table",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Returns the kind of this value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::{Value, ValueKind};
    ///
    /// assert_eq!(Value::Integer(1).kind(), ValueKind::Integer);
    /// assert_eq!(Value::from("x").kind(), ValueKind::String);
    /// ```
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
            Value::Datetime(_) => ValueKind::Datetime,
            Value::Table(_) => ValueKind::Table,
        }
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a datetime.
    #[inline]
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Value::Datetime(_))
    }

    /// Returns `true` if the value is a child-table handle.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Value::Table(_))
    }

    /// If the value is an integer, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::Value;
    ///
    /// assert_eq!(Value::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a float or an integer, returns it as `f64`.
    /// Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::Value;
    ///
    /// assert_eq!(Value::Float(3.5).as_f64(), Some(3.5));
    /// assert_eq!(Value::Integer(42).as_f64(), Some(42.0));
    /// assert_eq!(Value::from(true).as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a datetime, returns a reference to it. Otherwise
    /// returns `None`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    /// If the value is a child-table handle, returns it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<NodeId> {
        match self {
            Value::Table(id) => Some(*id),
            _ => None,
        }
    }
}

/// Renders the value exactly as the serializer writes it on the right-hand
/// side of an assignment: strings quoted and escaped, datetimes as
/// RFC 3339, floats always carrying a decimal point. A table handle has no
/// textual form of its own and renders as `{table}`.
///
/// # Examples
///
/// ```rust
/// use tomlish::Value;
///
/// assert_eq!(Value::Float(2.0).to_string(), "2.0");
/// assert_eq!(Value::from("a [b]").to_string(), r#""a \[b\]""#);
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => f.write_str(&float_repr(*x)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => {
                let mut quoted = String::with_capacity(s.len() + 2);
                quoted.push('"');
                escape_into(&mut quoted, s);
                quoted.push('"');
                f.write_str(&quoted)
            }
            Value::Datetime(dt) => f.write_str(&dt.to_rfc3339()),
            Value::Table(_) => f.write_str("{table}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Datetime(value)
    }
}

/// Classifies and converts one trimmed right-hand side.
///
/// `line` is threaded through for error reporting only.
pub(crate) fn parse_scalar(raw: &str, line: usize) -> Result<Value> {
    if is_integer_literal(raw) {
        return match raw.parse::<i64>() {
            Ok(n) => Ok(Value::Integer(n)),
            Err(e) => Err(Error::numeric(line, raw, NumericError::Int(e))),
        };
    }
    if is_float_literal(raw) {
        let f = raw
            .parse::<f64>()
            .map_err(|e| Error::numeric(line, raw, NumericError::Float(e)))?;
        if !f.is_finite() {
            return Err(Error::numeric(line, raw, NumericError::NonFinite));
        }
        return Ok(Value::Float(f));
    }
    if let Some(b) = boolean_literal(raw) {
        return Ok(Value::Boolean(b));
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Ok(Value::String(unescape(&raw[1..raw.len() - 1])));
    }
    if raw.len() >= 2 && raw.starts_with('[') && raw.ends_with(']') {
        return Err(Error::unsupported(line, ValueKind::Array, raw));
    }
    if raw.len() >= 2 && raw.starts_with('{') && raw.ends_with('}') {
        return Err(Error::unsupported(line, ValueKind::InlineTable, raw));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Value::Datetime(dt));
    }
    Err(Error::unparseable(line, raw))
}

/// `-?[0-9]+`, anchored.
fn is_integer_literal(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]+\.[0-9]+`, anchored.
fn is_float_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix('-').unwrap_or(raw);
    match unsigned.split_once('.') {
        Some((int, frac)) => {
            !int.is_empty()
                && !frac.is_empty()
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn boolean_literal(raw: &str) -> Option<bool> {
    BOOLEAN_LITERALS
        .iter()
        .find(|(literal, _)| *literal == raw)
        .map(|(_, value)| *value)
}

/// Appends `raw` to `out`, backslash-prefixing every character in
/// [`ESCAPED_CHARS`].
pub(crate) fn escape_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        if ESCAPED_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Reverses [`escape_into`]. Unknown escapes are kept literally, and a
/// trailing lone backslash survives as itself.
pub(crate) fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if ESCAPED_CHARS.contains(&next) => out.push(next),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Renders a finite float so that it re-parses as a float: `Display`
/// output, with `.0` appended when no decimal point is present.
pub(crate) fn float_repr(value: f64) -> String {
    let mut rendered = value.to_string();
    if !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}
