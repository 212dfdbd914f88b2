//! Configuration options for parsing.
//!
//! This module provides [`ParseOptions`], the knobs for the streaming side
//! of a parse. The defaults suit ordinary configuration files; the buffer
//! size is mostly interesting for tests that want to force many chunk
//! boundaries.
//!
//! ## Examples
//!
//! ```rust
//! use std::io::Cursor;
//! use tomlish::{parse_reader_with_options, ParseOptions};
//!
//! let input = Cursor::new("[server]\nport = 8080\n");
//!
//! // Tiny buffer: every line straddles several reads, result is identical.
//! let options = ParseOptions::new().with_buffer_size(4);
//! let doc = parse_reader_with_options(input, options).unwrap();
//! assert!(doc.get_object("server").is_some());
//! ```

/// Default read-buffer size in bytes.
///
/// Matches a common page-size multiple; large enough that realistic
/// documents arrive in a handful of reads.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Configuration options for parsing.
///
/// Controls how the input stream is read. Tree-building behavior is not
/// configurable; the dialect is fixed (see [`crate::format`]).
///
/// # Examples
///
/// ```rust
/// use tomlish::ParseOptions;
///
/// // Defaults
/// let options = ParseOptions::new();
/// assert_eq!(options.buffer_size, tomlish::DEFAULT_BUFFER_SIZE);
///
/// // Custom read-buffer size
/// let options = ParseOptions::new().with_buffer_size(1024);
/// assert_eq!(options.buffer_size, 1024);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Size in bytes of each read from the underlying stream.
    pub buffer_size: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ParseOptions {
    /// Creates default options (4096-byte read buffer).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::ParseOptions;
    ///
    /// let options = ParseOptions::new();
    /// assert_eq!(options.buffer_size, 4096);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read-buffer size in bytes.
    ///
    /// Line boundaries never depend on the buffer size; a smaller buffer
    /// only means more reads. Sizes below 1 are raised to 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlish::ParseOptions;
    ///
    /// let options = ParseOptions::new().with_buffer_size(0);
    /// assert_eq!(options.buffer_size, 1);
    /// ```
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }
}
