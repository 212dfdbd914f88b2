//! Chunked reading and boundary-safe line splitting.
//!
//! [`ChunkReader`] pulls fixed-size byte chunks from any [`io::Read`];
//! [`LineSplitter`] reassembles them into complete lines, holding an
//! unterminated trailing fragment (the carried prefix) until a later chunk
//! or end-of-stream completes it. Where a chunk happens to end never
//! affects where a line ends.
//!
//! The splitter is a pull iterator: each [`LineSplitter::next_line`] call
//! does only the reads it needs for one more line, so the consumer paces
//! the producer and nothing buffers the whole input. The first I/O or
//! decode error ends the stream; after yielding it the splitter is fused.
//!
//! Splitting happens on raw bytes. `\n` terminates a line and an
//! immediately preceding `\r` is dropped, so `\r\n` counts as one
//! separator. Bytes are decoded to UTF-8 per completed line, which keeps
//! multi-byte characters straddling a chunk boundary intact.

use std::io;
use std::io::Read;

use crate::error::{Error, Result};

/// Reads an underlying stream in chunks of at most `buffer_size` bytes.
///
/// End of stream is a read returning zero bytes; short reads above zero
/// are ordinary and simply yield a shorter chunk. Interrupted reads are
/// retried. After end of stream or a failure, every further call returns
/// `Ok(None)`.
pub(crate) struct ChunkReader<R> {
    inner: R,
    buffer: Vec<u8>,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    pub(crate) fn new(inner: R, buffer_size: usize) -> Self {
        ChunkReader {
            inner,
            buffer: vec![0; buffer_size.max(1)],
            done: false,
        }
    }

    /// Returns the next non-empty chunk, or `None` at end of stream.
    pub(crate) fn next_chunk(&mut self) -> io::Result<Option<&[u8]>> {
        if self.done {
            return Ok(None);
        }
        loop {
            match self.inner.read(&mut self.buffer) {
                Ok(0) => {
                    self.done = true;
                    return Ok(None);
                }
                Ok(n) => return Ok(Some(&self.buffer[..n])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Err(e);
                }
            }
        }
    }
}

/// One complete logical line, numbered from 1 in physical order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Line {
    pub(crate) number: usize,
    pub(crate) text: String,
}

/// Splits a chunk stream into complete lines.
pub(crate) struct LineSplitter<R> {
    chunks: ChunkReader<R>,
    carry: Vec<u8>,
    /// Length of the carry prefix already scanned for `\n`.
    scanned: usize,
    eof: bool,
    fused: bool,
    next_number: usize,
}

impl<R: Read> LineSplitter<R> {
    pub(crate) fn new(reader: R, buffer_size: usize) -> Self {
        LineSplitter {
            chunks: ChunkReader::new(reader, buffer_size),
            carry: Vec::new(),
            scanned: 0,
            eof: false,
            fused: false,
            next_number: 1,
        }
    }

    /// Returns the next line, an error, or `None` once the stream ends.
    ///
    /// At end of stream a non-empty carried prefix is flushed as a final
    /// line without a terminator.
    pub(crate) fn next_line(&mut self) -> Option<Result<Line>> {
        if self.fused {
            return None;
        }
        loop {
            if let Some(offset) = find_newline(&self.carry[self.scanned..]) {
                let end = self.scanned + offset;
                let mut bytes: Vec<u8> = self.carry.drain(..=end).collect();
                bytes.pop();
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                self.scanned = 0;
                return Some(self.complete(bytes));
            }
            self.scanned = self.carry.len();
            if self.eof {
                if self.carry.is_empty() {
                    self.fused = true;
                    return None;
                }
                let bytes = std::mem::take(&mut self.carry);
                self.scanned = 0;
                return Some(self.complete(bytes));
            }
            match self.chunks.next_chunk() {
                Ok(Some(chunk)) => self.carry.extend_from_slice(chunk),
                Ok(None) => self.eof = true,
                Err(e) => {
                    self.fused = true;
                    return Some(Err(Error::Io(e)));
                }
            }
        }
    }

    fn complete(&mut self, bytes: Vec<u8>) -> Result<Line> {
        let number = self.next_number;
        self.next_number += 1;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(Line { number, text }),
            Err(e) => {
                self.fused = true;
                Err(Error::invalid_utf8(number, e))
            }
        }
    }
}

impl<R: Read> Iterator for LineSplitter<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

fn find_newline(haystack: &[u8]) -> Option<usize> {
    haystack.iter().position(|&b| b == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Caps how many bytes each read hands over, forcing chunk boundaries
    /// at arbitrary positions regardless of the splitter's buffer size.
    struct ShortRead<R> {
        inner: R,
        max_bytes_per_read: usize,
    }

    impl<R: Read> Read for ShortRead<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(self.max_bytes_per_read);
            self.inner.read(&mut buf[..len])
        }
    }

    /// Feeds a fixed script of chunks, one per read call.
    struct ScriptedReader {
        chunks: Vec<&'static [u8]>,
        next: usize,
    }

    impl Read for ScriptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.get(self.next) {
                Some(chunk) => {
                    assert!(chunk.len() <= buf.len(), "script chunk exceeds buffer");
                    buf[..chunk.len()].copy_from_slice(chunk);
                    self.next += 1;
                    Ok(chunk.len())
                }
                None => Ok(0),
            }
        }
    }

    fn lines_of<R: Read>(reader: R, buffer_size: usize) -> Vec<String> {
        LineSplitter::new(reader, buffer_size)
            .map(|line| line.unwrap().text)
            .collect()
    }

    #[test]
    fn splits_simple_lines() {
        let lines: Vec<Line> = LineSplitter::new(Cursor::new("a = 1\nb = 2\n"), 64)
            .map(|line| line.unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], Line { number: 1, text: "a = 1".to_string() });
        assert_eq!(lines[1], Line { number: 2, text: "b = 2".to_string() });
    }

    #[test]
    fn chunk_boundary_inside_a_line_is_invisible() {
        let scripted = ScriptedReader {
            chunks: vec![b"a = ", b"1\nb = 2\n"],
            next: 0,
        };
        assert_eq!(lines_of(scripted, 64), vec!["a = 1", "b = 2"]);
    }

    #[test]
    fn short_read_does_not_end_the_stream() {
        // First read returns fewer bytes than the buffer holds; the rest
        // of the input must still be consumed.
        let scripted = ScriptedReader {
            chunks: vec![b"a", b" = 1\n"],
            next: 0,
        };
        assert_eq!(lines_of(scripted, 4096), vec!["a = 1"]);
    }

    #[test]
    fn every_chunk_size_yields_the_same_lines() {
        let doc = "first = 1\r\nsecond = \"caf\u{e9}\"\n\nthird = true\nlast = 4";
        let expected = lines_of(Cursor::new(doc), 4096);
        assert_eq!(
            expected,
            vec!["first = 1", "second = \"caf\u{e9}\"", "", "third = true", "last = 4"]
        );
        for max in 1..=doc.len() {
            let reader = ShortRead {
                inner: Cursor::new(doc),
                max_bytes_per_read: max,
            };
            assert_eq!(lines_of(reader, 4096), expected, "chunk size {}", max);
        }
        for buffer_size in 1..8 {
            assert_eq!(lines_of(Cursor::new(doc), buffer_size), expected);
        }
    }

    #[test]
    fn final_line_without_terminator_is_flushed() {
        assert_eq!(lines_of(Cursor::new("a = 1"), 64), vec!["a = 1"]);
        assert_eq!(lines_of(Cursor::new("a = 1\nb"), 2), vec!["a = 1", "b"]);
    }

    #[test]
    fn crlf_is_one_separator_but_lone_cr_is_data() {
        assert_eq!(lines_of(Cursor::new("a\r\nb\n"), 64), vec!["a", "b"]);
        assert_eq!(lines_of(Cursor::new("x\ry\n"), 64), vec!["x\ry"]);
    }

    #[test]
    fn crlf_split_across_chunks() {
        let scripted = ScriptedReader {
            chunks: vec![b"a\r", b"\nb\n"],
            next: 0,
        };
        assert_eq!(lines_of(scripted, 64), vec!["a", "b"]);
    }

    #[test]
    fn multibyte_char_split_across_chunks() {
        let scripted = ScriptedReader {
            chunks: vec![b"k = \"\xc3", b"\xa9\"\n"],
            next: 0,
        };
        assert_eq!(lines_of(scripted, 64), vec!["k = \"\u{e9}\""]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(lines_of(Cursor::new(""), 64).is_empty());
    }

    #[test]
    fn numbering_counts_physical_lines() {
        let numbers: Vec<usize> = LineSplitter::new(Cursor::new("\n\na = 1\n"), 64)
            .map(|line| line.unwrap().number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    struct FailingReader {
        fed: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fed {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "boom"));
            }
            self.fed = true;
            let payload = b"ok = 1\n";
            buf[..payload.len()].copy_from_slice(payload);
            Ok(payload.len())
        }
    }

    #[test]
    fn read_failure_aborts_and_fuses() {
        let mut splitter = LineSplitter::new(FailingReader { fed: false }, 64);
        assert_eq!(splitter.next_line().unwrap().unwrap().text, "ok = 1");
        assert!(matches!(splitter.next_line(), Some(Err(Error::Io(_)))));
        assert!(splitter.next_line().is_none());
    }

    struct InterruptingReader {
        remaining: &'static [u8],
        interrupted: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            let n = self.remaining.len().min(buf.len());
            buf[..n].copy_from_slice(&self.remaining[..n]);
            self.remaining = &self.remaining[n..];
            Ok(n)
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let reader = InterruptingReader {
            remaining: b"a = 1\n",
            interrupted: false,
        };
        assert_eq!(lines_of(reader, 64), vec!["a = 1"]);
    }

    #[test]
    fn invalid_utf8_names_the_line_and_fuses() {
        let mut splitter = LineSplitter::new(Cursor::new(&b"ok = 1\n\xff\xfe\nx = 2\n"[..]), 64);
        assert_eq!(splitter.next_line().unwrap().unwrap().number, 1);
        match splitter.next_line() {
            Some(Err(Error::InvalidUtf8 { line, .. })) => assert_eq!(line, 2),
            other => panic!("expected invalid utf-8, got {:?}", other),
        }
        assert!(splitter.next_line().is_none());
    }
}
