//! Line cleanup: whitespace trimming and comment stripping.
//!
//! Comment markers are recognized only outside quoted regions, so a `#` or
//! `//` inside a string value survives. A line that tidies to nothing is
//! skipped by the tree builder.

/// Comment markers, in scan priority order. The leftmost occurrence of any
/// marker wins.
pub(crate) const COMMENT_MARKERS: [&str; 2] = ["#", "//"];

/// Trims a raw line and cuts it at the first comment marker outside
/// quotes. The kept prefix is trimmed again on the right, so `a = 1 # x`
/// tidies to `a = 1`.
pub(crate) fn tidy(line: &str) -> &str {
    let trimmed = line.trim();
    match comment_start(trimmed) {
        Some(cut) => trimmed[..cut].trim_end(),
        None => trimmed,
    }
}

/// Byte offset of the leftmost comment marker outside quotes, if any.
///
/// Tracks `"` regions and, inside them, backslash escapes so an escaped
/// quote does not toggle the region. Markers are ASCII, so byte-wise
/// scanning is safe in UTF-8 input and any returned offset is a char
/// boundary.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut i = 0;
    while i < bytes.len() {
        if escaped {
            escaped = false;
            i += 1;
            continue;
        }
        match bytes[i] {
            b'\\' if in_quotes => escaped = true,
            b'"' => in_quotes = !in_quotes,
            _ if !in_quotes => {
                if COMMENT_MARKERS
                    .iter()
                    .any(|marker| bytes[i..].starts_with(marker.as_bytes()))
                {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
