//! Sentinel-terminated source buffer.
//!
//! The buffer stores the source text followed by a `\0` sentinel and zero
//! padding up to the next 64-byte boundary, so the cursor can look one or two
//! bytes ahead without bounds checks near the end of input. The padding is
//! valid UTF-8, which keeps every slice of the buffer a plain `&str`.
//!
//! # Encoding
//!
//! Text arriving as bytes is decoded lossily: each invalid UTF-8 sequence is
//! replaced by U+FFFD and recorded as an [`EncodingIssue`] whose position is
//! the offset of the replacement character in the decoded text. The scanner
//! reports these when it reaches them. A leading UTF-8 BOM is recorded and
//! skipped by the cursor.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Zero bytes guaranteed after the source: the sentinel plus one lookahead byte.
const SENTINEL_LEN: usize = 2;

/// Byte order mark as it appears at the start of UTF-8 text.
const UTF8_BOM: &str = "\u{FEFF}";

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary,
///              source_len (sentinel)   at least one byte past the sentinel
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source..., '\0' sentinel, '\0' padding...]`.
    buf: String,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: usize,
    /// Encoding issues detected during construction, ordered by position.
    encoding_issues: Vec<EncodingIssue>,
}

/// Encoding issue detected during source buffer construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingIssue {
    /// What kind of encoding issue was detected.
    pub kind: EncodingIssueKind,
    /// Byte position in the decoded source.
    pub pos: usize,
    /// Byte length of the offending sequence in the original input.
    pub len: usize,
}

/// Kind of encoding issue detected in a source buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingIssueKind {
    /// UTF-8 BOM (`EF BB BF`) at the start. Skipped, never scanned.
    Utf8Bom,
    /// Invalid UTF-8 sequence, replaced by U+FFFD.
    InvalidUtf8,
}

impl SourceBuffer {
    /// Create a buffer from source text.
    pub fn new(source: &str) -> Self {
        let mut encoding_issues = Vec::new();
        detect_bom(source, &mut encoding_issues);
        Self::from_decoded(source.to_owned(), encoding_issues)
    }

    /// Create a buffer from raw bytes, decoding them lossily as UTF-8.
    ///
    /// Every invalid sequence becomes U+FFFD and is recorded as an
    /// [`EncodingIssueKind::InvalidUtf8`] issue.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut encoding_issues = Vec::new();
        let mut text = String::with_capacity(bytes.len());
        for chunk in bytes.utf8_chunks() {
            if text.is_empty() {
                detect_bom(chunk.valid(), &mut encoding_issues);
            }
            text.push_str(chunk.valid());
            let invalid = chunk.invalid();
            if !invalid.is_empty() {
                encoding_issues.push(EncodingIssue {
                    kind: EncodingIssueKind::InvalidUtf8,
                    pos: text.len(),
                    len: invalid.len(),
                });
                text.push(char::REPLACEMENT_CHARACTER);
            }
        }
        Self::from_decoded(text, encoding_issues)
    }

    fn from_decoded(mut buf: String, encoding_issues: Vec<EncodingIssue>) -> Self {
        let source_len = buf.len();
        // Round up to next 64-byte boundary, leaving at least two zero bytes
        // so `Cursor::peek` stays in bounds at EOF.
        let padded_len = (source_len + SENTINEL_LEN + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        buf.push_str(&"\0".repeat(padded_len - source_len));
        Self {
            buf,
            source_len,
            encoding_issues,
        }
    }

    /// Returns the source text (without sentinel or padding).
    pub fn as_str(&self) -> &str {
        &self.buf[..self.source_len]
    }

    /// Returns the full buffer including sentinel and padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// Returns the full buffer as text, including sentinel and padding.
    pub(crate) fn as_sentinel_str(&self) -> &str {
        &self.buf
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> usize {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Length of the leading BOM, or 0 when there is none.
    pub fn bom_len(&self) -> usize {
        match self.encoding_issues.first() {
            Some(issue) if issue.kind == EncodingIssueKind::Utf8Bom => issue.len,
            _ => 0,
        }
    }

    /// Encoding issues detected during construction.
    pub fn encoding_issues(&self) -> &[EncodingIssue] {
        &self.encoding_issues
    }

    /// Consume the buffer, producing a [`Cursor`] past any leading BOM.
    pub fn into_cursor(self) -> Cursor {
        Cursor::new(self)
    }
}

fn detect_bom(source: &str, issues: &mut Vec<EncodingIssue>) {
    if source.starts_with(UTF8_BOM) {
        issues.push(EncodingIssue {
            kind: EncodingIssueKind::Utf8Bom,
            pos: 0,
            len: UTF8_BOM.len(),
        });
    }
}
