//! Character cursor over a sentinel-terminated buffer.
//!
//! The cursor owns its [`SourceBuffer`] and advances one character at a
//! time, keeping the byte offset, line and column in sync. Byte-level reads
//! (`current`, `peek`) never go out of bounds: past the end of the source they
//! return the `0x00` sentinel or padding.
//!
//! # Interior Null Bytes
//!
//! A null at `pos < source_len` is an interior null; a null at
//! `pos >= source_len` is the sentinel (EOF). [`Cursor::is_eof`] makes the
//! distinction.

use crate::{ScanPosition, SourceBuffer};

/// Owned cursor over a [`SourceBuffer`].
///
/// Created via [`SourceBuffer::into_cursor()`].
#[derive(Clone, Debug)]
pub struct Cursor {
    buf: SourceBuffer,
    /// Current read position (byte index into the buffer).
    pos: usize,
    /// Line of the character at `pos`, starting at 1.
    line: usize,
    /// Column of the character at `pos`, starting at 1.
    column: usize,
}

impl Cursor {
    /// Create a cursor at the first character, past any leading BOM.
    pub(crate) fn new(buf: SourceBuffer) -> Self {
        let pos = buf.bom_len();
        Self {
            buf,
            pos,
            line: 1,
            column: 1,
        }
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf.as_sentinel_bytes()[self.pos]
    }

    /// Returns the byte one position ahead of current.
    ///
    /// Safe at any position up to EOF: the buffer keeps at least two zero
    /// bytes after the source.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf.as_sentinel_bytes()[self.pos + 1]
    }

    /// Returns the character at the current position, or `None` at EOF.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let byte = self.current();
        if byte.is_ascii() {
            return Some(char::from(byte));
        }
        self.buf.as_sentinel_str()[self.pos..].chars().next()
    }

    /// Returns `true` once every source character has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Current offset, line and column.
    #[inline]
    pub fn position(&self) -> ScanPosition {
        ScanPosition::new(self.pos, self.line, self.column)
    }

    /// The buffer this cursor reads from.
    pub fn source(&self) -> &SourceBuffer {
        &self.buf
    }

    /// Consume the current character and return it.
    ///
    /// Returns `None` (and does not move) at EOF.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Extract a source substring as `&str`.
    ///
    /// `start..end` must lie on character boundaries within the source.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        debug_assert!(
            end <= self.buf.len(),
            "slice end {end} exceeds source length {}",
            self.buf.len()
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.buf.as_str()[start..end]
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &str {
        self.slice(start, self.pos)
    }

    /// Offset of the next `byte` at or after the current position.
    ///
    /// Searches only the source content, never the sentinel or padding.
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        let remaining = &self.buf.as_str().as_bytes()[self.pos..];
        memchr::memchr(byte, remaining).map(|off| self.pos + off)
    }

    /// Offset of the next occurrence of `needle` at or after the current position.
    pub fn find_str(&self, needle: &str) -> Option<usize> {
        let remaining = &self.buf.as_str().as_bytes()[self.pos..];
        memchr::memmem::find(remaining, needle.as_bytes()).map(|off| self.pos + off)
    }

    /// Compute the position of `offset`, counting forward from `from`.
    ///
    /// `from` must be a position this cursor has passed through, and
    /// `from.offset <= offset <= source_len`.
    pub fn locate(&self, from: ScanPosition, offset: usize) -> ScanPosition {
        let text = self.slice(from.offset, offset);
        match memchr::memrchr(b'\n', text.as_bytes()) {
            Some(last_newline) => {
                let lines = memchr::memchr_iter(b'\n', text.as_bytes()).count();
                let tail = &text[last_newline + 1..];
                ScanPosition::new(offset, from.line + lines, tail.chars().count() + 1)
            }
            None => ScanPosition::new(offset, from.line, from.column + text.chars().count()),
        }
    }

    /// Jump forward to `end`, updating line and column for everything skipped.
    ///
    /// `end` is clamped to the source length.
    pub fn advance_to(&mut self, end: usize) {
        let end = end.min(self.buf.len());
        if end <= self.pos {
            return;
        }
        let target = self.locate(self.position(), end);
        self.pos = target.offset;
        self.line = target.line;
        self.column = target.column;
    }
}

#[cfg(test)]
mod tests;
