//! Character scanner producing pseudo-rune classified tokens.
//!
//! The scanner reads a [`Cursor`] and returns one token type per
//! [`TextScanner::scan`] call; the token's text and start position are then
//! available through [`TextScanner::token_text`] and
//! [`TextScanner::position`]. It does not unescape literals or parse numbers;
//! it only validates their syntax and reports problems to its [`ErrorSink`].
//!
//! # Design
//!
//! Dispatch is on the first character of the token. Categories switched off
//! in the [`ScanMode`] degrade to single-character tokens. Skipped comments
//! loop back to whitespace skipping, so a single `scan()` never returns a
//! skipped comment.

use crate::cursor::Cursor;
use crate::mode::{ScanConfig, ScanMode};
use crate::scan_error::{ErrorSink, NumberLiteral, ScanError, ScanErrorKind, TracingSink};
use crate::source_buffer::EncodingIssueKind;
use crate::tag::{self, TokenType};
use crate::{ScanPosition, SourceBuffer};

/// Numeric literal prefix, as seen after the leading `0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Prefix {
    /// No prefix: plain decimal.
    None,
    /// `0x`
    Hex,
    /// `0o`
    Octal,
    /// `0b`
    Binary,
    /// Leading `0` without a letter: legacy octal.
    LegacyOctal,
}

impl Prefix {
    fn literal(self) -> NumberLiteral {
        match self {
            Prefix::None => NumberLiteral::Decimal,
            Prefix::Hex => NumberLiteral::Hexadecimal,
            Prefix::Octal | Prefix::LegacyOctal => NumberLiteral::Octal,
            Prefix::Binary => NumberLiteral::Binary,
        }
    }
}

/// Digit-run flags: bit 0 set if a digit was seen, bit 1 if a `_` was seen.
const SEEN_DIGIT: u8 = 1;
const SEEN_SEPARATOR: u8 = 2;

/// Scanner over one source.
///
/// Repeated [`scan()`](Self::scan) calls at end of input keep returning
/// [`tag::EOF`].
pub struct TextScanner<S = TracingSink> {
    cursor: Cursor,
    config: ScanConfig,
    sink: S,
    error_count: usize,
    /// Index of the next encoding issue not yet passed by the cursor.
    next_issue: usize,
    /// Start of the most recently scanned token.
    token_start: ScanPosition,
    /// End offset of the most recently scanned token.
    token_end: usize,
}

impl TextScanner<TracingSink> {
    /// Scanner with the default configuration that logs errors through `tracing`.
    pub fn with_defaults(source: SourceBuffer) -> Self {
        Self::new(source, ScanConfig::default(), TracingSink)
    }
}

impl<S: ErrorSink> TextScanner<S> {
    pub fn new(source: SourceBuffer, config: ScanConfig, sink: S) -> Self {
        let cursor = source.into_cursor();
        let token_start = cursor.position();
        let token_end = token_start.offset;
        Self {
            cursor,
            config,
            sink,
            error_count: 0,
            next_issue: 0,
            token_start,
            token_end,
        }
    }

    pub fn config(&self) -> ScanConfig {
        self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of errors reported so far.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Start position of the most recently scanned token.
    pub fn position(&self) -> ScanPosition {
        self.token_start
    }

    /// Current cursor position (just past the most recently scanned token).
    pub fn pos(&self) -> ScanPosition {
        self.cursor.position()
    }

    /// Source text of the most recently scanned token.
    ///
    /// Empty for [`tag::EOF`]. Literals include their delimiters.
    pub fn token_text(&self) -> &str {
        self.cursor.slice(self.token_start.offset, self.token_end)
    }

    /// Scan the next token and return its type.
    pub fn scan(&mut self) -> TokenType {
        loop {
            self.skip_whitespace();
            self.token_start = self.cursor.position();
            if let Some(kind) = self.scan_token() {
                self.token_end = self.cursor.pos();
                return kind;
            }
        }
    }

    /// Scan one token starting at the cursor. `None` means a comment was skipped.
    fn scan_token(&mut self) -> Option<TokenType> {
        let mode = self.config.mode;
        let Some(ch) = self.cursor.current_char() else {
            return Some(tag::EOF);
        };

        if is_ident_start(ch) {
            if mode.contains(ScanMode::IDENTS) {
                self.scan_identifier();
                return Some(tag::IDENT);
            }
            self.bump();
            return Some(tag::from_char(ch));
        }

        if ch.is_ascii_digit() {
            if mode.intersects(ScanMode::INTS | ScanMode::FLOATS) {
                return Some(self.scan_number(false));
            }
            self.bump();
            return Some(tag::from_char(ch));
        }

        let kind = match ch {
            '"' if mode.contains(ScanMode::STRINGS) => {
                self.scan_string('"');
                tag::STRING
            }
            '\'' if mode.contains(ScanMode::CHARS) => {
                self.scan_char();
                tag::CHAR
            }
            '`' if mode.contains(ScanMode::RAW_STRINGS) => {
                self.scan_raw_string();
                tag::RAW_STRING
            }
            '.' => {
                self.bump();
                if mode.contains(ScanMode::FLOATS) && self.cursor.current().is_ascii_digit() {
                    self.scan_number(true)
                } else {
                    tag::from_char('.')
                }
            }
            '/' => {
                self.bump();
                let next = self.cursor.current();
                if (next == b'/' || next == b'*') && mode.contains(ScanMode::COMMENTS) {
                    self.scan_comment();
                    if mode.contains(ScanMode::SKIP_COMMENTS) {
                        return None;
                    }
                    tag::COMMENT
                } else {
                    tag::from_char('/')
                }
            }
            _ => {
                self.bump();
                tag::from_char(ch)
            }
        };
        Some(kind)
    }

    // ─── Character Access ──────────────────────────────────────────

    /// Consume one character, reporting NUL and invalid UTF-8 on the way.
    fn bump(&mut self) {
        if self.cursor.is_eof() {
            return;
        }
        let here = self.cursor.position();
        if self.cursor.current() == 0 {
            self.error_at(here, ScanErrorKind::NulCharacter);
        } else if self.take_issue_at(here.offset) {
            self.error_at(here, ScanErrorKind::InvalidUtf8);
        }
        self.cursor.bump();
    }

    /// Returns `true` if an invalid UTF-8 sequence starts at `offset`.
    ///
    /// Issues before `offset` are passed over; the cursor only moves forward.
    fn take_issue_at(&mut self, offset: usize) -> bool {
        let issues = self.cursor.source().encoding_issues();
        while let Some(issue) = issues.get(self.next_issue) {
            if issue.pos > offset {
                return false;
            }
            self.next_issue += 1;
            if issue.pos == offset && issue.kind == EncodingIssueKind::InvalidUtf8 {
                return true;
            }
        }
        false
    }

    /// Jump the cursor to `end`, reporting NUL and invalid UTF-8 in between.
    fn skip_to(&mut self, end: usize) {
        let start = self.cursor.position();
        let text = self.cursor.slice(start.offset, end.min(self.cursor.source().len()));

        let mut flagged: Vec<(usize, ScanErrorKind)> = memchr::memchr_iter(0, text.as_bytes())
            .map(|off| (start.offset + off, ScanErrorKind::NulCharacter))
            .collect();
        let issues = self.cursor.source().encoding_issues();
        while let Some(issue) = issues.get(self.next_issue) {
            if issue.pos >= end {
                break;
            }
            self.next_issue += 1;
            if issue.pos >= start.offset && issue.kind == EncodingIssueKind::InvalidUtf8 {
                flagged.push((issue.pos, ScanErrorKind::InvalidUtf8));
            }
        }
        flagged.sort_by_key(|(offset, _)| *offset);

        for (offset, kind) in flagged {
            let pos = self.cursor.locate(start, offset);
            self.error_at(pos, kind);
        }
        self.cursor.advance_to(end);
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.cursor.current_char() {
            if !self.config.is_whitespace(ch) {
                break;
            }
            self.bump();
        }
    }

    // ─── Errors ────────────────────────────────────────────────────

    fn error_at(&mut self, pos: ScanPosition, kind: ScanErrorKind) {
        self.error_count += 1;
        self.sink.report(ScanError { pos, kind });
    }

    fn error_here(&mut self, kind: ScanErrorKind) {
        let pos = self.cursor.position();
        self.error_at(pos, kind);
    }

    // ─── Identifiers ───────────────────────────────────────────────

    fn scan_identifier(&mut self) {
        self.bump(); // first char (already validated)
        while let Some(ch) = self.cursor.current_char() {
            if !is_ident_continue(ch) {
                break;
            }
            self.bump();
        }
    }

    // ─── Numeric Literals ──────────────────────────────────────────

    /// Scan a number. With `seen_dot` the leading `.` is already consumed.
    fn scan_number(&mut self, seen_dot: bool) -> TokenType {
        let start = self.token_start;
        let floats = self.config.mode.contains(ScanMode::FLOATS);
        let mut seen_dot = seen_dot;
        let mut radix_point = start;
        let mut base = 10;
        let mut prefix = Prefix::None;
        let mut digsep = 0;
        let mut invalid = None;
        let mut kind = tag::INT;

        if !seen_dot {
            if self.cursor.current() == b'0' {
                self.bump();
                match self.cursor.current().to_ascii_lowercase() {
                    b'x' => {
                        self.bump();
                        base = 16;
                        prefix = Prefix::Hex;
                    }
                    b'o' => {
                        self.bump();
                        base = 8;
                        prefix = Prefix::Octal;
                    }
                    b'b' => {
                        self.bump();
                        base = 2;
                        prefix = Prefix::Binary;
                    }
                    _ => {
                        // The leading 0 counts as a digit.
                        base = 8;
                        prefix = Prefix::LegacyOctal;
                        digsep = SEEN_DIGIT;
                    }
                }
            }
            digsep |= self.digits(base, &mut invalid);
            if self.cursor.current() == b'.' && floats {
                radix_point = self.cursor.position();
                self.bump();
                seen_dot = true;
            }
        }

        if seen_dot {
            kind = tag::FLOAT;
            if matches!(prefix, Prefix::Octal | Prefix::Binary) {
                self.error_at(
                    radix_point,
                    ScanErrorKind::InvalidRadixPoint {
                        literal: prefix.literal(),
                    },
                );
            }
            digsep |= self.digits(base, &mut invalid);
        }

        if digsep & SEEN_DIGIT == 0 {
            self.error_here(ScanErrorKind::NoDigits {
                literal: prefix.literal(),
            });
        }

        let exponent = self.cursor.current().to_ascii_lowercase();
        if (exponent == b'e' || exponent == b'p') && floats {
            let exponent_char = char::from(self.cursor.current());
            if exponent == b'e' && !matches!(prefix, Prefix::None | Prefix::LegacyOctal) {
                self.error_here(ScanErrorKind::ExponentRequiresDecimalMantissa {
                    exponent: exponent_char,
                });
            } else if exponent == b'p' && prefix != Prefix::Hex {
                self.error_here(ScanErrorKind::ExponentRequiresHexMantissa {
                    exponent: exponent_char,
                });
            }
            self.bump();
            kind = tag::FLOAT;
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.bump();
            }
            let mut ignored = None;
            let exponent_digits = self.digits(10, &mut ignored);
            digsep |= exponent_digits;
            if exponent_digits & SEEN_DIGIT == 0 {
                self.error_here(ScanErrorKind::ExponentNoDigits);
            }
        } else if prefix == Prefix::Hex && kind == tag::FLOAT {
            self.error_here(ScanErrorKind::HexMantissaRequiresExponent);
        }

        if kind == tag::INT {
            if let Some((digit, pos)) = invalid {
                self.error_at(
                    pos,
                    ScanErrorKind::InvalidDigit {
                        digit,
                        literal: prefix.literal(),
                    },
                );
            }
        }

        if digsep & SEEN_SEPARATOR != 0 {
            if let Some(index) = invalid_separator(self.cursor.slice_from(start.offset)) {
                // Number text is ASCII: byte index == column delta.
                let pos = ScanPosition::new(
                    start.offset + index,
                    start.line,
                    start.column + index,
                );
                self.error_at(pos, ScanErrorKind::InvalidSeparator);
            }
        }

        kind
    }

    /// Consume a run of digits and `_` separators for `base`.
    ///
    /// For bases up to 10 every decimal digit is consumed; the first one that
    /// is out of range is recorded in `invalid`.
    fn digits(&mut self, base: u8, invalid: &mut Option<(char, ScanPosition)>) -> u8 {
        let mut digsep = 0;
        loop {
            let byte = self.cursor.current();
            let accepted = if base <= 10 {
                byte.is_ascii_digit() || byte == b'_'
            } else {
                byte.is_ascii_hexdigit() || byte == b'_'
            };
            if !accepted {
                break;
            }
            if byte == b'_' {
                digsep |= SEEN_SEPARATOR;
            } else {
                if base <= 10 && byte >= b'0' + base && invalid.is_none() {
                    *invalid = Some((char::from(byte), self.cursor.position()));
                }
                digsep |= SEEN_DIGIT;
            }
            self.bump();
        }
        digsep
    }

    // ─── String & Char Literals ────────────────────────────────────

    /// Scan a literal delimited by `quote`, returning the number of
    /// characters (escapes count as one) between the quotes.
    fn scan_string(&mut self, quote: char) -> usize {
        self.bump(); // opening quote
        let mut count = 0;
        loop {
            match self.cursor.current_char() {
                Some(ch) if ch == quote => {
                    self.bump();
                    return count;
                }
                None | Some('\n') => {
                    self.error_here(ScanErrorKind::LiteralNotTerminated);
                    return count;
                }
                Some('\\') => {
                    self.bump();
                    self.scan_escape(quote);
                }
                Some(_) => {
                    self.bump();
                }
            }
            count += 1;
        }
    }

    fn scan_escape(&mut self, quote: char) {
        match self.cursor.current_char() {
            Some(ch) if ch == quote => {
                self.bump();
            }
            Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\') => {
                self.bump();
            }
            Some('0'..='7') => self.escape_digits(8, 3),
            Some('x') => {
                self.bump();
                self.escape_digits(16, 2);
            }
            Some('u') => {
                self.bump();
                self.escape_digits(16, 4);
            }
            Some('U') => {
                self.bump();
                self.escape_digits(16, 8);
            }
            _ => self.error_here(ScanErrorKind::InvalidCharEscape),
        }
    }

    fn escape_digits(&mut self, radix: u32, count: usize) {
        let mut remaining = count;
        while remaining > 0
            && self
                .cursor
                .current_char()
                .is_some_and(|ch| ch.is_digit(radix))
        {
            self.bump();
            remaining -= 1;
        }
        if remaining > 0 {
            self.error_here(ScanErrorKind::InvalidCharEscape);
        }
    }

    fn scan_char(&mut self) {
        let start = self.token_start;
        if self.scan_string('\'') != 1 {
            self.error_at(start, ScanErrorKind::IllegalCharLiteral);
        }
    }

    fn scan_raw_string(&mut self) {
        self.bump(); // opening backtick
        if let Some(close) = self.cursor.find_byte(b'`') {
            self.skip_to(close + 1);
        } else {
            let end = self.cursor.source().len();
            self.skip_to(end);
            self.error_here(ScanErrorKind::LiteralNotTerminated);
        }
    }

    // ─── Comments ──────────────────────────────────────────────────

    /// Scan a comment body. The leading `/` is consumed; the cursor is on the
    /// second `/` or the `*`.
    fn scan_comment(&mut self) {
        if self.cursor.current() == b'/' {
            // Line comment: up to, not including, the newline.
            let end = self
                .cursor
                .find_byte(b'\n')
                .unwrap_or(self.cursor.source().len());
            self.skip_to(end);
            return;
        }
        self.bump(); // '*'
        if let Some(close) = self.cursor.find_str("*/") {
            self.skip_to(close + 2);
        } else {
            let end = self.cursor.source().len();
            self.skip_to(end);
            self.error_here(ScanErrorKind::CommentNotTerminated);
        }
    }
}

#[inline]
fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

#[inline]
fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic() || is_decimal_digit(ch)
}

/// First code point (the zero) of every Unicode 15.0 decimal digit run (`Nd`).
///
/// Each run is exactly ten consecutive code points, `0` through `9`.
const DECIMAL_DIGIT_ZEROS: [u32; 68] = [
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Decimal digit in any script. Superscripts, fractions and other numeric
/// characters that are not `Nd` do not count.
fn is_decimal_digit(ch: char) -> bool {
    if ch.is_ascii_digit() {
        return true;
    }
    if ch.is_ascii() {
        return false;
    }
    let code = u32::from(ch);
    let run = DECIMAL_DIGIT_ZEROS.partition_point(|&zero| zero <= code);
    run > 0 && code - DECIMAL_DIGIT_ZEROS[run - 1] < 10
}

/// Index of the first misplaced `_` in a number's text, if any.
///
/// A `_` must sit between two digits, or between a base prefix and a digit.
fn invalid_separator(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    // `x1` is the prefix letter; only hex changes which letters are digits.
    let mut x1 = b' ';
    // Previous class: `_`, `0` (a digit) or `.` (anything else).
    let mut class = b'.';
    let mut i = 0;

    // A prefix counts as a digit.
    if bytes.len() >= 2 && bytes[0] == b'0' {
        x1 = bytes[1].to_ascii_lowercase();
        if matches!(x1, b'x' | b'o' | b'b') {
            class = b'0';
            i = 2;
        }
    }

    while i < bytes.len() {
        let prev = class;
        let byte = bytes[i];
        if byte == b'_' {
            if prev != b'0' {
                return Some(i);
            }
            class = b'_';
        } else if byte.is_ascii_digit() || (x1 == b'x' && byte.is_ascii_hexdigit()) {
            class = b'0';
        } else {
            if prev == b'_' {
                return Some(i - 1);
            }
            class = b'.';
        }
        i += 1;
    }
    if class == b'_' {
        return Some(bytes.len() - 1);
    }
    None
}
