//! The default lexer, built on [`TextScanner`].
//!
//! Adds to the raw scanner:
//! - one token of lookahead,
//! - source names in positions,
//! - literal normalization: quoted literals are unescaped and raw strings
//!   lose their backticks, so token values are what the literal denotes.
//!
//! # Single-quoted literals
//!
//! `'...'` literals may hold any number of characters. The scanner reports
//! more than one character as [`ScanErrorKind::IllegalCharLiteral`]; that
//! report is tolerated, every other scan error is fatal. After unescaping, a
//! single-quoted literal with more than one character becomes a
//! [`tag::STRING`] token.

use std::sync::Arc;

use lexkit_core::{
    tag, ErrorSink, ScanConfig, ScanError, ScanErrorKind, ScanPosition, SourceBuffer, TextScanner,
    TokenType,
};
use tracing::{debug, trace};

use crate::definition::Lexer;
use crate::lex_error::LexError;
use crate::reader::SourceReader;
use crate::token::{Position, Token};
use crate::unquote::{unquote, UnquoteError};

/// Error sink that keeps the first fatal scan error.
#[derive(Debug, Default)]
struct FatalSink {
    first: Option<ScanError>,
}

impl ErrorSink for FatalSink {
    fn report(&mut self, error: ScanError) {
        if error.kind == ScanErrorKind::IllegalCharLiteral {
            debug!(
                offset = error.pos.offset,
                line = error.pos.line,
                column = error.pos.column,
                "accepting multi-character single-quoted literal"
            );
            return;
        }
        if self.first.is_none() {
            self.first = Some(error);
        }
    }
}

/// Lexer over one source, backed by a [`TextScanner`].
pub struct TextScannerLexer {
    scanner: TextScanner<FatalSink>,
    /// Lookahead slot filled by `peek`.
    peek: Option<Token>,
    filename: Arc<str>,
    /// Set on the first error; returned by every later call.
    failed: Option<LexError>,
}

impl TextScannerLexer {
    /// Lex `source` with the default scan configuration.
    ///
    /// `filename` may be empty.
    pub fn new(source: SourceBuffer, filename: impl Into<Arc<str>>) -> Self {
        Self::with_config(source, filename, ScanConfig::default())
    }

    /// Lex `source` with a custom scan mode and whitespace set.
    pub fn with_config(
        source: SourceBuffer,
        filename: impl Into<Arc<str>>,
        config: ScanConfig,
    ) -> Self {
        let filename = filename.into();
        debug!(
            filename = %filename,
            len = source.len(),
            mode = ?config.mode,
            "creating text scanner lexer"
        );
        TextScannerLexer {
            scanner: TextScanner::new(source, config, FatalSink::default()),
            peek: None,
            filename,
            failed: None,
        }
    }

    /// Read `reader` to the end and lex it, naming positions after the reader.
    pub fn from_reader(reader: &mut dyn SourceReader) -> Result<Self, LexError> {
        let filename: Arc<str> = Arc::from(reader.source_name().unwrap_or_default());
        let mut bytes = Vec::new();
        if let Err(error) = reader.read_to_end(&mut bytes) {
            let pos = Position::new(Arc::clone(&filename), 0, 1, 1);
            return Err(LexError::read(pos, &error));
        }
        Ok(Self::new(SourceBuffer::from_bytes(&bytes), filename))
    }

    /// Source name used in positions (empty when unnamed).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    fn position(&self, pos: ScanPosition) -> Position {
        Position::from_scan(&self.filename, pos)
    }

    /// Scan and normalise one token.
    fn scan_token(&mut self) -> Result<Token, LexError> {
        if let Some(error) = &self.failed {
            return Err(error.clone());
        }

        let kind = self.scanner.scan();
        let pos = self.position(self.scanner.position());

        if let Some(error) = self.scanner.sink_mut().first.take() {
            let error = LexError::new(self.position(error.pos), error.kind);
            return Err(self.fail(error));
        }

        let (kind, value) = match cook_literal(kind, self.scanner.token_text()) {
            Ok(cooked) => cooked,
            Err(error) => return Err(self.fail(LexError::new(pos, error))),
        };

        trace!(
            kind = %tag::describe(kind),
            value = %value,
            offset = pos.offset,
            "token"
        );
        Ok(Token { kind, value, pos })
    }

    fn fail(&mut self, error: LexError) -> LexError {
        self.failed = Some(error.clone());
        error
    }
}

impl Lexer for TextScannerLexer {
    fn peek(&mut self) -> Result<&Token, LexError> {
        let token = match self.peek.take() {
            Some(token) => token,
            None => self.scan_token()?,
        };
        Ok(self.peek.insert(token))
    }

    fn next(&mut self) -> Result<Token, LexError> {
        match self.peek.take() {
            Some(token) => Ok(token),
            None => self.scan_token(),
        }
    }
}

/// Turn a raw literal into its value, reclassifying multi-character
/// single-quoted literals as strings.
fn cook_literal(kind: TokenType, raw: &str) -> Result<(TokenType, String), UnquoteError> {
    match kind {
        tag::CHAR => {
            let value = unquote(&format!("\"{}\"", strip_delimiters(raw)))?;
            if value.chars().count() > 1 {
                Ok((tag::STRING, value))
            } else {
                Ok((tag::CHAR, value))
            }
        }
        tag::STRING => Ok((kind, unquote(raw)?)),
        tag::RAW_STRING => Ok((kind, strip_delimiters(raw).to_owned())),
        _ => Ok((kind, raw.to_owned())),
    }
}

/// Drop the first and last character.
fn strip_delimiters(raw: &str) -> &str {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests;
