//! Positions and tokens shared by every lexer implementation.

use std::fmt;
use std::sync::{Arc, OnceLock};

use lexkit_core::{tag, ScanPosition, TokenType};

/// End of input.
pub const EOF: TokenType = tag::EOF;

/// Display name used when a source has no name.
const UNNAMED_SOURCE: &str = "<source>";

/// Location of a token in its source.
///
/// The filename is shared, so cloning a position never copies the name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Source name; empty when the source was not named.
    pub filename: Arc<str>,
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl Position {
    pub fn new(filename: impl Into<Arc<str>>, offset: usize, line: usize, column: usize) -> Self {
        Position {
            filename: filename.into(),
            offset,
            line,
            column,
        }
    }

    /// Tag a scanner position with a source name.
    pub fn from_scan(filename: &Arc<str>, pos: ScanPosition) -> Self {
        Position {
            filename: Arc::clone(filename),
            offset: pos.offset,
            line: pos.line,
            column: pos.column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.filename.is_empty() {
            UNNAMED_SOURCE
        } else {
            &*self.filename
        };
        write!(f, "{name}:{}:{}", self.line, self.column)
    }
}

/// A classified, positioned fragment of source text.
///
/// `kind` is a pseudo-rune: negative values are categories from
/// [`lexkit_core::tag`], non-negative values are single-character tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenType,
    /// Token text. Quoted literals are already unescaped.
    pub value: String,
    pub pos: Position,
}

static EOF_TOKEN: OnceLock<Token> = OnceLock::new();

impl Token {
    pub fn new(kind: TokenType, value: impl Into<String>, pos: Position) -> Self {
        Token {
            kind,
            value: value.into(),
            pos,
        }
    }

    /// Single-character token: kind is `ch`'s code point, value is `ch`.
    pub fn rune(ch: char) -> Self {
        Token {
            kind: tag::from_char(ch),
            value: ch.to_string(),
            pos: Position::default(),
        }
    }

    /// Shared end-of-input token with value `<<EOF>>`.
    pub fn eof() -> &'static Token {
        EOF_TOKEN.get_or_init(|| Token {
            kind: EOF,
            value: "<<EOF>>".to_owned(),
            pos: Position::default(),
        })
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == EOF
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
