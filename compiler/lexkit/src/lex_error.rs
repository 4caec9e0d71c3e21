//! Lexer error type.
//!
//! Every failure carries the position it happened at and what went wrong.
//! Errors are fatal for the lexer that produced them: there is no recovery
//! or resynchronisation, and a failed lexer keeps returning the same error.

use lexkit_core::ScanErrorKind;

use crate::token::Position;
use crate::unquote::UnquoteError;

/// A fatal lexing error.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{pos}: {kind}")]
pub struct LexError {
    /// WHERE the error occurred.
    pub pos: Position,
    /// WHAT went wrong.
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// Malformed input reported by the scanner.
    #[error(transparent)]
    Scan(#[from] ScanErrorKind),
    /// A quoted literal whose escapes could not be decoded.
    #[error(transparent)]
    Unquote(#[from] UnquoteError),
    /// The source could not be read.
    #[error("read failed: {message}")]
    Read { message: String },
}

impl LexError {
    pub fn new(pos: Position, kind: impl Into<LexErrorKind>) -> Self {
        LexError {
            pos,
            kind: kind.into(),
        }
    }

    /// Error for a source that could not be read.
    pub fn read(pos: Position, error: &std::io::Error) -> Self {
        LexError {
            pos,
            kind: LexErrorKind::Read {
                message: error.to_string(),
            },
        }
    }

    /// Human-readable description, without the position.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
