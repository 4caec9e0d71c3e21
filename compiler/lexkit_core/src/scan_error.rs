//! Scan errors and the sink they are reported to.
//!
//! The scanner never stops on malformed input. It reports a [`ScanError`] to
//! its [`ErrorSink`] and keeps producing tokens; what counts as fatal is the
//! sink owner's decision.

use std::fmt;

use tracing::warn;

use crate::ScanPosition;

/// Kind of numeric literal, for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberLiteral {
    Decimal,
    Hexadecimal,
    Octal,
    Binary,
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NumberLiteral::Decimal => "decimal literal",
            NumberLiteral::Hexadecimal => "hexadecimal literal",
            NumberLiteral::Octal => "octal literal",
            NumberLiteral::Binary => "binary literal",
        })
    }
}

/// What went wrong while scanning.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ScanErrorKind {
    /// String, char or raw string literal hit a newline or EOF.
    #[error("literal not terminated")]
    LiteralNotTerminated,
    /// `/* ...` without a closing `*/`.
    #[error("comment not terminated")]
    CommentNotTerminated,
    /// Unknown escape, or too few digits in a numeric escape.
    #[error("invalid char escape")]
    InvalidCharEscape,
    /// Single-quoted literal that does not hold exactly one character.
    #[error("illegal char literal")]
    IllegalCharLiteral,
    #[error("invalid digit {digit:?} in {literal}")]
    InvalidDigit { digit: char, literal: NumberLiteral },
    #[error("{literal} has no digits")]
    NoDigits { literal: NumberLiteral },
    #[error("exponent has no digits")]
    ExponentNoDigits,
    #[error("invalid radix point in {literal}")]
    InvalidRadixPoint { literal: NumberLiteral },
    #[error("{exponent:?} exponent requires decimal mantissa")]
    ExponentRequiresDecimalMantissa { exponent: char },
    #[error("{exponent:?} exponent requires hexadecimal mantissa")]
    ExponentRequiresHexMantissa { exponent: char },
    #[error("hexadecimal mantissa requires a 'p' exponent")]
    HexMantissaRequiresExponent,
    #[error("'_' must separate successive digits")]
    InvalidSeparator,
    #[error("invalid character NUL")]
    NulCharacter,
    #[error("invalid UTF-8 encoding")]
    InvalidUtf8,
}

/// A scan error at a source position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{pos}: {kind}")]
pub struct ScanError {
    /// Location of the offending character.
    pub pos: ScanPosition,
    pub kind: ScanErrorKind,
}

/// Receiver for scan errors, installed when the scanner is created.
pub trait ErrorSink {
    fn report(&mut self, error: ScanError);
}

/// Collects every error.
impl ErrorSink for Vec<ScanError> {
    fn report(&mut self, error: ScanError) {
        self.push(error);
    }
}

impl<S: ErrorSink + ?Sized> ErrorSink for &mut S {
    fn report(&mut self, error: ScanError) {
        (**self).report(error);
    }
}

/// Default sink: logs each error as a `tracing` warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&mut self, error: ScanError) {
        warn!(
            offset = error.pos.offset,
            line = error.pos.line,
            column = error.pos.column,
            "{}",
            error.kind
        );
    }
}
