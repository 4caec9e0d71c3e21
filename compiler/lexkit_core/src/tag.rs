//! Token categories as pseudo-runes.
//!
//! The scanner classifies every token with an `i32`. Negative values are
//! symbolic categories; non-negative values are literal single characters
//! whose value is the character's code point.

use std::borrow::Cow;

/// Token classification: a category constant or a character code point.
pub type TokenType = i32;

/// End of input.
pub const EOF: TokenType = -1;
/// Identifier: a letter or `_` followed by letters, digits and `_`.
pub const IDENT: TokenType = -2;
/// Integer literal.
pub const INT: TokenType = -3;
/// Floating-point literal.
pub const FLOAT: TokenType = -4;
/// Single-quoted literal.
pub const CHAR: TokenType = -5;
/// Double-quoted string literal.
pub const STRING: TokenType = -6;
/// Backtick-delimited raw string literal.
pub const RAW_STRING: TokenType = -7;
/// Line or block comment (only produced when comments are not skipped).
pub const COMMENT: TokenType = -8;

/// Every symbolic category with its display name, in declaration order.
pub const CATEGORIES: [(TokenType, &str); 8] = [
    (EOF, "EOF"),
    (IDENT, "Ident"),
    (INT, "Int"),
    (FLOAT, "Float"),
    (CHAR, "Char"),
    (STRING, "String"),
    (RAW_STRING, "RawString"),
    (COMMENT, "Comment"),
];

/// Token type of a literal character token.
#[inline]
pub const fn from_char(ch: char) -> TokenType {
    ch as TokenType
}

/// Name of a symbolic category, or `None` for character tokens and unknown values.
pub fn category_name(kind: TokenType) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(tag, _)| *tag == kind)
        .map(|(_, name)| *name)
}

/// Printable description of a token type.
///
/// Categories render as their name (`Ident`), characters as a quoted string
/// (`"+"`).
pub fn describe(kind: TokenType) -> Cow<'static, str> {
    if let Some(name) = category_name(kind) {
        return Cow::Borrowed(name);
    }
    match u32::try_from(kind).ok().and_then(char::from_u32) {
        Some(ch) => Cow::Owned(format!("{:?}", ch.to_string())),
        None => Cow::Owned(format!("<{kind}>")),
    }
}
