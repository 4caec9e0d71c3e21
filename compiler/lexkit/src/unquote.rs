//! Double-quoted literal unescaping.
//!
//! Accepted escapes: `\a \b \f \n \r \t \v \\ \"`, `\xHH`, `\NNN` (octal,
//! at most 255), `\uHHHH` and `\UHHHHHHHH`. Byte escapes (`\x`, octal) may
//! combine into multi-byte characters; the finished value must be UTF-8.

use std::str::Chars;

/// Why a literal could not be unquoted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum UnquoteError {
    #[error("literal is not enclosed in double quotes")]
    NotQuoted,
    #[error("newline in string literal")]
    Newline,
    #[error("unescaped '\"' in string literal")]
    UnescapedQuote,
    #[error("unknown escape sequence \\{escape}")]
    UnknownEscape { escape: char },
    /// `\x`, `\u`, `\U` or octal escape with too few digits.
    #[error("escape sequence \\{escape} is incomplete")]
    IncompleteEscape { escape: char },
    #[error("octal escape value {value} > 255")]
    OctalOutOfRange { value: u32 },
    #[error("escape sequence is an invalid Unicode code point {value:#x}")]
    InvalidCodePoint { value: u32 },
    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,
}

/// Unescape a double-quoted literal, quotes included.
pub fn unquote(literal: &str) -> Result<String, UnquoteError> {
    let body = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(UnquoteError::NotQuoted)?;
    if body.contains('\n') {
        return Err(UnquoteError::Newline);
    }

    // Fast path: nothing to unescape.
    if !body.contains('\\') {
        if body.contains('"') {
            return Err(UnquoteError::UnescapedQuote);
        }
        return Ok(body.to_owned());
    }

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => return Err(UnquoteError::UnescapedQuote),
            '\\' => unescape(&mut chars, &mut out)?,
            _ => push_char(&mut out, ch),
        }
    }
    String::from_utf8(out).map_err(|_| UnquoteError::InvalidUtf8)
}

/// Decode one escape; the backslash is already consumed.
fn unescape(chars: &mut Chars<'_>, out: &mut Vec<u8>) -> Result<(), UnquoteError> {
    let Some(escape) = chars.next() else {
        return Err(UnquoteError::IncompleteEscape { escape: '\\' });
    };
    match escape {
        'a' => out.push(0x07),
        'b' => out.push(0x08),
        'f' => out.push(0x0C),
        'n' => out.push(b'\n'),
        'r' => out.push(b'\r'),
        't' => out.push(b'\t'),
        'v' => out.push(0x0B),
        '\\' => out.push(b'\\'),
        '"' => out.push(b'"'),
        '0'..='7' => {
            let mut value = escape.to_digit(8).unwrap_or_default();
            for _ in 0..2 {
                let digit = chars
                    .next()
                    .and_then(|c| c.to_digit(8))
                    .ok_or(UnquoteError::IncompleteEscape { escape })?;
                value = value * 8 + digit;
            }
            let byte = u8::try_from(value).map_err(|_| UnquoteError::OctalOutOfRange { value })?;
            out.push(byte);
        }
        'x' => {
            let value = hex_digits(chars, escape, 2)?;
            // Two hex digits always fit in a byte.
            out.push(u8::try_from(value).map_err(|_| UnquoteError::IncompleteEscape { escape })?);
        }
        'u' | 'U' => {
            let width = if escape == 'u' { 4 } else { 8 };
            let value = hex_digits(chars, escape, width)?;
            let ch = char::from_u32(value).ok_or(UnquoteError::InvalidCodePoint { value })?;
            push_char(out, ch);
        }
        other => return Err(UnquoteError::UnknownEscape { escape: other }),
    }
    Ok(())
}

fn hex_digits(chars: &mut Chars<'_>, escape: char, count: usize) -> Result<u32, UnquoteError> {
    let mut value = 0;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or(UnquoteError::IncompleteEscape { escape })?;
        value = value * 16 + digit;
    }
    Ok(value)
}

#[inline]
fn push_char(out: &mut Vec<u8>, ch: char) {
    let mut buf = [0; 4];
    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}
