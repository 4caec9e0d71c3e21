use std::io::{self, Cursor, Read};

use lexkit_core::ScanMode;
use pretty_assertions::assert_eq;

use super::*;
use crate::lex_error::LexErrorKind;
use crate::reader::NamedReader;
use crate::{consume_all, lex_bytes, lex_str};

/// Helper: lex `source` and return `(kind, value)` for every token before EOF.
fn lex_values(source: &str) -> Vec<(TokenType, String)> {
    let mut lexer = lex_str(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next().unwrap();
        if token.is_eof() {
            return tokens;
        }
        tokens.push((token.kind, token.value));
    }
}

/// Helper: lex until the first error.
fn first_error(source: &str) -> LexError {
    let mut lexer = lex_str(source);
    loop {
        match lexer.next() {
            Ok(token) if token.is_eof() => panic!("no error lexing {source:?}"),
            Ok(_) => {}
            Err(error) => return error,
        }
    }
}

fn val(kind: TokenType, value: &str) -> (TokenType, String) {
    (kind, value.to_owned())
}

// === Lookahead ===

#[test]
fn peek_is_idempotent() {
    let mut lexer = lex_str("a b");
    let first = lexer.peek().unwrap().clone();
    let second = lexer.peek().unwrap().clone();
    assert_eq!(first, second);
    assert_eq!(first.value, "a");
}

#[test]
fn next_returns_peeked_token() {
    let mut lexer = lex_str("a b c");
    let peeked = lexer.peek().unwrap().clone();
    assert_eq!(lexer.next().unwrap(), peeked);
    assert_eq!(lexer.peek().unwrap().value, "b");
    assert_eq!(lexer.next().unwrap().value, "b");
    assert_eq!(lexer.next().unwrap().value, "c");
}

#[test]
fn eof_repeats_forever() {
    let mut lexer = lex_str("x");
    assert_eq!(lexer.next().unwrap().value, "x");
    for _ in 0..3 {
        assert!(lexer.peek().unwrap().is_eof());
        let token = lexer.next().unwrap();
        assert!(token.is_eof());
        assert_eq!(token.kind, tag::EOF);
    }
}

#[test]
fn empty_source_is_eof() {
    let mut lexer = lex_str("");
    assert!(lexer.next().unwrap().is_eof());
}

// === Literal Normalization ===

#[test]
fn string_is_unescaped() {
    assert_eq!(lex_values(r#""a\nb""#), vec![val(tag::STRING, "a\nb")]);
}

#[test]
fn single_char_literal_stays_char() {
    assert_eq!(lex_values("'x'"), vec![val(tag::CHAR, "x")]);
    assert_eq!(lex_values(r"'\t'"), vec![val(tag::CHAR, "\t")]);
    assert_eq!(lex_values("'é'"), vec![val(tag::CHAR, "é")]);
}

#[test]
fn multi_char_literal_becomes_string() {
    assert_eq!(lex_values("'xy'"), vec![val(tag::STRING, "xy")]);
    assert_eq!(
        lex_values(r"'hello world'"),
        vec![val(tag::STRING, "hello world")]
    );
}

#[test]
fn empty_char_literal_is_empty_char() {
    assert_eq!(lex_values("''"), vec![val(tag::CHAR, "")]);
}

#[test]
fn raw_string_keeps_backslashes() {
    let tokens = lex_values(r"`a\nb`");
    assert_eq!(tokens, vec![val(tag::RAW_STRING, r"a\nb")]);
    assert_eq!(tokens[0].1.len(), 4);
}

#[test]
fn other_tokens_pass_through() {
    assert_eq!(
        lex_values("foo 0x1F 1.5e3 +"),
        vec![
            val(tag::IDENT, "foo"),
            val(tag::INT, "0x1F"),
            val(tag::FLOAT, "1.5e3"),
            val(tag::from_char('+'), "+"),
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        lex_values("a // note\n/* block */ b"),
        vec![val(tag::IDENT, "a"), val(tag::IDENT, "b")]
    );
}

// === Positions ===

#[test]
fn unnamed_positions_render_placeholder() {
    let mut lexer = lex_str("a\n  b");
    assert_eq!(lexer.next().unwrap().pos.to_string(), "<source>:1:1");
    let second = lexer.next().unwrap();
    assert_eq!(second.pos.to_string(), "<source>:2:3");
    assert_eq!(second.pos.offset, 4);
}

#[test]
fn named_reader_names_every_position() {
    let mut reader = NamedReader::new("query.txt", Cursor::new("a b\nc"));
    let mut lexer = TextScannerLexer::from_reader(&mut reader).unwrap();
    assert_eq!(lexer.filename(), "query.txt");
    let tokens = consume_all(&mut lexer).unwrap();
    let rendered: Vec<String> = tokens.iter().map(|t| t.pos.to_string()).collect();
    assert_eq!(
        rendered,
        vec!["query.txt:1:1", "query.txt:1:3", "query.txt:2:1", "query.txt:2:2"]
    );
}

#[test]
fn unnamed_reader_leaves_filename_empty() {
    let mut reader: &[u8] = b"a";
    let mut lexer = TextScannerLexer::from_reader(&mut reader).unwrap();
    assert_eq!(lexer.filename(), "");
    assert!(lexer.next().unwrap().pos.filename.is_empty());
}

// === Errors ===

#[test]
fn unterminated_string_reports_offending_position() {
    let error = first_error("x \"abc");
    assert_eq!(error.kind, LexErrorKind::Scan(ScanErrorKind::LiteralNotTerminated));
    assert_eq!((error.pos.offset, error.pos.line, error.pos.column), (6, 1, 7));
    assert_eq!(error.to_string(), "<source>:1:7: literal not terminated");
}

#[test]
fn unterminated_string_at_newline() {
    let error = first_error("\"ab\ncd\"");
    assert_eq!((error.pos.line, error.pos.column), (1, 4));
}

#[test]
fn unquote_failure_is_reported_at_token() {
    // The scanner accepts `\'` in single quotes; the double-quote rewrite does not.
    let error = first_error(r"a '\''");
    assert_eq!(
        error.kind,
        LexErrorKind::Unquote(UnquoteError::UnknownEscape { escape: '\'' })
    );
    assert_eq!(error.pos.column, 3);
}

#[test]
fn invalid_escape_in_string() {
    let error = first_error(r#""\q""#);
    assert_eq!(error.kind, LexErrorKind::Scan(ScanErrorKind::InvalidCharEscape));
    assert_eq!(error.pos.column, 3);
}

#[test]
fn invalid_byte_escape_is_not_utf8() {
    let error = first_error(r#""\xff""#);
    assert_eq!(error.kind, LexErrorKind::Unquote(UnquoteError::InvalidUtf8));
    assert_eq!(error.message(), "string literal is not valid UTF-8");
}

#[test]
fn invalid_utf8_bytes() {
    let mut lexer = lex_bytes(b"ok \xff");
    assert_eq!(lexer.next().unwrap().value, "ok");
    let error = lexer.next().unwrap_err();
    assert_eq!(error.kind, LexErrorKind::Scan(ScanErrorKind::InvalidUtf8));
    assert_eq!(error.pos.offset, 3);
}

#[test]
fn peek_surfaces_errors_too() {
    let mut lexer = lex_str("0x");
    assert!(lexer.peek().is_err());
}

#[test]
fn failed_lexer_keeps_failing() {
    let mut lexer = lex_str("\"open\nnext");
    let first = lexer.next().unwrap_err();
    assert_eq!(lexer.peek().unwrap_err(), first);
    assert_eq!(lexer.next().unwrap_err(), first);
}

#[test]
fn read_failure_is_a_lex_error() {
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    let mut reader = NamedReader::new("broken", Broken);
    let Err(error) = TextScannerLexer::from_reader(&mut reader) else {
        panic!("expected a read error");
    };
    assert_eq!(
        error.kind,
        LexErrorKind::Read {
            message: "disk on fire".to_owned()
        }
    );
    assert_eq!(error.to_string(), "broken:1:1: read failed: disk on fire");
}

// === Configuration ===

#[test]
fn comments_can_be_kept() {
    let config = ScanConfig::default()
        .with_mode(ScanMode::GO_TOKENS.difference(ScanMode::SKIP_COMMENTS));
    let mut lexer = TextScannerLexer::with_config(SourceBuffer::new("a // hi"), "", config);
    let tokens = consume_all(&mut lexer).unwrap();
    assert_eq!(tokens[1].kind, tag::COMMENT);
    assert_eq!(tokens[1].value, "// hi");
}

#[test]
fn disabled_strings_are_characters() {
    let config = ScanConfig::default().with_mode(ScanMode::IDENTS);
    let mut lexer = TextScannerLexer::with_config(SourceBuffer::new("'a'"), "", config);
    let kinds: Vec<TokenType> = consume_all(&mut lexer)
        .unwrap()
        .iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![tag::from_char('\''), tag::IDENT, tag::from_char('\''), tag::EOF]
    );
}

// === Normalization helpers ===

#[test]
fn strip_delimiters_removes_one_char_each_side() {
    assert_eq!(strip_delimiters("`ab`"), "ab");
    assert_eq!(strip_delimiters("``"), "");
    assert_eq!(strip_delimiters("'é'"), "é");
}

// === Property Tests ===

mod proptest_lookahead {
    use super::*;
    use proptest::prelude::*;

    fn word() -> impl Strategy<Value = String> {
        prop_oneof!["[a-zA-Z_][a-zA-Z0-9_]{0,8}", "[1-9][0-9]{0,6}"]
    }

    /// A lexer operation: `true` peeks, `false` consumes.
    fn ops() -> impl Strategy<Value = Vec<bool>> {
        proptest::collection::vec(any::<bool>(), 0..64)
    }

    proptest! {
        #[test]
        fn tokens_follow_source_order(
            words in proptest::collection::vec(word(), 0..24),
            sep in prop_oneof![Just(" "), Just("\n"), Just("\t\t"), Just(" \r\n ")],
        ) {
            let source = words.join(sep);
            let mut lexer = lex_str(&source);
            let tokens = consume_all(&mut lexer).unwrap();
            prop_assert_eq!(tokens.len(), words.len() + 1);
            let values: Vec<&str> = tokens[..words.len()]
                .iter()
                .map(|t| t.value.as_str())
                .collect();
            let expected: Vec<&str> = words.iter().map(String::as_str).collect();
            prop_assert_eq!(values, expected);
            for pair in tokens.windows(2) {
                prop_assert!(pair[0].pos.offset <= pair[1].pos.offset);
            }
            prop_assert!(tokens[words.len()].is_eof());
        }

        #[test]
        fn lookahead_never_skips_or_duplicates(
            words in proptest::collection::vec(word(), 0..16),
            ops in ops(),
        ) {
            let source = words.join(" ");
            let mut lexer = lex_str(&source);
            let mut consumed = Vec::new();
            let mut last_peek: Option<Token> = None;
            for peek in ops {
                if peek {
                    let token = lexer.peek().unwrap().clone();
                    if let Some(previous) = &last_peek {
                        prop_assert_eq!(previous, &token);
                    }
                    last_peek = Some(token);
                } else {
                    let token = lexer.next().unwrap();
                    if let Some(previous) = last_peek.take() {
                        prop_assert_eq!(previous, token.clone());
                    }
                    if !token.is_eof() {
                        consumed.push(token.value);
                    }
                }
            }
            let rest = consume_all(&mut lexer).unwrap();
            consumed.extend(rest.into_iter().filter(|t| !t.is_eof()).map(|t| t.value));
            prop_assert_eq!(consumed, words);
        }
    }
}
