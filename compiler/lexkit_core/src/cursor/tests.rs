use crate::{ScanPosition, SourceBuffer};

fn cursor(source: &str) -> super::Cursor {
    SourceBuffer::new(source).into_cursor()
}

// === Basic Navigation ===

#[test]
fn current_returns_first_byte() {
    let cursor = cursor("abc");
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.current_char(), Some('a'));
}

#[test]
fn bump_moves_forward() {
    let mut cursor = cursor("abc");
    assert_eq!(cursor.bump(), Some('a'));
    assert_eq!(cursor.current(), b'b');
    assert_eq!(cursor.pos(), 1);
    assert_eq!(cursor.position(), ScanPosition::new(1, 1, 2));
}

#[test]
fn bump_at_eof_stays_put() {
    let mut cursor = cursor("x");
    cursor.bump();
    assert!(cursor.is_eof());
    assert_eq!(cursor.bump(), None);
    assert_eq!(cursor.pos(), 1);
}

#[test]
fn peek_near_end_returns_sentinel() {
    let mut cursor = cursor("ab");
    cursor.bump(); // at 'b'
    assert_eq!(cursor.peek(), 0);
}

#[test]
fn peek_at_eof_before_cache_line_boundary() {
    // 63 bytes of source puts the sentinel on the last byte of a cache line.
    let mut cursor = cursor(&"a".repeat(63));
    while cursor.bump().is_some() {}
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
    assert_eq!(cursor.peek(), 0);
}

#[test]
fn peek_at_eof_for_every_length_near_boundary() {
    for len in 60..=130 {
        let mut cursor = cursor(&"a".repeat(len));
        cursor.advance_to(len);
        assert_eq!(cursor.peek(), 0, "len {len}");
    }
}

// === Line & Column ===

#[test]
fn newline_starts_next_line() {
    let mut cursor = cursor("a\nb");
    cursor.bump();
    cursor.bump();
    assert_eq!(cursor.position(), ScanPosition::new(2, 2, 1));
}

#[test]
fn column_counts_characters_not_bytes() {
    let mut cursor = cursor("éx");
    assert_eq!(cursor.bump(), Some('é'));
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.position().column, 2);
}

// === Interior Null Bytes ===

#[test]
fn interior_null_is_not_eof() {
    let mut cursor = cursor("a\0b");
    cursor.bump();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
    assert_eq!(cursor.current_char(), Some('\0'));
}

// === BOM ===

#[test]
fn bom_is_skipped() {
    let cursor = cursor("\u{FEFF}x");
    assert_eq!(cursor.pos(), 3);
    assert_eq!(cursor.current_char(), Some('x'));
    assert_eq!(cursor.position().column, 1);
}

// === Slicing & Searching ===

#[test]
fn slice_from_start() {
    let mut cursor = cursor("hello world");
    for _ in 0..5 {
        cursor.bump();
    }
    assert_eq!(cursor.slice_from(0), "hello");
    assert_eq!(cursor.slice(6, 11), "world");
}

#[test]
fn find_byte_searches_from_current() {
    let mut cursor = cursor("a`b`c");
    cursor.bump();
    assert_eq!(cursor.find_byte(b'`'), Some(1));
    cursor.bump();
    assert_eq!(cursor.find_byte(b'`'), Some(3));
    assert_eq!(cursor.find_byte(b'z'), None);
}

#[test]
fn find_byte_ignores_sentinel() {
    let cursor = cursor("abc");
    assert_eq!(cursor.find_byte(0), None);
}

#[test]
fn find_str_locates_needle() {
    let cursor = cursor("/* x */ y");
    assert_eq!(cursor.find_str("*/"), Some(5));
    assert_eq!(cursor.find_str("**"), None);
}

// === Locate & Advance ===

#[test]
fn locate_same_line() {
    let cursor = cursor("abcdef");
    assert_eq!(
        cursor.locate(ScanPosition::START, 4),
        ScanPosition::new(4, 1, 5)
    );
}

#[test]
fn locate_across_lines() {
    let cursor = cursor("ab\ncde\nfg");
    assert_eq!(
        cursor.locate(ScanPosition::START, 9),
        ScanPosition::new(9, 3, 3)
    );
}

#[test]
fn advance_to_tracks_lines() {
    let mut cursor = cursor("ab\ncde");
    cursor.advance_to(5);
    assert_eq!(cursor.position(), ScanPosition::new(5, 2, 3));
    assert_eq!(cursor.current_char(), Some('e'));
}

#[test]
fn advance_to_clamps_to_source_len() {
    let mut cursor = cursor("abc");
    cursor.advance_to(100);
    assert!(cursor.is_eof());
    assert_eq!(cursor.position(), ScanPosition::new(3, 1, 4));
}

#[test]
fn advance_to_never_moves_backwards() {
    let mut cursor = cursor("abc");
    cursor.advance_to(2);
    cursor.advance_to(1);
    assert_eq!(cursor.pos(), 2);
}
