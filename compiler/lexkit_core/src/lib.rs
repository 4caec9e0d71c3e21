//! Character scanning primitive for lexkit.
//!
//! Turns source text into pseudo-rune classified tokens: identifiers,
//! numbers, quoted literals, comments, and single characters. Literal values
//! are left raw (quotes and escapes intact); cooking them is the lexer's job.
//!
//! This crate has no dependency on the lexer contract, so tools that only
//! need classified tokens and positions can use it directly.
//!
//! # Usage
//!
//! ```
//! use lexkit_core::{tag, ScanConfig, SourceBuffer, TextScanner};
//!
//! let mut scanner = TextScanner::new(
//!     SourceBuffer::new("x = 42"),
//!     ScanConfig::default(),
//!     Vec::new(),
//! );
//! assert_eq!(scanner.scan(), tag::IDENT);
//! assert_eq!(scanner.scan(), tag::from_char('='));
//! assert_eq!(scanner.scan(), tag::INT);
//! assert_eq!(scanner.token_text(), "42");
//! assert_eq!(scanner.scan(), tag::EOF);
//! assert!(scanner.sink().is_empty());
//! ```

mod cursor;
mod mode;
mod position;
mod scan_error;
mod scanner;
mod source_buffer;
pub mod tag;

pub use cursor::Cursor;
pub use mode::{ScanConfig, ScanMode, GO_WHITESPACE};
pub use position::ScanPosition;
pub use scan_error::{ErrorSink, NumberLiteral, ScanError, ScanErrorKind, TracingSink};
pub use scanner::TextScanner;
pub use source_buffer::{EncodingIssue, EncodingIssueKind, SourceBuffer};
pub use tag::TokenType;
