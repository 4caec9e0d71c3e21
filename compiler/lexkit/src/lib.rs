//! Token and lexer contract for a parsing toolkit.
//!
//! A parser consumes [`Token`]s one at a time from a [`Lexer`], which a
//! [`Definition`] builds per source. The definition also publishes a
//! [`SymbolTable`] so a grammar can refer to token types by name. Any pair of
//! implementations can be plugged in; [`DEFAULT_DEFINITION`] builds
//! [`TextScannerLexer`]s that produce Go-style tokens.
//!
//! # Usage
//!
//! ```
//! use lexkit::{lex_str, tag, Lexer};
//!
//! let mut lexer = lex_str(r#"greet "hi\n" 'x'"#);
//! assert_eq!(lexer.next()?.kind, tag::IDENT);
//! assert_eq!(lexer.next()?.value, "hi\n");
//! assert_eq!(lexer.peek()?.kind, tag::CHAR);
//! assert_eq!(lexer.next()?.value, "x");
//! assert!(lexer.next()?.is_eof());
//! # Ok::<(), lexkit::LexError>(())
//! ```
//!
//! # Tracing
//!
//! - `RUST_LOG=lexkit=debug`: lexer construction and tolerated
//!   single-quoted literals.
//! - `RUST_LOG=lexkit=trace`: every token.
//!
//! Call [`init_tracing`] to install a subscriber.

mod definition;
mod lex_error;
mod reader;
mod symbols;
mod text_scanner_lexer;
mod token;
mod unquote;

use std::sync::Once;

pub use definition::{DefaultDefinition, Definition, Lexer, DEFAULT_DEFINITION};
pub use lex_error::{LexError, LexErrorKind};
pub use lexkit_core::{tag, ScanConfig, ScanErrorKind, ScanMode, SourceBuffer, TokenType};
pub use reader::{NamedReader, SourceReader};
pub use symbols::SymbolTable;
pub use text_scanner_lexer::TextScannerLexer;
pub use token::{Position, Token, EOF};
pub use unquote::{unquote, UnquoteError};

/// Lex a reader with the default definition.
///
/// Positions carry the reader's name when it has one.
pub fn lex<R: SourceReader>(mut reader: R) -> Result<TextScannerLexer, LexError> {
    TextScannerLexer::from_reader(&mut reader)
}

/// Lex a string. Positions are unnamed.
pub fn lex_str(source: &str) -> TextScannerLexer {
    TextScannerLexer::new(SourceBuffer::new(source), "")
}

/// Lex raw bytes. Invalid UTF-8 is a lexing error where it occurs.
pub fn lex_bytes(source: &[u8]) -> TextScannerLexer {
    TextScannerLexer::new(SourceBuffer::from_bytes(source), "")
}

/// Drain a lexer, returning every token up to and including EOF.
pub fn consume_all(lexer: &mut dyn Lexer) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next()?;
        let done = token.is_eof();
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// `RUST_LOG=lexkit=debug` shows lexer construction and accepted
/// multi-character single-quoted literals, `RUST_LOG=lexkit=trace` adds one
/// event per token, and `RUST_LOG=lexkit_core=warn` shows scan errors
/// reported through the default sink. Without `RUST_LOG` nothing is
/// installed. Later calls are no-ops, and a global subscriber set up by the
/// embedding program is kept.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var_os("RUST_LOG").is_none() {
            return;
        }
        let installed = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().with_target(true))
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already installed, keeping it");
        }
    });
}
