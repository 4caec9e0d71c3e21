//! The lexer contract.
//!
//! A [`Definition`] is a stateless factory that builds a [`Lexer`] per source
//! and publishes the symbol table that names the token types its lexers emit.
//! Any implementation of the two traits can stand in for the default one.

use std::sync::OnceLock;

use lexkit_core::tag;

use crate::lex_error::LexError;
use crate::reader::SourceReader;
use crate::symbols::SymbolTable;
use crate::text_scanner_lexer::TextScannerLexer;
use crate::token::Token;

/// Factory for lexers plus the symbolic names of their token types.
pub trait Definition: Send + Sync {
    /// Build a fresh lexer over `reader`.
    fn lex(&self, reader: &mut dyn SourceReader) -> Result<Box<dyn Lexer>, LexError>;

    /// The fixed `name -> token type` table shared by every lexer this builds.
    fn symbols(&self) -> &SymbolTable;
}

/// A single-pass token source with one token of lookahead.
///
/// After EOF every call returns an EOF token. After an error every call
/// returns that same error.
pub trait Lexer: Send {
    /// Look at the next token without consuming it.
    fn peek(&mut self) -> Result<&Token, LexError>;

    /// Consume and return the next token.
    fn next(&mut self) -> Result<Token, LexError>;
}

/// The default definition: Go-style tokens from [`TextScannerLexer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDefinition;

/// Process-wide default definition.
pub static DEFAULT_DEFINITION: DefaultDefinition = DefaultDefinition;

static DEFAULT_SYMBOLS: OnceLock<SymbolTable> = OnceLock::new();

impl Definition for DefaultDefinition {
    fn lex(&self, reader: &mut dyn SourceReader) -> Result<Box<dyn Lexer>, LexError> {
        Ok(Box::new(TextScannerLexer::from_reader(reader)?))
    }

    fn symbols(&self) -> &SymbolTable {
        DEFAULT_SYMBOLS.get_or_init(|| {
            tag::CATEGORIES
                .into_iter()
                .map(|(kind, name)| (name, kind))
                .collect()
        })
    }
}
