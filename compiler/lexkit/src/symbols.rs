//! Symbolic token names.
//!
//! A [`SymbolTable`] maps the names a grammar uses for token categories
//! (`"Ident"`, `"String"`, ...) to the pseudo-runes a lexer emits. It is the
//! binding point between a grammar and whichever lexer implementation is
//! plugged in.

use rustc_hash::FxHashMap;

use lexkit_core::TokenType;

/// Immutable `name -> token type` mapping with reverse lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTable {
    by_name: FxHashMap<String, TokenType>,
}

impl SymbolTable {
    /// Token type bound to `name`.
    pub fn get(&self, name: &str) -> Option<TokenType> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Name bound to `kind`, for diagnostics.
    ///
    /// If several names share a kind, any one of them may be returned.
    pub fn name_of(&self, kind: TokenType) -> Option<&str> {
        self.by_name
            .iter()
            .find(|&(_, &k)| k == kind)
            .map(|(name, _)| name.as_str())
    }

    /// All bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenType)> {
        self.by_name.iter().map(|(name, &kind)| (name.as_str(), kind))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, TokenType)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (S, TokenType)>>(iter: I) -> Self {
        SymbolTable {
            by_name: iter
                .into_iter()
                .map(|(name, kind)| (name.into(), kind))
                .collect(),
        }
    }
}
