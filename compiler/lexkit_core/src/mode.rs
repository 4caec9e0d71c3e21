//! Scanner configuration.

use bitflags::bitflags;

bitflags! {
    /// Which token categories the scanner recognises.
    ///
    /// A category that is not enabled falls back to single-character tokens,
    /// e.g. without `STRINGS` a `"` is returned as the token `'"'`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct ScanMode: u32 {
        /// Recognise identifiers.
        const IDENTS = 1 << 0;
        /// Recognise integer literals.
        const INTS = 1 << 1;
        /// Recognise floating-point literals (includes integers).
        const FLOATS = 1 << 2;
        /// Recognise single-quoted literals.
        const CHARS = 1 << 3;
        /// Recognise double-quoted strings.
        const STRINGS = 1 << 4;
        /// Recognise backtick raw strings.
        const RAW_STRINGS = 1 << 5;
        /// Recognise `//` and `/* */` comments.
        const COMMENTS = 1 << 6;
        /// Drop recognised comments instead of returning them.
        const SKIP_COMMENTS = 1 << 7;

        /// Everything, with comments skipped.
        const GO_TOKENS = Self::IDENTS.bits()
            | Self::FLOATS.bits()
            | Self::CHARS.bits()
            | Self::STRINGS.bits()
            | Self::RAW_STRINGS.bits()
            | Self::COMMENTS.bits()
            | Self::SKIP_COMMENTS.bits();
    }
}

/// Whitespace set: `\t`, `\n`, `\r` and space.
///
/// Bit `n` set means the character with code point `n` is skipped between
/// tokens. Only characters below 64 can be whitespace.
pub const GO_WHITESPACE: u64 = (1 << b'\t') | (1 << b'\n') | (1 << b'\r') | (1 << b' ');

/// Scanner settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    pub mode: ScanMode,
    /// Bit set of characters skipped between tokens; see [`GO_WHITESPACE`].
    pub whitespace: u64,
}

impl ScanConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_whitespace(mut self, whitespace: u64) -> Self {
        self.whitespace = whitespace;
        self
    }

    /// Returns `true` if `ch` is in the whitespace set.
    #[inline]
    pub fn is_whitespace(&self, ch: char) -> bool {
        let code = u32::from(ch);
        code < 64 && self.whitespace & (1 << code) != 0
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            mode: ScanMode::GO_TOKENS,
            whitespace: GO_WHITESPACE,
        }
    }
}
