//! Syntax highlighting seam.
//!
//! The code block renderer talks to a [`Highlighter`] only. Which engine sits
//! behind it is decided once at startup by [`default_highlighter`]: the
//! `syntect` engine when the `syntax-highlighting` feature is compiled in,
//! otherwise [`NoHighlighter`], which knows no grammars and makes every block
//! fall back to flat styling.

#[cfg(feature = "syntax-highlighting")]
mod syntax;

#[cfg(feature = "syntax-highlighting")]
pub use syntax::SyntectHighlighter;

use std::fmt::Debug;

use crate::error::HighlightError;

/// Name of the syntax theme used when none (or an unknown one) is requested.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Notice shown when code blocks will not be highlighted.
pub const ENGINE_NOTICE: &str = "Notice: syntax highlighting is not available in this build. \
Code blocks will use basic coloring.";

/// Upper bound on the size of a block handed to the engine.
///
/// Larger blocks are rendered with flat styling instead.
pub const MAX_HIGHLIGHT_BYTES: usize = 512 * 1024;

/// A grammar handle returned by a [`Highlighter`], valid for that
/// highlighter only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    name: String,
}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A syntax highlighting engine.
pub trait Highlighter: Debug + Send + Sync {
    /// Whether the engine can highlight anything at all.
    fn is_available(&self) -> bool;

    /// Looks a grammar up by a fence tag (`rust`, `py`, `JavaScript`, ...).
    fn resolve_grammar(&self, tag: &str) -> Option<Grammar>;

    /// Guesses a grammar from the code itself.
    fn sniff_grammar(&self, code: &str) -> Option<Grammar>;

    /// Highlights `code`, returning one styled line per input line.
    fn render(&self, code: &str, grammar: &Grammar) -> Result<Vec<String>, HighlightError>;
}

/// The highlighter used when no engine is compiled in, and for
/// `--color never`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
    fn is_available(&self) -> bool {
        false
    }

    fn resolve_grammar(&self, _tag: &str) -> Option<Grammar> {
        None
    }

    fn sniff_grammar(&self, _code: &str) -> Option<Grammar> {
        None
    }

    fn render(&self, _code: &str, grammar: &Grammar) -> Result<Vec<String>, HighlightError> {
        Err(HighlightError::UnknownGrammar(grammar.name().to_string()))
    }
}

/// Whether the `syntect` engine was compiled in.
pub fn engine_available() -> bool {
    cfg!(feature = "syntax-highlighting")
}

/// The best highlighter this build offers, using the named syntax theme.
pub fn default_highlighter(theme: &str) -> Box<dyn Highlighter> {
    #[cfg(feature = "syntax-highlighting")]
    {
        Box::new(SyntectHighlighter::new(theme))
    }
    #[cfg(not(feature = "syntax-highlighting"))]
    {
        let _ = theme;
        Box::new(NoHighlighter)
    }
}
