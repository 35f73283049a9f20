//! Rendering of accumulated fenced code blocks.
//!
//! A block is highlighted as a whole, since grammars need context across
//! lines. Anything that goes wrong on the way (no grammar for the tag,
//! nothing sniffed, an engine failure, a result that does not line up with
//! the input) is not an error: the block is rendered with the flat
//! `code_block` style instead.

use tracing::debug;

use crate::decoration;
use crate::highlight::{Highlighter, MAX_HIGHLIGHT_BYTES};
use crate::style::{StyleName, Styles};

/// The raw content of one fenced block, opening and closing fences excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    language: Option<String>,
    lines: Vec<String>,
}

impl CodeBlock {
    pub fn new(language: Option<String>) -> Self {
        Self {
            language,
            lines: Vec::new(),
        }
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a line verbatim.
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Renders the content lines, each prefixed with the frame's left edge.
    ///
    /// Returns exactly one output line per content line; an empty block
    /// renders to nothing.
    pub fn render(&self, highlighter: &dyn Highlighter, styles: &Styles) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }

        let body = self
            .highlight(highlighter)
            .unwrap_or_else(|| self.flat(styles));

        body.iter()
            .map(|line| decoration::content_line(line, styles))
            .collect()
    }

    fn highlight(&self, highlighter: &dyn Highlighter) -> Option<Vec<String>> {
        let source = self.lines.join("\n");
        if source.len() > MAX_HIGHLIGHT_BYTES {
            debug!(bytes = source.len(), "code block too large to highlight");
            return None;
        }

        let grammar = self
            .language()
            .and_then(|tag| highlighter.resolve_grammar(tag))
            .or_else(|| highlighter.sniff_grammar(&source));
        let Some(grammar) = grammar else {
            debug!(language = ?self.language, "no grammar for code block");
            return None;
        };

        match highlighter.render(&source, &grammar) {
            Ok(lines) if lines.len() == self.lines.len() => Some(lines),
            Ok(lines) => {
                debug!(
                    expected = self.lines.len(),
                    got = lines.len(),
                    "highlighter changed the line count"
                );
                None
            }
            Err(err) => {
                debug!(grammar = grammar.name(), error = %err, "highlighting failed");
                None
            }
        }
    }

    fn flat(&self, styles: &Styles) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| styles.paint(StyleName::CodeBlock, line))
            .collect()
    }
}
