//! The `syntect` highlighting engine.

use std::fmt;

use console::Style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use tracing::{debug, warn};

use super::{Grammar, Highlighter, DEFAULT_THEME};
use crate::error::HighlightError;
use crate::util::rgb_to_ansi256;

/// Highlighter backed by syntect's bundled grammars and themes.
///
/// Loading the grammar set is the expensive part; build one per process.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Option<Theme>,
    theme_name: String,
}

impl SyntectHighlighter {
    /// Loads the bundled grammars and the named theme, falling back to
    /// [`DEFAULT_THEME`] when the name is unknown.
    pub fn new(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let (theme_name, theme) = match themes.remove(theme_name) {
            Some(theme) => (theme_name.to_string(), Some(theme)),
            None => {
                warn!(theme = theme_name, fallback = DEFAULT_THEME, "unknown syntax theme");
                (DEFAULT_THEME.to_string(), themes.remove(DEFAULT_THEME))
            }
        };

        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
            theme_name,
        }
    }

    /// Name of the theme in use.
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }
}

impl fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .field("theme", &self.theme_name)
            .finish()
    }
}

impl Highlighter for SyntectHighlighter {
    fn is_available(&self) -> bool {
        self.theme.is_some()
    }

    fn resolve_grammar(&self, tag: &str) -> Option<Grammar> {
        let syntax = self.syntaxes.find_syntax_by_token(tag)?;
        debug!(tag, grammar = %syntax.name, "resolved grammar");
        Some(Grammar::new(syntax.name.clone()))
    }

    fn sniff_grammar(&self, code: &str) -> Option<Grammar> {
        let first_line = code.lines().next()?;
        let syntax = self.syntaxes.find_syntax_by_first_line(first_line)?;
        debug!(grammar = %syntax.name, "sniffed grammar");
        Some(Grammar::new(syntax.name.clone()))
    }

    fn render(&self, code: &str, grammar: &Grammar) -> Result<Vec<String>, HighlightError> {
        let syntax = self
            .syntaxes
            .find_syntax_by_name(grammar.name())
            .ok_or_else(|| HighlightError::UnknownGrammar(grammar.name().to_string()))?;
        let theme = self
            .theme
            .as_ref()
            .ok_or_else(|| HighlightError::Engine("no theme loaded".to_string()))?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        code.split('\n')
            .map(|line| {
                let line = format!("{}\n", line);
                let ranges = highlighter
                    .highlight_line(&line, &self.syntaxes)
                    .map_err(|e| HighlightError::Engine(e.to_string()))?;
                Ok(ranges
                    .into_iter()
                    .map(|(style, text)| paint_span(style, text.trim_end_matches(['\r', '\n'])))
                    .collect())
            })
            .collect()
    }
}

fn paint_span(style: SyntectStyle, text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let fg = style.foreground;
    let mut painted = Style::new()
        .force_styling(true)
        .color256(rgb_to_ansi256((fg.r, fg.g, fg.b)));
    if style.font_style.contains(FontStyle::BOLD) {
        painted = painted.bold();
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        painted = painted.italic();
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        painted = painted.underlined();
    }
    painted.apply_to(text).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn test_resolves_tags_and_extensions() {
        let highlighter = SyntectHighlighter::new(DEFAULT_THEME);
        assert_eq!(
            highlighter.resolve_grammar("rust").map(|g| g.name().to_string()),
            Some("Rust".to_string())
        );
        assert!(highlighter.resolve_grammar("py").is_some());
        assert_eq!(highlighter.resolve_grammar("no-such-language"), None);
    }

    #[test]
    fn test_sniffs_shebang() {
        let highlighter = SyntectHighlighter::new(DEFAULT_THEME);
        let grammar = highlighter.sniff_grammar("#!/usr/bin/env python\nprint(1)");
        assert!(grammar.is_some());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = SyntectHighlighter::new("no-such-theme");
        assert_eq!(highlighter.theme_name(), DEFAULT_THEME);
        assert!(highlighter.is_available());
    }

    #[test]
    fn test_render_keeps_line_count_and_text() {
        let highlighter = SyntectHighlighter::new(DEFAULT_THEME);
        let grammar = highlighter.resolve_grammar("python").unwrap();
        let code = "def f():\n\n    return 1\n";
        let lines = highlighter.render(code, &grammar).unwrap();
        assert_eq!(lines.len(), 4);
        assert_eq!(strip_ansi(&lines[0]), "def f():");
        assert_eq!(strip_ansi(&lines[1]), "");
        assert_eq!(strip_ansi(&lines[2]), "    return 1");
        assert_eq!(strip_ansi(&lines[3]), "");
        assert!(lines[0].contains("\x1b[38;5;"));
    }

    #[test]
    fn test_render_rejects_unknown_grammar() {
        let highlighter = SyntectHighlighter::new(DEFAULT_THEME);
        let err = highlighter
            .render("x", &Grammar::new("Not A Grammar"))
            .unwrap_err();
        assert!(matches!(err, HighlightError::UnknownGrammar(_)));
    }
}
