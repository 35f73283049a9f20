//! The style registry: semantic style names mapped to terminal styles.
//!
//! Every piece of output the renderer produces is painted through [`Styles`],
//! looked up by a [`StyleName`]. The set of names is closed, and a `Styles`
//! value always holds an entry for each of them, so lookups cannot fail.
//!
//! A registry is built once at startup, optionally overlaid with a YAML
//! stylesheet, and then only read:
//!
//! ```rust
//! use mdcolor_render::style::{StyleName, Styles};
//!
//! let styles = Styles::from_yaml(r#"
//! h1:
//!   fg: bright_magenta
//!   bold: true
//! link_url: { fg: blue, underline: true }
//! "#).unwrap();
//!
//! let title = styles.paint(StyleName::H1, "# Title");
//! assert!(title.contains("# Title"));
//! ```

mod color;
mod error;
mod stylesheet;

pub use color::ColorDef;
pub use error::StylesheetError;
pub use stylesheet::{parse_stylesheet, StyleDefinition};

use std::path::Path;

use console::{Color, Style};

/// The closed set of semantic style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleName {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Bold,
    Italic,
    BoldItalic,
    InlineCode,
    CodeBlock,
    ListMarker,
    BlockquoteMarker,
    LinkText,
    LinkUrl,
    HorizontalRule,
    FenceDecoration,
    FenceLanguageTag,
}

impl StyleName {
    /// Number of style names.
    pub const COUNT: usize = 18;

    /// Every style name, in declaration order.
    pub const ALL: [StyleName; Self::COUNT] = [
        StyleName::H1,
        StyleName::H2,
        StyleName::H3,
        StyleName::H4,
        StyleName::H5,
        StyleName::H6,
        StyleName::Bold,
        StyleName::Italic,
        StyleName::BoldItalic,
        StyleName::InlineCode,
        StyleName::CodeBlock,
        StyleName::ListMarker,
        StyleName::BlockquoteMarker,
        StyleName::LinkText,
        StyleName::LinkUrl,
        StyleName::HorizontalRule,
        StyleName::FenceDecoration,
        StyleName::FenceLanguageTag,
    ];

    /// The name used in stylesheets.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::H1 => "h1",
            StyleName::H2 => "h2",
            StyleName::H3 => "h3",
            StyleName::H4 => "h4",
            StyleName::H5 => "h5",
            StyleName::H6 => "h6",
            StyleName::Bold => "bold",
            StyleName::Italic => "italic",
            StyleName::BoldItalic => "bold_italic",
            StyleName::InlineCode => "inline_code",
            StyleName::CodeBlock => "code_block",
            StyleName::ListMarker => "list_marker",
            StyleName::BlockquoteMarker => "blockquote_marker",
            StyleName::LinkText => "link_text",
            StyleName::LinkUrl => "link_url",
            StyleName::HorizontalRule => "horizontal_rule",
            StyleName::FenceDecoration => "fence_decoration",
            StyleName::FenceLanguageTag => "fence_language_tag",
        }
    }

    /// Looks a style up by its stylesheet name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.as_str() == name)
    }

    /// Heading style for a `#` count; levels past six share the `h6` style.
    pub fn heading(level: usize) -> Self {
        match level {
            0 | 1 => StyleName::H1,
            2 => StyleName::H2,
            3 => StyleName::H3,
            4 => StyleName::H4,
            5 => StyleName::H5,
            _ => StyleName::H6,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for StyleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The default look for each style name.
fn default_style(name: StyleName) -> Style {
    match name {
        StyleName::H1 | StyleName::H2 => Style::new().bold().blue().bright(),
        StyleName::H3 | StyleName::H4 => Style::new().bold().blue(),
        StyleName::H5 | StyleName::H6 => Style::new().bold().cyan(),
        StyleName::Bold => Style::new().bold(),
        StyleName::Italic => Style::new().italic().green(),
        StyleName::BoldItalic => Style::new().bold().italic().red().bright(),
        StyleName::InlineCode => Style::new().yellow().bright(),
        StyleName::CodeBlock => Style::new().cyan().bright(),
        StyleName::ListMarker => Style::new().magenta(),
        StyleName::BlockquoteMarker => Style::new().italic().yellow(),
        StyleName::LinkText => Style::new().blue().bright(),
        StyleName::LinkUrl => Style::new().dim().blue(),
        StyleName::HorizontalRule => Style::new().dim().fg(Color::White),
        StyleName::FenceDecoration => Style::new().dim().fg(Color::White),
        StyleName::FenceLanguageTag => Style::new().bold().yellow().bright(),
    }
}

/// The sequence ending every painted span.
pub const RESET: &str = "\x1b[0m";

/// The style registry.
///
/// Cloning is cheap enough to do at startup; after that the registry is
/// shared by reference.
#[derive(Debug, Clone)]
pub struct Styles {
    entries: [Style; StyleName::COUNT],
    enabled: bool,
}

impl Styles {
    /// The default palette, always emitting escape sequences.
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|i| default_style(StyleName::ALL[i]).force_styling(true)),
            enabled: true,
        }
    }

    /// A registry that paints nothing: every span is returned as plain text.
    pub fn plain() -> Self {
        Self {
            entries: std::array::from_fn(|_| Style::new().force_styling(false)),
            enabled: false,
        }
    }

    /// The default palette overlaid with a YAML stylesheet.
    pub fn from_yaml(yaml: &str) -> Result<Self, StylesheetError> {
        let overrides = parse_stylesheet(yaml)?;
        Ok(overrides
            .into_iter()
            .fold(Self::new(), |styles, (name, style)| styles.set(name, style)))
    }

    /// The default palette overlaid with a YAML stylesheet file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StylesheetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| StylesheetError::Load {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content).map_err(|e| e.with_path(path.to_path_buf()))
    }

    /// Replaces one entry, returning `self` for chaining.
    pub fn set(mut self, name: StyleName, style: Style) -> Self {
        self.entries[name.index()] = style.force_styling(self.enabled);
        self
    }

    /// Looks up the style for `name`.
    pub fn get(&self, name: StyleName) -> &Style {
        &self.entries[name.index()]
    }

    /// Whether this registry emits escape sequences at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wraps `text` in the style's attribute sequence and a trailing reset.
    pub fn paint(&self, name: StyleName, text: &str) -> String {
        self.get(name).apply_to(text).to_string()
    }

    /// Paints `text` that may already hold painted spans.
    ///
    /// Each inner reset is followed by the style's own opening sequence, so
    /// the style covers all of `text` instead of ending at the first span.
    pub fn paint_around(&self, name: StyleName, text: &str) -> String {
        let empty = self.paint(name, "");
        match empty.strip_suffix(RESET) {
            Some(opening) if !opening.is_empty() && text.contains(RESET) => {
                let reopened = format!("{}{}", RESET, opening);
                self.paint(name, &text.replace(RESET, &reopened))
            }
            _ => self.paint(name, text),
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}
