//! # mdcolor-render - Streaming Markdown to ANSI
//!
//! `mdcolor-render` turns Markdown into terminal output one line at a time.
//! It is the engine behind the `mdcolor` command, and can be used on its own
//! wherever Markdown needs to be shown in a terminal as it arrives.
//!
//! ## Core Concepts
//!
//! - [`Styles`]: the registry mapping semantic style names to terminal styles
//! - [`inline::resolve`]: emphasis, code spans and links within a line
//! - [`block::classify`]: what kind of line this is, given the fence state
//! - [`CodeBlock`]: fenced content, highlighted as a whole when the fence closes
//! - [`Highlighter`]: the syntax highlighting seam
//! - [`MarkdownStream`] and [`run`]: the stream driver
//! - [`LineSink`]: where rendered lines go
//!
//! ## Quick Start
//!
//! ```rust
//! use mdcolor_render::{run, RenderConfig};
//!
//! let input = "# Notes\n\nSome **bold** text.\n";
//! let mut lines: Vec<String> = Vec::new();
//! run(input.as_bytes(), &mut lines, &RenderConfig::plain()).unwrap();
//!
//! assert_eq!(lines, vec!["# Notes", "", "Some bold text."]);
//! ```
//!
//! ## Styling
//!
//! Output is painted through [`Styles`]. The defaults can be overridden
//! with a YAML stylesheet:
//!
//! ```rust
//! use mdcolor_render::{render_str, RenderConfig, Styles, NoHighlighter};
//!
//! let styles = Styles::from_yaml("bold: { fg: red, bold: true }").unwrap();
//! let config = RenderConfig::new(styles, Box::new(NoHighlighter));
//!
//! let lines = render_str("**alert**", &config);
//! assert!(lines[0].contains("alert"));
//! assert!(lines[0].starts_with("\x1b["));
//! ```
//!
//! ## Code Blocks
//!
//! Fenced blocks are framed with box-drawing characters and highlighted by
//! the configured [`Highlighter`]. With the `syntax-highlighting` feature
//! (on by default) that is `syntect`; [`default_highlighter`] picks the best
//! engine the build has.

pub mod block;
pub mod code_block;
pub mod decoration;
mod error;
pub mod highlight;
pub mod inline;
mod sink;
mod stream;
pub mod style;
pub mod terminal;
mod util;

pub use code_block::CodeBlock;
pub use error::{HighlightError, RenderError, SinkError};
pub use highlight::{
    default_highlighter, engine_available, Grammar, Highlighter, NoHighlighter, DEFAULT_THEME,
    ENGINE_NOTICE,
};
pub use sink::{LineSink, WriterSink};
pub use stream::{render_str, run, MarkdownStream, RenderConfig};
pub use style::{StyleName, Styles, StylesheetError, RESET};
pub use util::{rgb_to_ansi256, truncate_to_width};

#[cfg(feature = "syntax-highlighting")]
pub use highlight::SyntectHighlighter;
