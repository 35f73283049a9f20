//! Block-level classification of input lines.
//!
//! Classification depends on one bit of state carried between lines:
//! whether the stream is inside a fenced code block. Everything else is
//! decided by the line alone, checked in a fixed order (thematic break,
//! heading, unordered item, ordered item, blockquote, plain).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::error;

/// Line patterns, compiled once.
#[derive(Debug)]
struct Patterns {
    fence_open: Regex,
    heading: Regex,
    unordered: Regex,
    ordered: Regex,
    blockquote: Regex,
}

impl Patterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            fence_open: Regex::new(r"^```([^`\s]*)\s*$")?,
            heading: Regex::new(r"^(#+)\s+(.*)$")?,
            unordered: Regex::new(r"^(\s*)([*+-])\s+(.*)$")?,
            ordered: Regex::new(r"^(\s*)(\d+\.)\s+(.*)$")?,
            blockquote: Regex::new(r"^(\s*)>\s+(.*)$")?,
        })
    }
}

// `None` only if a pattern fails to compile; every line is then plain.
static PATTERNS: Lazy<Option<Patterns>> = Lazy::new(|| {
    Patterns::compile()
        .map_err(|err| error!(error = %err, "block patterns failed to compile"))
        .ok()
});

const FENCE_MARKER: &str = "```";
const THEMATIC_BREAKS: [&str; 3] = ["---", "___", "***"];

/// Whether the stream is inside a fenced code block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlockMode {
    #[default]
    Normal,
    InFence,
}

/// What a single line is, given the current [`BlockMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Opening fence, with its language tag lowercased. An empty tag is `None`.
    FenceOpen { language: Option<String> },
    /// Closing fence; only recognised inside a fence.
    FenceClose,
    /// Any other line inside a fence, kept verbatim.
    FenceContent,
    ThematicBreak { marker: &'a str },
    Heading {
        level: usize,
        marker: &'a str,
        text: &'a str,
    },
    UnorderedItem {
        indent: &'a str,
        marker: &'a str,
        text: &'a str,
    },
    OrderedItem {
        indent: &'a str,
        marker: &'a str,
        text: &'a str,
    },
    Blockquote { indent: &'a str, text: &'a str },
    Plain,
}

impl LineKind<'_> {
    /// The mode the stream is in after a line of this kind.
    pub fn next_mode(&self, mode: BlockMode) -> BlockMode {
        match self {
            LineKind::FenceOpen { .. } => BlockMode::InFence,
            LineKind::FenceClose => BlockMode::Normal,
            _ => mode,
        }
    }
}

/// Classifies `line` in the given mode.
///
/// ```rust
/// use mdcolor_render::block::{classify, BlockMode, LineKind};
///
/// assert_eq!(
///     classify("## Usage", BlockMode::Normal),
///     LineKind::Heading { level: 2, marker: "##", text: "Usage" },
/// );
/// assert_eq!(classify("## Usage", BlockMode::InFence), LineKind::FenceContent);
/// ```
pub fn classify(line: &str, mode: BlockMode) -> LineKind<'_> {
    let trimmed = line.trim();

    if mode == BlockMode::InFence {
        return if trimmed == FENCE_MARKER {
            LineKind::FenceClose
        } else {
            LineKind::FenceContent
        };
    }

    let Some(patterns) = PATTERNS.as_ref() else {
        return LineKind::Plain;
    };

    if let Some(caps) = patterns.fence_open.captures(trimmed) {
        let language = caps
            .get(1)
            .map(|tag| tag.as_str())
            .filter(|tag| !tag.is_empty())
            .map(str::to_lowercase);
        return LineKind::FenceOpen { language };
    }

    if THEMATIC_BREAKS.contains(&trimmed) {
        return LineKind::ThematicBreak { marker: trimmed };
    }

    if let Some(caps) = patterns.heading.captures(line) {
        let marker = group(&caps, 1, line);
        return LineKind::Heading {
            level: marker.len(),
            marker,
            text: group(&caps, 2, line),
        };
    }

    if let Some(caps) = patterns.unordered.captures(line) {
        return LineKind::UnorderedItem {
            indent: group(&caps, 1, line),
            marker: group(&caps, 2, line),
            text: group(&caps, 3, line),
        };
    }

    if let Some(caps) = patterns.ordered.captures(line) {
        return LineKind::OrderedItem {
            indent: group(&caps, 1, line),
            marker: group(&caps, 2, line),
            text: group(&caps, 3, line),
        };
    }

    if let Some(caps) = patterns.blockquote.captures(line) {
        return LineKind::Blockquote {
            indent: group(&caps, 1, line),
            text: group(&caps, 2, line),
        };
    }

    LineKind::Plain
}

// Borrow the group from `line` itself so the result outlives the captures.
fn group<'a>(caps: &regex::Captures<'_>, index: usize, line: &'a str) -> &'a str {
    caps.get(index).map_or("", |m| &line[m.range()])
}
