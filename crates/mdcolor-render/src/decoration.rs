//! Box-drawing decorations around code blocks, and horizontal rules.
//!
//! Code blocks get a partial frame: a top bar carrying the language tag, a
//! left edge on every content line and a bottom bar. The right edge is
//! never drawn, so long lines are not clipped.
//!
//! ```text
//! ┌─┤ RUST ├──────────────────
//! │ fn main() {}
//! └───────────────────────────
//! ```

use crate::style::{StyleName, Styles};
use crate::util::{display_width, truncate_to_width};

/// Width assumed when the terminal width is unknown.
pub const FALLBACK_WIDTH: usize = 80;

/// Below this width the bars degrade to plain fence markers.
pub const MIN_FRAME_WIDTH: usize = 10;

const HORIZONTAL: char = '─';
const VERTICAL: char = '│';
const TOP_LEFT: char = '┌';
const BOTTOM_LEFT: char = '└';
const TAG_OPEN: char = '┤';
const TAG_CLOSE: char = '├';

// "┌─┤" + " " + tag + " " + "├"
const TAG_FRAME_WIDTH: usize = 6;

fn effective_width(width: Option<usize>) -> usize {
    width.unwrap_or(FALLBACK_WIDTH)
}

fn rule(len: usize) -> String {
    std::iter::repeat(HORIZONTAL).take(len).collect()
}

/// The bar printed when a fence opens.
pub fn opening_bar(language: Option<&str>, width: Option<usize>, styles: &Styles) -> String {
    let cols = effective_width(width);
    if cols < MIN_FRAME_WIDTH {
        return styles.paint(
            StyleName::FenceDecoration,
            &format!("```{}", language.unwrap_or("")),
        );
    }

    match language {
        Some(tag) => {
            let tag = truncate_to_width(&tag.to_uppercase(), cols - TAG_FRAME_WIDTH);
            let used = TAG_FRAME_WIDTH + display_width(&tag);
            format!(
                "{}{}{}",
                styles.paint(
                    StyleName::FenceDecoration,
                    &format!("{}{}{}", TOP_LEFT, HORIZONTAL, TAG_OPEN)
                ),
                styles.paint(StyleName::FenceLanguageTag, &format!(" {} ", tag)),
                styles.paint(
                    StyleName::FenceDecoration,
                    &format!("{}{}", TAG_CLOSE, rule(cols.saturating_sub(used)))
                ),
            )
        }
        None => styles.paint(
            StyleName::FenceDecoration,
            &format!("{}{}", TOP_LEFT, rule(cols - 1)),
        ),
    }
}

/// The bar printed when a fence closes, or when input ends inside one.
pub fn closing_bar(width: Option<usize>, styles: &Styles) -> String {
    let cols = effective_width(width);
    if cols < MIN_FRAME_WIDTH {
        return styles.paint(StyleName::FenceDecoration, "```");
    }
    styles.paint(
        StyleName::FenceDecoration,
        &format!("{}{}", BOTTOM_LEFT, rule(cols - 1)),
    )
}

/// Prefixes one already-styled code line with the frame's left edge.
pub fn content_line(line: &str, styles: &Styles) -> String {
    format!(
        "{} {}",
        styles.paint(StyleName::FenceDecoration, &VERTICAL.to_string()),
        line
    )
}

/// A thematic break: a full-width rule when the width is known, otherwise
/// the marker itself.
pub fn horizontal_rule(marker: &str, width: Option<usize>, styles: &Styles) -> String {
    match width {
        Some(cols) => styles.paint(StyleName::HorizontalRule, &rule(cols)),
        None => styles.paint(StyleName::HorizontalRule, marker.trim()),
    }
}
