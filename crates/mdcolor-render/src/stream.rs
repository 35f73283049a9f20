//! The stream driver: reads lines, classifies them and emits rendered lines.
//!
//! Output is produced line by line as input arrives. The only thing held
//! back is the content of an open fence, which is highlighted as one block
//! when the fence closes (or when input ends inside it).

use std::io::BufRead;
use std::mem;

use tracing::debug;

use crate::block::{classify, BlockMode, LineKind};
use crate::code_block::CodeBlock;
use crate::decoration;
use crate::error::{RenderError, SinkError};
use crate::highlight::{Highlighter, NoHighlighter};
use crate::inline::resolve;
use crate::sink::LineSink;
use crate::style::{StyleName, Styles};

/// Process-wide rendering configuration, built once and shared by reference.
#[derive(Debug)]
pub struct RenderConfig {
    pub styles: Styles,
    pub highlighter: Box<dyn Highlighter>,
    /// Terminal width in columns; `None` when output is not a terminal.
    pub width: Option<usize>,
}

impl RenderConfig {
    pub fn new(styles: Styles, highlighter: Box<dyn Highlighter>) -> Self {
        Self {
            styles,
            highlighter,
            width: None,
        }
    }

    /// Sets the terminal width. A width of zero counts as unknown.
    pub fn with_width(mut self, width: Option<usize>) -> Self {
        self.width = width.filter(|&cols| cols > 0);
        self
    }

    /// Plain text output: no escape sequences, no highlighting.
    pub fn plain() -> Self {
        Self::new(Styles::plain(), Box::new(NoHighlighter))
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(Styles::new(), Box::new(NoHighlighter))
    }
}

#[derive(Debug)]
enum BlockState {
    Normal,
    InFence(CodeBlock),
}

impl BlockState {
    fn mode(&self) -> BlockMode {
        match self {
            BlockState::Normal => BlockMode::Normal,
            BlockState::InFence(_) => BlockMode::InFence,
        }
    }
}

/// A rendering session over one input stream.
///
/// Feed lines with [`push_line`](Self::push_line), then call
/// [`finish`](Self::finish) once input ends.
#[derive(Debug)]
pub struct MarkdownStream<'c> {
    config: &'c RenderConfig,
    state: BlockState,
}

impl<'c> MarkdownStream<'c> {
    pub fn new(config: &'c RenderConfig) -> Self {
        Self {
            config,
            state: BlockState::Normal,
        }
    }

    /// Whether the stream is inside an open fence.
    pub fn in_fence(&self) -> bool {
        matches!(self.state, BlockState::InFence(_))
    }

    /// Renders one input line (without its terminator).
    pub fn push_line<S: LineSink + ?Sized>(
        &mut self,
        line: &str,
        sink: &mut S,
    ) -> Result<(), SinkError> {
        let config = self.config;
        let styles = &config.styles;
        let width = config.width;

        match classify(line, self.state.mode()) {
            LineKind::FenceOpen { language } => {
                debug!(language = ?language, "fence opened");
                sink.write_line(&decoration::opening_bar(language.as_deref(), width, styles))?;
                self.state = BlockState::InFence(CodeBlock::new(language));
            }
            LineKind::FenceClose => {
                debug!("fence closed");
                self.flush_fence(sink)?;
            }
            LineKind::FenceContent => {
                if let BlockState::InFence(block) = &mut self.state {
                    block.push(line);
                }
            }
            LineKind::ThematicBreak { marker } => {
                sink.write_line(&decoration::horizontal_rule(marker, width, styles))?;
            }
            LineKind::Heading {
                level,
                marker,
                text,
            } => {
                let heading = format!("{} {}", marker, resolve(text, styles));
                sink.write_line(&styles.paint_around(StyleName::heading(level), &heading))?;
            }
            LineKind::UnorderedItem {
                indent,
                marker,
                text,
            }
            | LineKind::OrderedItem {
                indent,
                marker,
                text,
            } => {
                sink.write_line(&format!(
                    "{}{} {}",
                    indent,
                    styles.paint(StyleName::ListMarker, marker),
                    resolve(text, styles)
                ))?;
            }
            LineKind::Blockquote { indent, text } => {
                sink.write_line(&format!(
                    "{}{} {}",
                    indent,
                    styles.paint(StyleName::BlockquoteMarker, ">"),
                    resolve(text, styles)
                ))?;
            }
            LineKind::Plain => {
                sink.write_line(&resolve(line, styles))?;
            }
        }
        Ok(())
    }

    /// Ends the stream, flushing a fence left open by the input.
    pub fn finish<S: LineSink + ?Sized>(mut self, sink: &mut S) -> Result<(), SinkError> {
        if self.in_fence() {
            debug!("input ended inside a fence");
            self.flush_fence(sink)?;
        }
        Ok(())
    }

    fn flush_fence<S: LineSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        let BlockState::InFence(block) = mem::replace(&mut self.state, BlockState::Normal) else {
            return Ok(());
        };

        debug!(
            language = ?block.language(),
            lines = block.lines().len(),
            "flushing code block"
        );
        let config = self.config;
        for line in block.render(&*config.highlighter, &config.styles) {
            sink.write_line(&line)?;
        }
        sink.write_line(&decoration::closing_bar(config.width, &config.styles))
    }
}

/// Renders everything readable from `input` into `sink`.
///
/// Lines are split on `\n`; a trailing `\r` is dropped as well.
pub fn run<R, S>(mut input: R, sink: &mut S, config: &RenderConfig) -> Result<(), RenderError>
where
    R: BufRead,
    S: LineSink + ?Sized,
{
    let mut stream = MarkdownStream::new(config);
    let mut buf = String::new();

    loop {
        buf.clear();
        let read = input.read_line(&mut buf).map_err(RenderError::Input)?;
        if read == 0 {
            break;
        }
        let line = buf
            .strip_suffix('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .unwrap_or(buf.as_str());
        stream.push_line(line, sink)?;
    }

    stream.finish(sink)?;
    Ok(())
}

/// Renders a complete document to a list of lines.
///
/// ```rust
/// use mdcolor_render::{render_str, RenderConfig};
///
/// let lines = render_str("# Title\n\n- item\n", &RenderConfig::plain());
/// assert_eq!(lines, vec!["# Title", "", "- item"]);
/// ```
pub fn render_str(input: &str, config: &RenderConfig) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut stream = MarkdownStream::new(config);
    for line in input.lines() {
        // pushing into a Vec cannot fail
        let _ = stream.push_line(line, &mut lines);
    }
    let _ = stream.finish(&mut lines);
    lines
}
