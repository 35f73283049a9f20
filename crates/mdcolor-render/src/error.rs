//! Error types for stream rendering.
//!
//! Grammar lookups and highlighter faults never show up here: the code block
//! renderer absorbs them and falls back to flat styling. What remains are the
//! conditions the caller has to act on: unreadable input, and an output side
//! that went away.

use std::io;

/// Error returned by a [`LineSink`](crate::LineSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Whoever reads the output (a pager, a pipe) has gone away.
    #[error("output reader closed")]
    ReaderClosed,

    /// Any other write failure.
    #[error("failed to write output: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::BrokenPipe {
            SinkError::ReaderClosed
        } else {
            SinkError::Io(err)
        }
    }
}

/// Error type for [`run`](crate::run).
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Reading an input line failed (including invalid UTF-8).
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    /// Writing an output line failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),

    /// The output reader closed before the stream finished.
    #[error("output reader closed")]
    ReaderClosed,
}

impl RenderError {
    /// True when the stream stopped because nobody is reading any more.
    pub fn is_reader_closed(&self) -> bool {
        matches!(self, RenderError::ReaderClosed)
    }
}

impl From<SinkError> for RenderError {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::ReaderClosed => RenderError::ReaderClosed,
            SinkError::Io(err) => RenderError::Output(err),
        }
    }
}

/// Error raised by a [`Highlighter`](crate::highlight::Highlighter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    /// The grammar handle does not belong to this engine.
    #[error("unknown grammar: {0}")]
    UnknownGrammar(String),

    /// The engine failed while highlighting.
    #[error("highlighting failed: {0}")]
    Engine(String),
}
