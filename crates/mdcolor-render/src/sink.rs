//! Output sinks.
//!
//! The renderer writes one finished line at a time, in order, and never
//! holds output back. A [`LineSink`] is anything that accepts such lines:
//! a stdout writer, a pager, or a `Vec<String>` in tests.

use std::io::Write;

use crate::error::SinkError;

/// Consumer of rendered lines.
///
/// `line` never contains a line terminator; the sink adds its own.
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError>;
}

impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        self.push(line.to_string());
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        (**self).write_line(line)
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        (**self).write_line(line)
    }
}

/// A sink over any [`Write`], flushing after every line so output shows up
/// as soon as it is rendered.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        self.inner.write_all(line.as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sink_appends_newlines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("one").unwrap();
        sink.write_line("").unwrap();
        sink.write_line("three").unwrap();
        assert_eq!(sink.into_inner(), b"one\n\nthree\n");
    }

    #[test]
    fn test_writer_sink_reports_closed_reader() {
        let mut sink = WriterSink::new(ClosedPipe);
        let err = sink.write_line("lost").unwrap_err();
        assert!(matches!(err, SinkError::ReaderClosed));
    }

    #[test]
    fn test_sink_through_mut_reference() {
        let mut lines: Vec<String> = Vec::new();
        {
            let mut by_ref = &mut lines;
            by_ref.write_line("a").unwrap();
        }
        assert_eq!(lines, vec!["a"]);
    }
}
