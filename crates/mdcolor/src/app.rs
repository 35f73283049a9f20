//! The command: pick input and output, render, and work out the exit code.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitStatus;

use anyhow::{Context, Result};
use mdcolor_pipe::{Pager, PagerError};
use mdcolor_render::terminal::{stdout_is_terminal, terminal_width};
use mdcolor_render::{
    default_highlighter, engine_available, run as render, LineSink, NoHighlighter, RenderConfig,
    RenderError, SinkError, Styles, WriterSink, ENGINE_NOTICE, RESET,
};
use tracing::{debug, info};

use crate::args::{Args, ColorChoice};
use crate::interrupt::{self, ActivePager, EXIT_INTERRUPTED};

/// Exit code for a normal run.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code when the output reader went away before the end.
pub const EXIT_READER_CLOSED: u8 = 141;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

/// Builds the rendering configuration from the arguments.
pub fn build_config(args: &Args) -> Result<RenderConfig> {
    let colored = match args.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::colors_enabled(),
    };

    let config = if colored {
        let styles = match &args.theme {
            Some(path) => Styles::from_file(path)?,
            None => Styles::new(),
        };
        RenderConfig::new(styles, default_highlighter(&args.highlight_theme))
    } else {
        RenderConfig::new(Styles::plain(), Box::new(NoHighlighter))
    };

    Ok(config.with_width(args.width.or_else(terminal_width)))
}

/// Runs the command, returning the process exit code.
pub fn run(args: &Args) -> Result<u8> {
    let (input, should_page): (Box<dyn BufRead>, bool) = match args.input_file() {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.to_path_buf()).into());
            }
            let file = File::open(path)
                .with_context(|| format!("Error opening file {}", path.display()))?;
            let page = !args.no_pager && stdout_is_terminal();
            (Box::new(BufReader::new(file)), page)
        }
        None => {
            if !engine_available() && !io::stdin().is_terminal() {
                eprintln!("{}", ENGINE_NOTICE);
            }
            (Box::new(io::stdin().lock()), false)
        }
    };

    let config = build_config(args)?;
    debug!(width = ?config.width, paging = should_page, "starting render");

    let active = ActivePager::new();
    interrupt::install(active.clone());

    if should_page {
        render_paged(input, &config, &args.pager, &active)
    } else {
        let piped = !stdout_is_terminal();
        render_direct(input, io::stdout().lock(), &config, piped)
    }
}

/// Renders straight to `out`. Styled output into a pipe ends with a reset
/// so whatever reads it is not left with an open style.
fn render_direct<W: Write>(
    input: impl BufRead,
    out: W,
    config: &RenderConfig,
    piped: bool,
) -> Result<u8> {
    let mut sink = WriterSink::new(out);
    let outcome = render(input, &mut sink, config);

    if matches!(outcome, Err(RenderError::ReaderClosed)) {
        debug!("stdout closed");
        return Ok(EXIT_READER_CLOSED);
    }
    if piped && config.styles.is_enabled() {
        let mut out = sink.into_inner();
        let written = out.write_all(RESET.as_bytes()).and_then(|()| out.flush());
        if let Err(err) = written {
            if err.kind() == io::ErrorKind::BrokenPipe {
                return Ok(EXIT_READER_CLOSED);
            }
            return Err(err).context("writing to stdout failed");
        }
    }

    outcome.context("rendering failed")?;
    Ok(EXIT_SUCCESS)
}

fn render_paged(
    input: Box<dyn BufRead>,
    config: &RenderConfig,
    command: &str,
    active: &ActivePager,
) -> Result<u8> {
    let pager = Pager::spawn(command)?;
    active.set(pager.handle());

    let mut sink = PagerSink(pager);
    let outcome = render(input, &mut sink, config);
    let status = sink.0.finish()?;
    active.clear();

    match outcome {
        Ok(()) => Ok(pager_exit_code(status).unwrap_or(EXIT_SUCCESS)),
        Err(RenderError::ReaderClosed) => {
            info!("pager closed before the end of input");
            Ok(pager_exit_code(status).unwrap_or(EXIT_READER_CLOSED))
        }
        Err(err) => Err(err).context("rendering failed"),
    }
}

/// The pager's own exit code, when it should become ours.
///
/// A clean exit, or 130 (the pager saw the same interrupt we did), does not.
fn pager_exit_code(status: ExitStatus) -> Option<u8> {
    let code = status.code()?;
    if code == 0 || code == i32::from(EXIT_INTERRUPTED) {
        return None;
    }
    Some(u8::try_from(code).unwrap_or(1))
}

/// Feeds rendered lines to the pager.
struct PagerSink(Pager);

impl LineSink for PagerSink {
    fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        self.0.write_line(line).map_err(|err| match err {
            PagerError::ReaderClosed => SinkError::ReaderClosed,
            PagerError::Io(err) | PagerError::Spawn { source: err, .. } => SinkError::Io(err),
        })
    }
}
