use std::io::{self, BufWriter, Write};
use std::process::{Child, ChildStdin, ExitStatus, Stdio};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info};
use wait_timeout::ChildExt;

use crate::shell::shell_command;

/// How long to wait for the pager in one go before checking again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum PagerError {
    #[error("failed to start pager `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("pager closed its input")]
    ReaderClosed,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PagerError {
    fn from_write(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::BrokenPipe {
            PagerError::ReaderClosed
        } else {
            PagerError::Io(err)
        }
    }
}

fn lock(child: &Mutex<Child>) -> MutexGuard<'_, Child> {
    child.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A pager process fed line by line through its standard input.
///
/// The pager inherits standard output and standard error, so it draws on
/// the terminal directly.
#[derive(Debug)]
pub struct Pager {
    command: String,
    stdin: Option<BufWriter<ChildStdin>>,
    child: Arc<Mutex<Child>>,
}

impl Pager {
    /// Starts `command` through the platform shell.
    pub fn spawn(command: &str) -> Result<Self, PagerError> {
        let mut child = shell_command(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| PagerError::Spawn {
                command: command.to_string(),
                source,
            })?;
        info!(command, pid = child.id(), "pager started");

        let stdin = child.stdin.take().map(BufWriter::new);
        Ok(Self {
            command: command.to_string(),
            stdin,
            child: Arc::new(Mutex::new(child)),
        })
    }

    /// A handle that can stop the pager from another thread.
    pub fn handle(&self) -> PagerHandle {
        PagerHandle {
            child: Arc::clone(&self.child),
        }
    }

    /// Sends one line to the pager.
    ///
    /// Fails with [`PagerError::ReaderClosed`] once the pager has exited.
    pub fn write_line(&mut self, line: &str) -> Result<(), PagerError> {
        let stdin = self.stdin.as_mut().ok_or(PagerError::ReaderClosed)?;
        stdin
            .write_all(line.as_bytes())
            .and_then(|()| stdin.write_all(b"\n"))
            .and_then(|()| stdin.flush())
            .map_err(PagerError::from_write)
    }

    /// Closes the pager's input and waits for it to exit.
    pub fn finish(mut self) -> Result<ExitStatus, PagerError> {
        if let Some(mut stdin) = self.stdin.take() {
            match stdin.flush() {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("pager exited before reading all input");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let status = loop {
            // release the lock between polls so a terminate call can get in
            if let Some(status) = lock(&self.child).wait_timeout(POLL_INTERVAL)? {
                break status;
            }
        };
        info!(command = %self.command, ?status, "pager exited");
        Ok(status)
    }
}

/// Shared handle to a running pager.
#[derive(Debug, Clone)]
pub struct PagerHandle {
    child: Arc<Mutex<Child>>,
}

impl PagerHandle {
    /// Kills the pager and waits up to `grace` for it to go away.
    ///
    /// Returns the exit status, or `None` if the pager is still around
    /// when the grace period runs out.
    pub fn terminate(&self, grace: Duration) -> Result<Option<ExitStatus>, PagerError> {
        let deadline = Instant::now() + grace;
        {
            let mut child = lock(&self.child);
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            child.kill()?;
        }
        info!("pager terminated");

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let status = lock(&self.child).wait_timeout(remaining.min(POLL_INTERVAL))?;
            if status.is_some() || remaining.is_zero() {
                return Ok(status);
            }
        }
    }
}
