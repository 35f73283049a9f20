//! Ctrl+C handling.
//!
//! An interrupt stops the pager if one is running, tells the user, and
//! exits with the conventional interrupt code.

use std::io::IsTerminal;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use mdcolor_pipe::PagerHandle;
use tracing::{debug, warn};

/// Exit code after an interrupt.
pub const EXIT_INTERRUPTED: u8 = 130;

/// How long to wait for a killed pager before exiting anyway.
const PAGER_GRACE: Duration = Duration::from_secs(2);

/// The pager currently running, if any, shared with the interrupt handler.
#[derive(Debug, Clone, Default)]
pub struct ActivePager {
    slot: Arc<Mutex<Option<PagerHandle>>>,
}

impl ActivePager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, handle: PagerHandle) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    pub fn clear(&self) -> Option<PagerHandle> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

/// Installs the process-wide interrupt handler.
pub fn install(active: ActivePager) {
    let result = ctrlc::set_handler(move || {
        if let Some(handle) = active.clear() {
            if let Err(err) = handle.terminate(PAGER_GRACE) {
                debug!(error = %err, "failed to stop pager");
            }
        }

        let reset = if std::io::stderr().is_terminal() { "\x1b[0m" } else { "" };
        eprintln!("{}\nExiting.", reset);
        std::process::exit(i32::from(EXIT_INTERRUPTED));
    });

    if let Err(err) = result {
        warn!(error = %err, "could not install interrupt handler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_pager_starts_empty() {
        assert!(ActivePager::new().clear().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_active_pager_hands_out_handle_once() {
        let pager = mdcolor_pipe::Pager::spawn("cat > /dev/null").unwrap();
        let active = ActivePager::new();
        active.set(pager.handle());

        let shared = active.clone();
        assert!(shared.clear().is_some());
        assert!(active.clear().is_none());

        assert!(pager.finish().unwrap().success());
    }
}
