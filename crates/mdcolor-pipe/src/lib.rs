//! Pager support for mdcolor.
//!
//! Rendered output can be sent through an external pager (`less -R` by
//! default). The pager is started through the platform shell, fed one line
//! at a time, and either finished normally (input closed, exit awaited) or
//! terminated from an interrupt handler through a [`PagerHandle`].

pub mod pager;
pub mod shell;

pub use pager::{Pager, PagerError, PagerHandle};
pub use shell::shell_command;
