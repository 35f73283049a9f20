//! The `mdcolor` command.
//!
//! Reads Markdown from a file or standard input and writes it to the
//! terminal with ANSI styling, paging through `less -R` when a file is shown
//! on a terminal. Rendering itself lives in `mdcolor-render`; the pager in
//! `mdcolor-pipe`. This crate is the glue: arguments, input selection, the
//! paging decision, logging, interrupts and exit codes.
//!
//! Exit codes:
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | rendered everything |
//! | 1    | missing or unreadable file, bad stylesheet, other failure |
//! | 130  | interrupted |
//! | 141  | the reader (pager or pipe) went away early |
//!
//! A pager that exits with a code of its own (other than 130) passes it on.

pub mod app;
pub mod args;
pub mod interrupt;
pub mod logging;

pub use args::{Args, ColorChoice};
