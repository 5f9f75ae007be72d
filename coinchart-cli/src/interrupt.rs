//! Process-wide Ctrl-C handling.
//!
//! Raw-mode prompts and the chart view read Ctrl-C as a key. Everywhere
//! else (a blocking fetch, piped stdin) SIGINT arrives as a signal, and this
//! handler turns it into the same clean exit.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, is_raw_mode_enabled};
use std::io::{self, Write};

use crate::menu::INTERRUPT_GOODBYE;

/// Restore the terminal, say goodbye and exit 0 on SIGINT.
pub fn install_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        if is_raw_mode_enabled().unwrap_or(false) {
            let _ = disable_raw_mode();
        }
        let mut out = io::stdout().lock();
        let _ = write!(out, "\n{INTERRUPT_GOODBYE}\n");
        let _ = out.flush();
        std::process::exit(0);
    })
    .context("failed to install the Ctrl-C handler")
}
