//! CoinChart CLI — configuration, logging and the interactive menu.
//!
//! The binary in `main.rs` only wires these together; everything here can be
//! driven with a fake provider, presenter and prompt.

pub mod config;
pub mod interrupt;
pub mod logging;
pub mod menu;
pub mod prompt;
pub mod session;

pub use config::{AppConfig, Overrides};
pub use menu::{Exit, Menu, MenuChoice};
pub use prompt::{LineInput, Prompt, ScriptedPrompt, TerminalPrompt};
pub use session::Session;
