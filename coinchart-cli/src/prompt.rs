//! Line input for the menu.
//!
//! On a terminal, lines are read key by key in raw mode so that Ctrl-C
//! arrives as an ordinary key event instead of killing the process. Piped
//! input falls back to buffered line reads.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

/// Outcome of one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineInput {
    Line(String),
    /// Ctrl-C.
    Interrupted,
    /// End of input (Ctrl-D on an empty line, or a closed pipe).
    Eof,
}

pub trait Prompt {
    /// Show `prompt` and read one line of user input.
    fn read_line(&mut self, prompt: &str) -> io::Result<LineInput>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn read_line(&mut self, prompt: &str) -> io::Result<LineInput> {
        (**self).read_line(prompt)
    }
}

/// What the screen should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Echo {
    Nothing,
    Char(char),
    Erase,
}

/// Line buffer driven by key events.
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Feed one key. Returns the finished input once the line is complete.
    pub fn handle_key(&mut self, key: KeyEvent) -> (Echo, Option<LineInput>) {
        if key.kind == KeyEventKind::Release {
            return (Echo::Nothing, None);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => (Echo::Nothing, Some(LineInput::Interrupted)),
            KeyCode::Char('d') if ctrl => {
                if self.buffer.is_empty() {
                    (Echo::Nothing, Some(LineInput::Eof))
                } else {
                    (Echo::Nothing, None)
                }
            }
            KeyCode::Enter => (
                Echo::Nothing,
                Some(LineInput::Line(std::mem::take(&mut self.buffer))),
            ),
            KeyCode::Backspace => match self.buffer.pop() {
                Some(_) => (Echo::Erase, None),
                None => (Echo::Nothing, None),
            },
            KeyCode::Char(c) if !ctrl => {
                self.buffer.push(c);
                (Echo::Char(c), None)
            }
            _ => (Echo::Nothing, None),
        }
    }
}

/// Prompt on the process's stdin/stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    fn read_raw(&self, out: &mut impl Write) -> io::Result<LineInput> {
        enable_raw_mode()?;
        let result = Self::edit(out);
        let restored = disable_raw_mode();
        let input = result?;
        restored?;
        Ok(input)
    }

    fn edit(out: &mut impl Write) -> io::Result<LineInput> {
        let mut editor = LineEditor::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let (echo, done) = editor.handle_key(key);
            match echo {
                Echo::Char(c) => write!(out, "{c}")?,
                Echo::Erase => write!(out, "\u{8} \u{8}")?,
                Echo::Nothing => {}
            }
            if let Some(input) = done {
                if input == LineInput::Interrupted {
                    write!(out, "^C")?;
                }
                write!(out, "\r\n")?;
                out.flush()?;
                return Ok(input);
            }
            out.flush()?;
        }
    }

    fn read_buffered(&self) -> io::Result<LineInput> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(LineInput::Eof);
        }
        Ok(LineInput::Line(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<LineInput> {
        let mut out = io::stdout();
        write!(out, "{prompt}")?;
        out.flush()?;
        if io::stdin().is_terminal() {
            self.read_raw(&mut out)
        } else {
            self.read_buffered()
        }
    }
}

/// Replays canned inputs; reports `Eof` once they run out.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    inputs: VecDeque<LineInput>,
    prompts: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(inputs: impl IntoIterator<Item = LineInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Script made only of typed lines.
    pub fn lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self::new(lines.into_iter().map(|l| LineInput::Line(l.into())))
    }

    /// Every prompt shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> io::Result<LineInput> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front().unwrap_or(LineInput::Eof))
    }
}
