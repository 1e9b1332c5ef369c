//! I/O boundary traits for testability
//!
//! These traits abstract terminal input and output, allowing services
//! to be tested with scripted implementations.

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, trace};

use crate::config::InputMode;
use crate::domain::EffectSink;

/// Interactive question/answer abstraction.
pub trait Prompter: Send + Sync {
    /// Show `text` and block for a single character answer.
    /// Returns `None` when input is exhausted.
    fn prompt(&self, text: &str) -> io::Result<Option<char>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Prompter writing to stdout and reading from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompter {
    mode: InputMode,
}

impl TerminalPrompter {
    pub fn new(mode: InputMode) -> Self {
        Self { mode }
    }

    /// Effective mode: key reads need a terminal on stdin.
    fn effective_mode(&self) -> InputMode {
        match self.mode {
            InputMode::Key if io::stdin().is_terminal() => InputMode::Key,
            _ => InputMode::Line,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn prompt(&self, text: &str) -> io::Result<Option<char>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", text)?;
        stdout.flush()?;

        let mode = self.effective_mode();
        trace!(?mode, "reading answer");
        let answer = match mode {
            InputMode::Key => read_key(),
            InputMode::Line => read_line_char(&mut io::stdin().lock()),
        };

        writeln!(stdout)?;
        answer
    }
}

/// Read a single keypress in raw mode.
///
/// Ctrl+C does not raise SIGINT in raw mode; it is reported as `Interrupted`.
fn read_key() -> io::Result<Option<char>> {
    terminal::enable_raw_mode()?;
    let key = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break key_answer(key),
            Ok(_) => continue,
            Err(e) => break Err(e),
        }
    };
    terminal::disable_raw_mode()?;
    key.map(Some)
}

/// Character answered by a keypress. Keys without one (arrows, F-keys) yield `'\0'`.
fn key_answer(key: KeyEvent) -> io::Result<char> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted by Ctrl+C"))
        }
        KeyCode::Char(c) => Ok(c),
        KeyCode::Enter => Ok('\n'),
        KeyCode::Esc => Ok('\u{1b}'),
        _ => Ok('\0'),
    }
}

/// First non-blank character of the next line; a blank line yields `'\n'`.
pub fn read_line_char<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<Option<char>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        debug!("stdin closed");
        return Ok(None);
    }
    Ok(Some(line.trim().chars().next().unwrap_or('\n')))
}

/// Effect sink printing each line to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl EffectSink for StdoutSink {
    fn emit(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn given_line_with_padding_when_reading_then_first_non_blank_char() {
        let mut input = Cursor::new("   yes please\nno\n");
        assert_eq!(read_line_char(&mut input).unwrap(), Some('y'));
        assert_eq!(read_line_char(&mut input).unwrap(), Some('n'));
        assert_eq!(read_line_char(&mut input).unwrap(), None);
    }

    #[test]
    fn given_keys_without_char_when_answering_then_non_affirmative_char() {
        for code in [KeyCode::Up, KeyCode::F(5), KeyCode::Tab, KeyCode::Backspace] {
            let answer = key_answer(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
            assert_eq!(answer, '\0', "{code:?}");
        }
        let shifted = KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT);
        assert_eq!(key_answer(shifted).unwrap(), 'Y');
    }

    #[test]
    fn given_ctrl_c_when_answering_then_interrupted() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let err = key_answer(ctrl_c).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }

    #[test]
    fn given_blank_line_when_reading_then_newline() {
        let mut input = Cursor::new("\n");
        assert_eq!(read_line_char(&mut input).unwrap(), Some('\n'));
    }
}
