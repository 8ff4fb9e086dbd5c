use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{cursor, execute};
use std::io::{self, Write};

/// A keypress, already decoded. Escape-sequence parsing (arrow keys versus a
/// lone escape) is the terminal backend's problem; the menu never sees raw
/// bytes or timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Esc,
    Char(char),
}

/// What the interactive menu needs from a terminal: blocking key reads,
/// full-frame redraws, and one line of typed input for the confirmation
/// gate. Implemented by the real terminal below and by a scripted double in
/// tests.
pub trait Console {
    fn read_key(&mut self) -> io::Result<Key>;
    fn render(&mut self, lines: &[String]) -> io::Result<()>;
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Crossterm-backed console. Raw mode is held for the lifetime of the value
/// and always released on drop, even when the menu bails out early.
pub struct RawConsole {
    last_height: u16,
}

impl RawConsole {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawConsole { last_height: 0 })
    }
}

impl Drop for RawConsole {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Console for RawConsole {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Up => return Ok(Key::Up),
                    KeyCode::Down => return Ok(Key::Down),
                    KeyCode::Enter => return Ok(Key::Enter),
                    KeyCode::Esc => return Ok(Key::Esc),
                    KeyCode::Char(c) => return Ok(Key::Char(c)),
                    _ => continue,
                }
            }
        }
    }

    fn render(&mut self, lines: &[String]) -> io::Result<()> {
        let mut out = io::stdout();

        // Clear exactly the previous frame, so a shorter frame leaves no
        // residue from a taller one.
        if self.last_height > 0 {
            execute!(
                out,
                cursor::MoveUp(self.last_height),
                cursor::MoveToColumn(0),
                Clear(ClearType::FromCursorDown)
            )?;
        }

        // Raw mode: \r\n, not \n.
        for line in lines {
            write!(out, "{line}\r\n")?;
        }
        out.flush()?;

        self.last_height = lines.len() as u16;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        // Cooked mode for the typed confirmation, so the operator gets echo
        // and line editing back.
        terminal::disable_raw_mode()?;
        let mut out = io::stdout();
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;

        terminal::enable_raw_mode()?;
        Ok(buffer.trim().to_string())
    }
}
