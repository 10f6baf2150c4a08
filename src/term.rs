use std::convert::TryFrom;
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::geometry::{Position, Rectangle};
use crate::pellet::PELLET_CHAR;
use crate::state::GameState;

const SNAKE_BODY_CHAR: char = '*';
const SNAKE_COLOR: Color = Color::Green;
const PELLET_COLOR: Color = Color::Red;

/// Owns the terminal for the duration of a session. Everything that touches the
/// screen goes through here.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size().context("Error reading terminal size")
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Waits up to `timeout` for a key press. Other events (resizes, mouse) are
    /// skipped without ending the wait early.
    pub fn read_key(&self, timeout: Duration) -> Result<Option<KeyEvent>> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !poll(remaining).context("Error polling for input")? {
                return Ok(None);
            }

            if let Event::Key(ev) = read().context("Error reading input")? {
                return Ok(Some(ev));
            }
        }
    }

    /// Redraws the whole frame from `state`.
    pub fn draw(&mut self, state: &GameState) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;

        let board = state.board();
        self.draw_borders(board)?;

        self.print_at(state.pellet().position(), PELLET_CHAR, Some(PELLET_COLOR))?;

        let player = state.player();
        for part in player.body().iter().skip(1) {
            self.print_at(*part, SNAKE_BODY_CHAR, Some(SNAKE_COLOR))?;
        }
        self.print_at(player.head(), player.head_char(), Some(SNAKE_COLOR))?;

        let status_at = Position::new(board.start().x, board.end().y + 2);
        self.print_str_at(status_at, &format!("Score: {}", state.score()))?;
        if state.is_game_over() {
            self.print_str_at(status_at + Position::new(0, 1), "Game Over (r to restart, q to quit)")?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self, board: &Rectangle) -> Result<()> {
        let (start, end) = (board.start(), board.end());
        let horizontal = "━".repeat(board.width() as usize);

        self.print_str_at(start + Position::new(-1, -1), &format!("┏{}┓", horizontal))?;
        self.print_str_at(Position::new(start.x - 1, end.y + 1), &format!("┗{}┛", horizontal))?;

        for y in start.y..=end.y {
            self.print_at(Position::new(start.x - 1, y), '┃', None)?;
            self.print_at(Position::new(end.x + 1, y), '┃', None)?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: Position, ch: char, color: Option<Color>) -> Result<()> {
        let (x, y) = match to_cell(pos) {
            Some(cell) => cell,
            None => return Ok(()),
        };

        queue!(self.stdout, cursor::MoveTo(x, y)).context("Error moving cursor")?;
        let res = match color {
            Some(color) => queue!(self.stdout, SetForegroundColor(color), Print(ch), ResetColor),
            None => queue!(self.stdout, Print(ch)),
        };

        res.context("Error printing")
    }

    fn print_str_at(&mut self, pos: Position, text: &str) -> Result<()> {
        if let Some((x, y)) = to_cell(pos) {
            queue!(self.stdout, cursor::MoveTo(x, y), Print(text)).context("Error printing")?;
        }
        Ok(())
    }
}

// Cells left or above the terminal origin can't be drawn.
fn to_cell(pos: Position) -> Option<(u16, u16)> {
    Some((u16::try_from(pos.x).ok()?, u16::try_from(pos.y).ok()?))
}
