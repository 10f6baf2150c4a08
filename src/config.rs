use std::time::Duration;

use thiserror::Error;

use crate::geometry::{Position, Rectangle};

pub const DEFAULT_BOARD_HEIGHT: i32 = 17;
pub const DEFAULT_BOARD_WIDTH: i32 = 71;
pub const DEFAULT_FRAME_DELAY_MS: u64 = 100;

// One border cell on each side horizontally. Vertically a border above and below
// plus the score and game over rows.
const HORIZONTAL_CHROME: i32 = 2;
const VERTICAL_CHROME: i32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board {name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: i32 },
    #[error("terminal is {width}x{height} but the board needs at least {needed_width}x{needed_height}")]
    ScreenTooSmall {
        needed_width: i32,
        needed_height: i32,
        width: i32,
        height: i32,
    },
    #[error("a {width}x{height} board leaves no room for a pellet next to the snake")]
    NoRoomForPellet { width: i32, height: i32 },
    #[error("rectangle start {start:?} is not above and left of end {end:?}")]
    InvertedRectangle { start: Position, end: Position },
}

/// Per-session settings, fixed once the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub board_height: i32,
    pub board_width: i32,
    /// Milliseconds a frame waits for a key before advancing on its own.
    pub frame_delay: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            board_height: DEFAULT_BOARD_HEIGHT,
            board_width: DEFAULT_BOARD_WIDTH,
            frame_delay: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl GameSettings {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for &(name, value) in [("height", self.board_height), ("width", self.board_width)].iter() {
            if value <= 0 {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }

        // The snake starts on one cell, the pellet needs another
        if i64::from(self.board_width) * i64::from(self.board_height) < 2 {
            return Err(ConfigError::NoRoomForPellet { width: self.board_width, height: self.board_height });
        }

        Ok(())
    }

    /// Centers the board on a `screen_width` x `screen_height` terminal, leaving
    /// room for the border and the status rows under it.
    pub fn board(&self, screen_width: u16, screen_height: u16) -> Result<Rectangle, ConfigError> {
        self.validate()?;

        let (width, height) = (i32::from(screen_width), i32::from(screen_height));
        let needed_width = self.board_width + HORIZONTAL_CHROME;
        let needed_height = self.board_height + VERTICAL_CHROME;

        if width < needed_width || height < needed_height {
            return Err(ConfigError::ScreenTooSmall { needed_width, needed_height, width, height });
        }

        let start = Position::new((width - needed_width) / 2 + 1, (height - needed_height) / 2 + 1);
        let end = start + Position::new(self.board_width - 1, self.board_height - 1);

        Rectangle::new(start, end)
    }
}
