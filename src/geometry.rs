use std::cmp::Ordering;
use std::ops::Add;

use crate::config::ConfigError;

/// A cell on the terminal grid. Also used as a movement vector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

// Componentwise: `a <= b` only when both coordinates are <=.
impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.x.cmp(&other.x), self.y.cmp(&other.y)) {
            (Ordering::Equal, Ordering::Equal) => Some(Ordering::Equal),
            (Ordering::Less, Ordering::Greater) | (Ordering::Greater, Ordering::Less) => None,
            (Ordering::Less, _) | (_, Ordering::Less) => Some(Ordering::Less),
            _ => Some(Ordering::Greater),
        }
    }
}

/// Inclusive rectangle, `start` is the top-left cell and `end` the bottom-right one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rectangle {
    start: Position,
    end: Position,
}

impl Rectangle {
    pub fn new(start: Position, end: Position) -> Result<Self, ConfigError> {
        if !(start <= end) {
            return Err(ConfigError::InvertedRectangle { start, end });
        }

        Ok(Rectangle { start, end })
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn width(&self) -> i32 {
        self.end.x - self.start.x + 1
    }

    pub fn height(&self) -> i32 {
        self.end.y - self.start.y + 1
    }

    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Cell the snake spawns on.
    pub fn center(&self) -> Position {
        self.start + Position::new(self.width() / 2, self.height() / 2)
    }

    pub fn within(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}
