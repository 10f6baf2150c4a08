use std::collections::VecDeque;

use crate::geometry::Position;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Not moving. Fresh snakes start here, and a crash freezes the snake back into it.
    Idle,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> Position {
        match self {
            Idle => Position::new(0, 0),
            Up => Position::new(0, -1),
            Down => Position::new(0, 1),
            Left => Position::new(-1, 0),
            Right => Position::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Idle => Idle,
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

pub struct Player {
    body: VecDeque<Position>,
    direction: Direction,
}

impl Player {
    pub fn new(head: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        Player { body, direction: Idle }
    }

    /// Builds a snake from its segments, head first.
    #[cfg(test)]
    pub fn from_segments(segments: &[Position], direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least a head");
        Player { body: segments.iter().copied().collect(), direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns false, leaving the direction alone, when `new_direction` would
    /// reverse the snake into its own neck.
    pub fn turn(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.direction.opposite() && new_direction != self.direction {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Pushes the new head and drops the tail, unless the new head lands on the
    /// pellet. Skipping the tail removal is what grows the snake.
    pub fn move_step(&mut self, pellet: Position) -> Position {
        let new_head = self.head() + self.direction.delta();
        self.body.push_front(new_head);

        if new_head != pellet {
            self.body.pop_back();
        }

        new_head
    }

    pub fn hits_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|part| *part == head)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn freeze(&mut self) {
        self.direction = Idle;
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
            Idle => 'X',
        }
    }
}
