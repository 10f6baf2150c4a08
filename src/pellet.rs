use rand::Rng;

use crate::geometry::{Position, Rectangle};
use crate::snake::Player;

pub const PELLET_CHAR: char = 'O';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pellet {
    position: Position,
}

impl Pellet {
    /// Places a pellet on a uniformly random cell of `board` not covered by `player`.
    ///
    /// Rejection sampling with no retry limit: this only terminates while the board
    /// has a free cell, which normal play never runs out of.
    pub fn generate<R: Rng + ?Sized>(board: &Rectangle, player: &Player, rng: &mut R) -> Self {
        debug_assert!(player.len() < board.area(), "no free cell left for a pellet");

        let (start, end) = (board.start(), board.end());
        loop {
            let candidate = Position::new(rng.gen_range(start.x..=end.x), rng.gen_range(start.y..=end.y));
            if !player.occupies(candidate) {
                return Pellet { position: candidate };
            }
        }
    }

    #[cfg(test)]
    pub fn at(position: Position) -> Self {
        Pellet { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}
