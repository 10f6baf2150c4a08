use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::geometry::Rectangle;
use crate::pellet::Pellet;
use crate::snake::{Direction, Player};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

/// What a single frame did to the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    Ate,
    Crashed(Collision),
    /// The game was already over, nothing changed.
    Halted,
}

pub struct GameState {
    board: Rectangle,
    player: Player,
    pellet: Pellet,
    score: u32,
    game_over: bool,
    rng: StdRng,
}

impl GameState {
    pub fn new(board: Rectangle) -> Self {
        Self::with_rng(board, StdRng::from_entropy())
    }

    /// Single segment snake on the board's center, standing still, with a pellet
    /// somewhere else on the board.
    pub fn with_rng(board: Rectangle, mut rng: StdRng) -> Self {
        let player = Player::new(board.center());
        let pellet = Pellet::generate(&board, &player, &mut rng);

        GameState { board, player, pellet, score: 0, game_over: false, rng }
    }

    /// A fresh game on the same board. This is the only way out of game over.
    pub fn restarted(&self) -> Self {
        GameState::new(self.board)
    }

    pub fn board(&self) -> &Rectangle {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn pellet(&self) -> &Pellet {
        &self.pellet
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Advances one frame: turn, move, eat, then check for a crash.
    pub fn step(&mut self, turn: Option<Direction>) -> StepResult {
        if self.game_over {
            return StepResult::Halted;
        }

        if let Some(direction) = turn {
            if !self.player.turn(direction) {
                debug!("Ignoring reversal {:?} while heading {:?}", direction, self.player.direction());
            }
        }

        let head = self.player.move_step(self.pellet.position());

        let mut result = StepResult::Moved;
        if head == self.pellet.position() {
            self.score += 1;
            self.pellet = Pellet::generate(&self.board, &self.player, &mut self.rng);
            debug!("Pellet eaten at {:?}, score {}, next pellet at {:?}", head, self.score, self.pellet.position());
            result = StepResult::Ate;
        }

        if let Some(collision) = self.collision() {
            self.game_over = true;
            self.player.freeze();
            info!("Game over: {:?} at {:?}, score {}, length {}", collision, head, self.score, self.player.len());
            result = StepResult::Crashed(collision);
        }

        result
    }

    pub fn collision(&self) -> Option<Collision> {
        if !self.board.within(self.player.head()) {
            Some(Collision::Wall)
        } else if self.player.hits_itself() {
            Some(Collision::SelfHit)
        } else {
            None
        }
    }
}
