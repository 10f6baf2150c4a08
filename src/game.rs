use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{info, warn};

use crate::config::GameSettings;
use crate::snake::Direction::{self, *};
use crate::state::GameState;
use crate::term::TermManager;

/// What a key press means to the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Input {
    Turn(Direction),
    Restart,
    Quit,
    None,
}

impl From<&KeyEvent> for Input {
    fn from(ev: &KeyEvent) -> Self {
        if is_ctrl_c(ev) {
            return Input::Quit;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Input::Turn(Up),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Input::Turn(Left),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Input::Turn(Down),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Input::Turn(Right),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Input::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => Input::Restart,
            _ => Input::None,
        }
    }
}

pub struct SnakeGame {
    settings: GameSettings,
    term: TermManager,
    state: GameState,
}

impl SnakeGame {
    /// Fails on settings that don't fit the current terminal, before the screen
    /// is touched.
    pub fn new(settings: GameSettings) -> Result<Self> {
        let term = TermManager::new();
        let (width, height) = term.size()?;
        let board = settings.board(width, height)?;

        info!("Starting session with {:?} on a {}x{} terminal, board {:?}", settings, width, height, board);

        Ok(SnakeGame { settings, term, state: GameState::new(board) })
    }

    /// Runs frames until the player quits. The terminal is restored even when
    /// setup or a frame fails.
    pub fn run(&mut self) -> Result<()> {
        with_terminal(self, |game| game.term.setup(), SnakeGame::play, |game| game.term.restore())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> Result<()> {
        loop {
            self.term.draw(&self.state)?;

            let input = match self.term.read_key(self.settings.frame_delay())? {
                Some(ev) => Input::from(&ev),
                None => Input::None,
            };

            if apply(&mut self.state, input) {
                return Ok(());
            }
        }
    }
}

/// Feeds one frame's input to the game. Returns true once the player quits.
fn apply(state: &mut GameState, input: Input) -> bool {
    match input {
        Input::Quit => {
            info!("Quit with score {}", state.score());
            return true;
        }
        Input::Restart if state.is_game_over() => {
            info!("Restarting after scoring {}", state.score());
            *state = state.restarted();
        }
        // Frozen until restart or quit
        _ if state.is_game_over() => {}
        Input::Turn(direction) => {
            state.step(Some(direction));
        }
        Input::Restart | Input::None => {
            state.step(None);
        }
    }

    false
}

/// Runs `body` between `setup` and `restore`. `restore` also runs when `setup`
/// fails halfway, so a raw mode or alt screen it already switched on gets undone.
fn with_terminal<S>(
    ctx: &mut S,
    setup: fn(&mut S) -> Result<()>,
    body: fn(&mut S) -> Result<()>,
    restore: fn(&mut S) -> Result<()>,
) -> Result<()> {
    if let Err(e) = setup(ctx) {
        if let Err(restore_err) = restore(ctx) {
            warn!("Error restoring terminal after failed setup: {:#}", restore_err);
        }
        return Err(e);
    }

    let res = body(ctx);
    if let Err(e) = &res {
        warn!("Session ended with an error: {:#}", e);
    }

    restore(ctx)?;
    res
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Position, Rectangle};
    use anyhow::anyhow;
    use rand::{rngs::StdRng, SeedableRng};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn test_arrow_keys_and_wasd() {
        assert_eq!(Input::from(&key(KeyCode::Up)), Input::Turn(Up));
        assert_eq!(Input::from(&key(KeyCode::Down)), Input::Turn(Down));
        assert_eq!(Input::from(&key(KeyCode::Left)), Input::Turn(Left));
        assert_eq!(Input::from(&key(KeyCode::Right)), Input::Turn(Right));

        assert_eq!(Input::from(&key(KeyCode::Char('w'))), Input::Turn(Up));
        assert_eq!(Input::from(&key(KeyCode::Char('A'))), Input::Turn(Left));
        assert_eq!(Input::from(&key(KeyCode::Char('s'))), Input::Turn(Down));
        assert_eq!(Input::from(&key(KeyCode::Char('D'))), Input::Turn(Right));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(Input::from(&key(KeyCode::Char('q'))), Input::Quit);
        assert_eq!(Input::from(&key(KeyCode::Esc)), Input::Quit);

        let ctrl_c = KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(Input::from(&ctrl_c), Input::Quit);
    }

    #[test]
    fn test_restart_and_other_keys() {
        assert_eq!(Input::from(&key(KeyCode::Char('r'))), Input::Restart);
        assert_eq!(Input::from(&key(KeyCode::Char('R'))), Input::Restart);

        assert_eq!(Input::from(&key(KeyCode::Char('c'))), Input::None);
        assert_eq!(Input::from(&key(KeyCode::Enter)), Input::None);
        assert_eq!(Input::from(&key(KeyCode::Char(' '))), Input::None);
    }

    // Two cells: the snake spawns on the right one, the pellet takes the left one
    fn narrow_game() -> GameState {
        let board = Rectangle::new(Position::new(1, 1), Position::new(2, 1)).unwrap();
        GameState::with_rng(board, StdRng::seed_from_u64(3))
    }

    fn crashed_game() -> GameState {
        let mut state = narrow_game();
        assert!(!apply(&mut state, Input::Turn(Right)));
        assert!(state.is_game_over());
        state
    }

    #[test]
    fn test_narrow_game_layout() {
        let state = narrow_game();
        assert_eq!(state.player().head(), Position::new(2, 1));
        assert_eq!(state.pellet().position(), Position::new(1, 1));
    }

    #[test]
    fn test_restart_while_running_is_a_plain_frame() {
        let board = Rectangle::new(Position::new(1, 1), Position::new(5, 5)).unwrap();
        let mut state = GameState::with_rng(board, StdRng::seed_from_u64(9));

        assert!(!apply(&mut state, Input::Turn(Up)));
        assert_eq!(state.player().head(), Position::new(3, 2));

        // Keeps heading up instead of resetting to the center
        assert!(!apply(&mut state, Input::Restart));
        assert_eq!(state.player().head(), Position::new(3, 1));
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = crashed_game();

        assert!(!apply(&mut state, Input::Restart));

        assert!(!state.is_game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.player().len(), 1);
        assert_eq!(state.player().head(), Position::new(2, 1));
        assert_eq!(state.player().direction(), Idle);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut state = crashed_game();

        for &input in [Input::Turn(Left), Input::Turn(Up), Input::None].iter() {
            assert!(!apply(&mut state, input));
            assert!(state.is_game_over());
            assert_eq!(state.player().head(), Position::new(3, 1));
            assert_eq!(state.player().direction(), Idle);
        }
    }

    #[test]
    fn test_quit() {
        let mut state = narrow_game();
        assert!(apply(&mut state, Input::Quit));
        assert_eq!(state.player().head(), Position::new(2, 1));

        let mut state = crashed_game();
        assert!(apply(&mut state, Input::Quit));
        assert!(state.is_game_over());
    }

    #[derive(Default)]
    struct Calls {
        log: Vec<&'static str>,
        fail_setup: bool,
    }

    fn setup(calls: &mut Calls) -> Result<()> {
        calls.log.push("setup");
        if calls.fail_setup {
            return Err(anyhow!("raw mode unavailable"));
        }
        Ok(())
    }

    fn body(calls: &mut Calls) -> Result<()> {
        calls.log.push("body");
        Ok(())
    }

    fn failing_body(calls: &mut Calls) -> Result<()> {
        calls.log.push("body");
        Err(anyhow!("frame failed"))
    }

    fn restore(calls: &mut Calls) -> Result<()> {
        calls.log.push("restore");
        Ok(())
    }

    #[test]
    fn test_terminal_restored_after_failed_setup() {
        let mut calls = Calls { fail_setup: true, ..Calls::default() };

        let res = with_terminal(&mut calls, setup, body, restore);

        assert_eq!(res.unwrap_err().to_string(), "raw mode unavailable");
        assert_eq!(calls.log, vec!["setup", "restore"]);
    }

    #[test]
    fn test_terminal_restored_after_failed_frame() {
        let mut calls = Calls::default();

        let res = with_terminal(&mut calls, setup, failing_body, restore);

        assert_eq!(res.unwrap_err().to_string(), "frame failed");
        assert_eq!(calls.log, vec!["setup", "body", "restore"]);
    }

    #[test]
    fn test_terminal_session_in_order() {
        let mut calls = Calls::default();
        assert!(with_terminal(&mut calls, setup, body, restore).is_ok());
        assert_eq!(calls.log, vec!["setup", "body", "restore"]);
    }
}
