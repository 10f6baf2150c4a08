mod config;
mod game;
mod geometry;
mod pellet;
mod snake;
mod state;
mod term;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use config::{GameSettings, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_FRAME_DELAY_MS};

/// Snake game
#[derive(Parser, Debug)]
#[command(name = "term-snake", version, disable_help_flag = true)]
struct Cli {
    /// Height of the game board.
    #[arg(short = 'h', long, default_value_t = DEFAULT_BOARD_HEIGHT, allow_negative_numbers = true)]
    board_height: i32,

    /// Width of the game board.
    #[arg(short = 'w', long, default_value_t = DEFAULT_BOARD_WIDTH, allow_negative_numbers = true)]
    board_width: i32,

    /// Speed of the game in milliseconds per frame.
    #[arg(short = 's', long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
    game_speed: u64,

    /// Write a log to this file. The screen is taken by the game, so nothing is logged without it.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level for --log-file.
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    fn settings(&self) -> GameSettings {
        GameSettings {
            board_height: self.board_height,
            board_width: self.board_width,
            frame_delay: self.game_speed,
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("Error creating log file {}", path.display()))?;
        WriteLogger::init(cli.log_level, Config::default(), file).context("Error initializing logger")?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut game = game::SnakeGame::new(cli.settings())?;

    // The game loop returns once the player quits
    game.run()
}
