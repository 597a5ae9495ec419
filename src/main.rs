mod config;
mod food;
mod game;
mod high_score;
mod snake;
mod state;
mod term;

use std::fs::File;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use log::info;
use rand::Rng;
use simplelog::WriteLogger;

use crate::config::Config;
use crate::food::RandomFood;
use crate::high_score::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::parse();

    // The terminal is in raw mode for the whole run, so logs go to a file
    let log_file = File::create(&config.log_file)
        .wrap_err_with(|| format!("cannot create log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), log_file)
        .map_err(|e| eyre!("cannot start logging: {}", e))?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("starting snake, food seed {}", seed);

    let store: Box<dyn HighScoreStore> = if config.no_save {
        Box::new(MemoryHighScoreStore::default())
    } else {
        Box::new(FileHighScoreStore::new(&config.high_score_file))
    };

    let mut game = game::SnakeGame::new(config.tick_interval(), RandomFood::seeded(seed), store)?;
    game.initialize()?;

    // Whatever happened, give the terminal back before reporting it
    let res = game.run();
    game.restore()?;
    res
}
