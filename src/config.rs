use std::{path::PathBuf, time::Duration};

use clap::Parser;
use simplelog::LevelFilter;

/// Snake on a 30x30 board. Arrow keys or WASD to steer, CTRL+C to quit.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// Milliseconds between two moves of the snake
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// File holding the high score
    #[arg(long, default_value = ".snake_high_score")]
    pub high_score_file: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    pub no_save: bool,

    /// File to write the log to
    #[arg(long, default_value = "snake.log")]
    pub log_file: PathBuf,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level `{}`", s))
}
