use std::time::{Duration, Instant};

use crate::food::{FoodSpawner, RandomFood};
use crate::high_score::HighScoreStore;
use crate::snake::{Direction::{*, self}, Position};
use crate::state::{on_grid, Frame, GameState, MarkerKind, TickOutcome};
use crate::term::{TermManager, BOARD_HEIGHT, BOARD_WIDTH};

use color_eyre::eyre::{eyre, Result};
use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use log::info;
use rand::rngs::StdRng;

const SNAKE_BODY_CHAR: char = '█';
const SNAKE_HEAD_CHAR: char = '▓';
const APPLE_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

/// What the player asked for while waiting on the next tick.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Steer(Direction),
    Quit,
}

pub struct SnakeGame<S: HighScoreStore> {
    term: TermManager,
    tick_interval: Duration,
    state: Option<GameState<RandomFood<StdRng>, S>>,
    drawn: Vec<Position>,
}

impl<S: HighScoreStore> SnakeGame<S> {
    pub fn new(tick_interval: Duration, food: RandomFood<StdRng>, store: S) -> Result<Self> {
        Ok(SnakeGame {
            term: TermManager::new()?,
            tick_interval,
            state: Some(GameState::new(food, store)),
            drawn: vec![],
        })
    }

    pub fn initialize(&mut self) -> Result<()> {
        if !self.term.fits_board() {
            let (w, h) = self.term.get_terminal_size();
            return Err(eyre!(
                "terminal is {}x{}, the board needs at least {}x{}",
                w, h, BOARD_WIDTH, BOARD_HEIGHT + 1
            ));
        }

        self.term.setup()?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    /// Plays sessions back to back until the player quits.
    pub fn run(&mut self) -> Result<()> {
        if !self.show_intro()? {
            return Ok(());
        }

        loop {
            if !self.play()? {
                return Ok(());
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn show_intro(&mut self) -> Result<bool> {
        self.term.clear()?;
        self.term.draw_borders()?;
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ])?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;
        Ok(!is_ctrl_c(&key))
    }

    /// One session. Returns whether the player wants another one.
    fn play(&mut self) -> Result<bool> {
        let mut state = match self.state.take() {
            Some(state) => state,
            None => return Err(eyre!("no game state to play with")),
        };

        self.term.clear()?;
        self.term.draw_borders()?;
        self.drawn.clear();
        self.draw_status(state.score(), state.high_score())?;
        self.term.flush()?;

        info!(
            "new session, snake at {:?} moving {:?}, food at {:?}, high score {}",
            state.head(), state.velocity(), state.food(), state.high_score()
        );

        let mut next_tick = Instant::now() + self.tick_interval;

        loop {
            let inputs = self.wait_for_tick(next_tick)?;
            if !apply_inputs(&mut state, inputs) {
                return Ok(false);
            }
            next_tick += self.tick_interval;

            match state.tick() {
                TickOutcome::Frame(frame) => {
                    self.draw_frame(&frame)?;
                    if state.is_over() {
                        info!("snake bit itself at {:?}, stopping on the next tick", state.head());
                    }
                },
                TickOutcome::HitWall => {},
                TickOutcome::GameOver => break,
            }
        }

        info!(
            "game over ({:?}), score {} (high {})",
            state.crash(), state.score(), state.high_score()
        );
        let again = self.game_over(&state)?;
        self.state = Some(state.reset());
        Ok(again)
    }

    /// Collects inputs until `deadline`.
    fn wait_for_tick(&mut self, deadline: Instant) -> Result<Vec<Input>> {
        let mut inputs = vec![];

        loop {
            let now = Instant::now();
            if now >= deadline {
                return Ok(inputs);
            }

            for key_ev in self.term.read_key_events(deadline - now)? {
                if let Some(input) = to_input(&key_ev) {
                    inputs.push(input);
                }
            }
        }
    }

    fn draw_frame(&mut self, frame: &Frame) -> Result<()> {
        for pos in std::mem::take(&mut self.drawn) {
            self.term.print_cell(pos, ' ')?;
        }

        let mut head_drawn = false;
        for marker in &frame.markers {
            let ch = match marker.kind {
                MarkerKind::Food => APPLE_CHAR,
                MarkerKind::Segment if !head_drawn => {
                    head_drawn = true;
                    SNAKE_HEAD_CHAR
                },
                MarkerKind::Segment => SNAKE_BODY_CHAR,
            };
            self.term.print_cell(marker.pos, ch)?;
            self.drawn.push(marker.pos);
        }

        if frame.score_changed {
            self.draw_status(frame.score, frame.high_score)?;
        }

        self.term.flush()?;
        Ok(())
    }

    fn draw_status(&mut self, score: u32, high_score: u32) -> Result<()> {
        self.term.draw_status(&format!("Score: {}  High Score: {}", score, high_score))?;
        Ok(())
    }

    fn game_over(&mut self, state: &GameState<RandomFood<StdRng>, S>) -> Result<bool> {
        let (score, high_score) = (state.score(), state.high_score());

        // After a wall hit the head is off the board
        for pos in state.body().iter().filter(|pos| on_grid(**pos)) {
            self.term.print_cell(*pos, DEAD_SNAKE_CHAR)?;
        }

        self.term.show_message(&[
            "Game over!",
            &*format!("Score: {}", score),
            &*format!("High Score: {}", high_score),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;

        let key = self.term.read_key_blocking()?;
        self.term.hide_message()?;
        Ok(!is_ctrl_c(&key))
    }
}

/// Applies direction requests in arrival order, all before the next tick
/// reads the velocity. Returns false if the player asked to quit.
fn apply_inputs<F: FoodSpawner, S: HighScoreStore>(
    state: &mut GameState<F, S>,
    inputs: Vec<Input>,
) -> bool {
    for input in inputs {
        match input {
            Input::Steer(dir) => state.set_direction(dir),
            Input::Quit => return false,
        }
    }
    true
}

fn to_input(ev: &KeyEvent) -> Option<Input> {
    if is_ctrl_c(ev) {
        return Some(Input::Quit);
    }

    let dir = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Up,
        KeyCode::Char('a') | KeyCode::Left => Left,
        KeyCode::Char('s') | KeyCode::Down => Down,
        KeyCode::Char('d') | KeyCode::Right => Right,
        _ => return None,
    };
    Some(Input::Steer(dir))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
