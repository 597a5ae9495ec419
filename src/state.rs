use log::{debug, info};

use crate::food::FoodSpawner;
use crate::high_score::HighScoreStore;
use crate::snake::{Direction, Position, Snake, Velocity};

pub const GRID_SIZE: i32 = 30;
pub const START_POSITION: Position = Position::new(5, 5);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Food,
    Segment,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub pos: Position,
}

/// Everything the renderer needs for one tick: the food marker first, then one
/// marker per segment, head first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub markers: Vec<Marker>,
    pub score: u32,
    pub high_score: u32,
    pub score_changed: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Crash {
    Wall,
    SelfCollision,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The board moved. The snake may have just bitten itself, in which case
    /// the next tick ends the session.
    Frame(Frame),
    /// The head left the grid. Nothing to draw; the next tick ends the session.
    HitWall,
    /// The session is over. No state was touched.
    GameOver,
}

/// One play session: the snake, its food, the score and the game over flag.
pub struct GameState<F: FoodSpawner, S: HighScoreStore> {
    snake: Snake,
    food: Position,
    score: u32,
    high_score: u32,
    crash: Option<Crash>,
    spawner: F,
    store: S,
}

impl<F: FoodSpawner, S: HighScoreStore> GameState<F, S> {
    pub fn new(mut spawner: F, store: S) -> Self {
        let food = spawner.spawn();
        let high_score = store.load();

        GameState {
            snake: Snake::new(START_POSITION),
            food,
            score: 0,
            high_score,
            crash: None,
            spawner,
            store,
        }
    }

    /// Starts a fresh session with the same food source and store.
    pub fn reset(self) -> Self {
        GameState::new(self.spawner, self.store)
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if !self.snake.set_direction(direction) {
            debug!("ignoring {:?}, snake is moving {:?}", direction, self.snake.velocity());
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.crash.is_some() {
            return TickOutcome::GameOver;
        }

        let food_marker = Marker { kind: MarkerKind::Food, pos: self.food };

        let ate = self.snake.head() == self.food;
        if ate {
            self.eat();
        }

        let head = self.snake.advance();

        if !on_grid(head) {
            info!("hit the wall at ({}, {}) with score {}", head.x, head.y, self.score);
            self.crash = Some(Crash::Wall);
            return TickOutcome::HitWall;
        }

        if self.snake.head_hits_body() {
            info!("bit itself at ({}, {}) with score {}", head.x, head.y, self.score);
            self.crash = Some(Crash::SelfCollision);
        }

        let mut markers = Vec::with_capacity(self.snake.body().len() + 1);
        markers.push(food_marker);
        markers.extend(
            self.snake
                .body()
                .iter()
                .map(|&pos| Marker { kind: MarkerKind::Segment, pos }),
        );

        TickOutcome::Frame(Frame {
            markers,
            score: self.score,
            high_score: self.high_score,
            score_changed: ate,
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_over(&self) -> bool {
        self.crash.is_some()
    }

    pub fn crash(&self) -> Option<Crash> {
        self.crash
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn velocity(&self) -> Velocity {
        self.snake.velocity()
    }

    pub fn body(&self) -> &[Position] {
        self.snake.body()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    fn eat(&mut self) {
        self.food = self.spawner.spawn();
        self.snake.grow();
        self.score += 1;

        if self.score >= self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }

        debug!(
            "ate food, score {} (high {}), next food at ({}, {})",
            self.score, self.high_score, self.food.x, self.food.y
        );
    }

    #[cfg(test)]
    pub(crate) fn with_snake(mut self, snake: Snake) -> Self {
        self.snake = snake;
        self
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

pub fn on_grid(pos: Position) -> bool {
    (1..=GRID_SIZE).contains(&pos.x) && (1..=GRID_SIZE).contains(&pos.y)
}
