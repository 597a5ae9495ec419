use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::snake::Position;
use crate::state::GRID_SIZE;

/// Source of food positions. Play uses `RandomFood`; tests can script it.
pub trait FoodSpawner {
    fn spawn(&mut self) -> Position;
}

/// Uniform placement over the whole grid. The snake's body is not avoided.
pub struct RandomFood<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomFood<R> {
    pub fn new(rng: R) -> Self {
        RandomFood { rng }
    }
}

impl RandomFood<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomFood::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FoodSpawner for RandomFood<R> {
    fn spawn(&mut self) -> Position {
        let x = self.rng.gen_range(1..=GRID_SIZE);
        let y = self.rng.gen_range(1..=GRID_SIZE);
        Position::new(x, y)
    }
}

impl<F: FnMut() -> Position> FoodSpawner for F {
    fn spawn(&mut self) -> Position {
        self()
    }
}
