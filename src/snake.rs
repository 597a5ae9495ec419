use std::ops::Add;

use Direction::*;

/// A cell on the board. Signed so a head that has just left the grid can
/// still be represented before the wall check ends the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

/// Per-tick displacement of the head. At most one axis is nonzero.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const STILL: Velocity = Velocity { dx: 0, dy: 0 };

    pub fn is_reverse_of(self, direction: Direction) -> bool {
        match direction {
            Up => self.dy == 1,
            Down => self.dy == -1,
            Left => self.dx == 1,
            Right => self.dx == -1,
        }
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = match direction {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        };
        Velocity { dx, dy }
    }
}

impl Add<Velocity> for Position {
    type Output = Position;

    fn add(self, v: Velocity) -> Position {
        Position::new(self.x + v.dx, self.y + v.dy)
    }
}

/// The snake's trail, head first. The trail stays empty until the first
/// `advance` lays the head down.
#[derive(Clone, Debug)]
pub struct Snake {
    head: Position,
    body: Vec<Position>,
    velocity: Velocity,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake { head, body: vec![], velocity: Velocity::STILL }
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Returns whether the request was accepted.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if self.velocity.is_reverse_of(new_direction) {
            return false;
        }

        self.velocity = new_direction.into();
        true
    }

    /// Appends a segment at the tail. The next `advance` overwrites it with the
    /// position its predecessor is leaving, or with the head on an empty trail.
    pub fn grow(&mut self) {
        let tail = self.body.last().copied().unwrap_or(self.head);
        self.body.push(tail);
    }

    /// Moves the head by the current velocity and drags the trail behind it.
    pub fn advance(&mut self) -> Position {
        self.head = self.head + self.velocity;

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        match self.body.first_mut() {
            Some(first) => *first = self.head,
            None => self.body.push(self.head),
        }

        self.head
    }

    pub fn head_hits_body(&self) -> bool {
        self.body.iter().skip(1).any(|&pos| pos == self.head)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(body: Vec<Position>, velocity: Velocity) -> Self {
        assert!(!body.is_empty(), "a snake needs a head");
        Snake { head: body[0], body, velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(direction: Direction) -> Snake {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.set_direction(direction);
        snake
    }

    #[test]
    fn reverse_is_rejected() {
        let mut snake = moving(Right);
        assert!(!snake.set_direction(Left));
        assert_eq!(snake.velocity(), Velocity { dx: 1, dy: 0 });

        assert!(snake.set_direction(Up));
        assert_eq!(snake.velocity(), Velocity { dx: 0, dy: -1 });
        assert!(!snake.set_direction(Down));
    }

    #[test]
    fn repeats_and_turns_are_accepted() {
        let mut snake = moving(Down);
        assert!(snake.set_direction(Down));
        assert!(snake.set_direction(Left));
        // Between two ticks this allows a quick U-turn through a side axis.
        assert!(snake.set_direction(Up));
        assert_eq!(snake.velocity(), Velocity::from(Up));
    }

    #[test]
    fn standing_still_accepts_anything() {
        for dir in &[Up, Down, Left, Right] {
            let mut snake = Snake::new(Position::new(5, 5));
            assert!(snake.set_direction(*dir));
        }
    }

    #[test]
    fn trail_follows_head() {
        let mut snake = Snake::from_parts(
            vec![Position::new(3, 1), Position::new(2, 1), Position::new(1, 1)],
            Right.into(),
        );
        snake.set_direction(Down);

        assert_eq!(snake.advance(), Position::new(3, 2));
        assert_eq!(
            snake.body(),
            &[Position::new(3, 2), Position::new(3, 1), Position::new(2, 1)]
        );
    }

    #[test]
    fn grown_segment_takes_the_old_tail() {
        let mut snake = Snake::from_parts(vec![Position::new(2, 1), Position::new(1, 1)], Right.into());
        snake.grow();
        snake.advance();

        assert_eq!(
            snake.body(),
            &[Position::new(3, 1), Position::new(2, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn trail_is_laid_by_the_first_move() {
        let mut snake = Snake::new(Position::new(5, 5));
        assert!(snake.body().is_empty());
        assert_eq!(snake.head(), Position::new(5, 5));

        snake.advance();
        assert_eq!(snake.body(), &[Position::new(5, 5)]);
    }

    #[test]
    fn growing_an_empty_trail_leaves_one_segment() {
        let mut snake = Snake::new(Position::new(5, 5));
        snake.grow();
        snake.advance();

        assert_eq!(snake.body(), &[Position::new(5, 5)]);
        assert!(!snake.head_hits_body());
    }

    #[test]
    fn head_collision_ignores_the_head_itself() {
        let snake = Snake::new(Position::new(1, 1));
        assert!(!snake.head_hits_body());

        let looped = Snake::from_parts(
            vec![Position::new(2, 2), Position::new(2, 3), Position::new(2, 2)],
            Up.into(),
        );
        assert!(looped.head_hits_body());
    }
}
