use serde::{Deserialize, Serialize};

/// Direction the snake can move
///
/// `Idle` is the zero vector the snake holds after a (re)start until the
/// player picks a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Idle,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// Unit delta (dx, dy) with y growing downwards
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Idle => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// Delta scaled to one tile
    pub fn offset(&self, tile_size: i32) -> (i32, i32) {
        let (dx, dy) = self.delta();
        (dx * tile_size, dy * tile_size)
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Idle => Direction::Idle,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    /// Returns true if turning from self to other would reverse into the neck.
    /// The idle vector has no opposite.
    pub fn is_opposite(&self, other: Direction) -> bool {
        !self.is_idle() && self.opposite() == other
    }

    pub fn is_idle(&self) -> bool {
        *self == Direction::Idle
    }
}

/// Action the player can feed into the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Buffer a new heading
    Move(Direction),
    /// Toggle between playing and paused
    TogglePause,
    /// Reset score, level and snake
    Restart,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}
