use std::collections::VecDeque;

use super::action::Direction;
use super::geometry::{Position, Rect};

/// The player's snake
///
/// `segments` holds the most recent head positions, oldest first; the last
/// entry is always a copy of `head`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Rect,
    segments: VecDeque<Rect>,
}

impl Snake {
    /// Create a single-segment snake centered on `start`
    pub fn new(start: Position, tile_size: i32) -> Self {
        let head = Rect::centered(start, tile_size);
        Self {
            head,
            segments: VecDeque::from([head]),
        }
    }

    /// Back to a single segment at `start`, dropping the history
    pub fn reset(&mut self, start: Position) {
        self.head = self.head.with_center(start);
        self.segments.clear();
        self.segments.push_back(self.head);
    }

    pub fn head(&self) -> Rect {
        self.head
    }

    /// All retained segments, oldest first, head last
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Rect> + '_ {
        self.segments.iter()
    }

    /// Segments excluding the newest one (the head copy)
    pub fn body(&self) -> impl Iterator<Item = &Rect> + '_ {
        let n = self.segments.len().saturating_sub(1);
        self.segments.iter().take(n)
    }

    /// Advance one tile in `direction` and keep the last `length` segments.
    /// An idle direction leaves the snake where it is.
    pub fn advance(&mut self, direction: Direction, tile_size: i32, length: usize) {
        if direction.is_idle() {
            return;
        }

        let (dx, dy) = direction.offset(tile_size);
        self.head = self.head.translated(dx, dy);
        self.segments.push_back(self.head);

        let keep = length.max(1);
        while self.segments.len() > keep {
            self.segments.pop_front();
        }
    }

    /// Head center coincides with any older segment
    pub fn collides_with_body(&self) -> bool {
        let center = self.head.center();
        self.body().any(|segment| segment.center() == center)
    }

    /// Any older segment overlaps `rect`
    pub fn body_overlaps(&self, rect: &Rect) -> bool {
        self.body().any(|segment| segment.intersects(rect))
    }

    /// Any retained segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.iter().any(|segment| segment.center() == pos)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: i32 = 20;

    fn centers(snake: &Snake) -> Vec<Position> {
        snake.segments().map(Rect::center).collect()
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(400, 320), TILE);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head().center(), Position::new(400, 320));
        assert_eq!(snake.body().count(), 0);
    }

    #[test]
    fn test_move_keeps_length() {
        let mut snake = Snake::new(Position::new(400, 320), TILE);

        snake.advance(Direction::Right, TILE, 1);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head().center(), Position::new(420, 320));

        // Growing: the history fills up to the new length
        snake.advance(Direction::Right, TILE, 3);
        snake.advance(Direction::Down, TILE, 3);
        assert_eq!(
            centers(&snake),
            vec![
                Position::new(420, 320),
                Position::new(440, 320),
                Position::new(440, 340),
            ]
        );

        snake.advance(Direction::DownLeft, TILE, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head().center(), Position::new(420, 360));
    }

    #[test]
    fn test_idle_does_not_move() {
        let mut snake = Snake::new(Position::new(400, 320), TILE);
        snake.advance(Direction::Idle, TILE, 4);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head().center(), Position::new(400, 320));
    }

    #[test]
    fn test_fresh_head_is_not_a_self_collision() {
        let mut snake = Snake::new(Position::new(400, 320), TILE);
        for _ in 0..5 {
            snake.advance(Direction::Right, TILE, 5);
            assert!(!snake.collides_with_body());
        }
    }

    #[test]
    fn test_self_collision() {
        let mut snake = Snake::new(Position::new(100, 100), TILE);
        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ] {
            snake.advance(direction, TILE, 5);
            assert!(!snake.collides_with_body());
        }

        // (140,100) -> (140,120) -> (120,120) -> up lands on (120,100)
        snake.advance(Direction::Up, TILE, 5);
        assert!(snake.collides_with_body());
    }

    #[test]
    fn test_reset_clears_history() {
        let mut snake = Snake::new(Position::new(100, 100), TILE);
        for _ in 0..4 {
            snake.advance(Direction::Down, TILE, 4);
        }
        snake.reset(Position::new(300, 300));
        assert_eq!(centers(&snake), vec![Position::new(300, 300)]);
    }

    #[test]
    fn test_body_overlap_ignores_head() {
        let mut snake = Snake::new(Position::new(100, 100), TILE);
        snake.advance(Direction::Right, TILE, 2);

        let under_body = Rect::centered(Position::new(100, 100), TILE);
        let under_head = Rect::centered(Position::new(120, 100), TILE);
        assert!(snake.body_overlaps(&under_body));
        assert!(!snake.body_overlaps(&under_head));
        assert!(snake.occupies(Position::new(120, 100)));
    }
}
