//! Pixel-space geometry: points, axis-aligned boxes and the play area
//!
//! All gameplay coordinates are integer pixels. Snake segments and food are
//! `tile_size` squares whose centers sit on multiples of `tile_size`.

use rand::Rng;
use std::cell::OnceCell;

/// A point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box, top-left anchored. Compared by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centered on `center`
    pub fn centered(center: Position, size: i32) -> Self {
        Self {
            x: center.x - size / 2,
            y: center.y - size / 2,
            w: size,
            h: size,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Same box re-centered on `center`
    pub fn with_center(&self, center: Position) -> Self {
        Self::centered_wh(center, self.w, self.h)
    }

    fn centered_wh(center: Position, w: i32, h: i32) -> Self {
        Self {
            x: center.x - w / 2,
            y: center.y - h / 2,
            w,
            h,
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains_point(&self, point: Position) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Strict overlap; boxes that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// The rectangular area objects may occupy, plus the screen it lives on
///
/// Acts as the random position provider for snake and food placement.
#[derive(Debug, Clone)]
pub struct PlayArea {
    pub width: i32,
    pub height: i32,
    pub tile_size: i32,
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    valid_positions: OnceCell<Vec<Position>>,
}

impl PlayArea {
    /// Play area for a `width` x `height` screen: `[0, width - tile) x [0, height - tile)`
    pub fn new(width: i32, height: i32, tile_size: i32) -> Self {
        Self {
            width,
            height,
            tile_size,
            x_min: 0,
            x_max: width - tile_size,
            y_min: 0,
            y_max: height - tile_size,
            valid_positions: OnceCell::new(),
        }
    }

    /// Nearest tile-aligned point to the middle of the screen
    pub fn center(&self) -> Position {
        let t = self.tile_size;
        Position::new((self.width / 2) / t * t, (self.height / 2) / t * t)
    }

    /// Uniform tile-aligned point, kept one tile away from the play-area edges
    pub fn random_pos<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        let t = self.tile_size;
        let x = sample_axis(rng, self.x_min + t, self.x_max - t, t);
        let y = sample_axis(rng, self.y_min + t, self.y_max - t, t);
        Position::new(x, y)
    }

    /// Every grid cell of the play area, enumerated once and memoized
    pub fn valid_positions(&self) -> &[Position] {
        self.valid_positions.get_or_init(|| {
            let t = self.tile_size as usize;
            let mut cells = Vec::new();
            for x in (self.x_min..self.x_max).step_by(t) {
                for y in (self.y_min..self.y_max).step_by(t) {
                    cells.push(Position::new(x, y));
                }
            }
            cells
        })
    }

    /// True if `rect` lies fully inside the play area
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left() >= self.x_min
            && rect.right() <= self.x_max
            && rect.top() >= self.y_min
            && rect.bottom() <= self.y_max
    }

    /// True if `rect` lies fully on screen (`[0, width] x [0, height]`)
    pub fn on_screen(&self, rect: &Rect) -> bool {
        rect.left() >= 0 && rect.right() <= self.width && rect.top() >= 0 && rect.bottom() <= self.height
    }

    pub fn is_tile_aligned(&self, pos: Position) -> bool {
        (pos.x - self.x_min).rem_euclid(self.tile_size) == 0
            && (pos.y - self.y_min).rem_euclid(self.tile_size) == 0
    }

    /// A tile-sized square centered on `center`
    pub fn tile_at(&self, center: Position) -> Rect {
        Rect::centered(center, self.tile_size)
    }
}

/// Uniform pick from `start, start + step, ...` below `end`
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, start: i32, end: i32, step: i32) -> i32 {
    let steps = ((end - start) + step - 1) / step;
    if steps <= 0 {
        return start;
    }
    start + rng.gen_range(0..steps) * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rect_center_roundtrip() {
        let rect = Rect::centered(Position::new(400, 320), 20);
        assert_eq!(rect, Rect::new(390, 310, 20, 20));
        assert_eq!(rect.center(), Position::new(400, 320));
        assert_eq!(rect.translated(20, 0).center(), Position::new(420, 320));
    }

    #[test]
    fn test_contains_point_is_half_open() {
        let rect = Rect::new(0, 0, 20, 20);
        assert!(rect.contains_point(Position::new(0, 0)));
        assert!(rect.contains_point(Position::new(19, 19)));
        assert!(!rect.contains_point(Position::new(20, 10)));
        assert!(!rect.contains_point(Position::new(10, 20)));
    }

    #[test]
    fn test_touching_rects_do_not_intersect() {
        let a = Rect::new(0, 0, 20, 20);
        assert!(!a.intersects(&Rect::new(20, 0, 20, 20)));
        assert!(!a.intersects(&Rect::new(0, 20, 20, 20)));
        assert!(a.intersects(&Rect::new(19, 19, 20, 20)));
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_play_area_bounds() {
        let area = PlayArea::new(800, 650, 20);
        assert_eq!((area.x_min, area.x_max), (0, 780));
        assert_eq!((area.y_min, area.y_max), (0, 630));
        assert_eq!(area.center(), Position::new(400, 320));
    }

    #[test]
    fn test_random_pos_is_aligned_and_inside() {
        let area = PlayArea::new(800, 650, 20);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let pos = area.random_pos(&mut rng);
            assert!(area.is_tile_aligned(pos));
            assert!(area.contains(&area.tile_at(pos)), "{:?} escapes the area", pos);
        }
    }

    #[test]
    fn test_valid_positions_cover_grid() {
        let area = PlayArea::new(800, 650, 20);
        let cells = area.valid_positions();

        // x in 0..780, y in 0..630, step 20
        assert_eq!(cells.len(), 39 * 32);
        assert_eq!(cells[0], Position::new(0, 0));
        assert!(cells.iter().all(|p| area.is_tile_aligned(*p)));

        // Memoized
        assert!(std::ptr::eq(cells, area.valid_positions()));
    }

    #[test]
    fn test_on_screen() {
        let area = PlayArea::new(800, 650, 20);
        assert!(area.on_screen(&area.tile_at(Position::new(20, 20))));
        assert!(!area.on_screen(&area.tile_at(Position::new(0, 20))));
        assert!(!area.on_screen(&area.tile_at(Position::new(-20, 320))));
        assert!(!area.on_screen(&area.tile_at(Position::new(800, 320))));
    }
}
