use rand::seq::SliceRandom;
use rand::Rng;

use super::geometry::{PlayArea, Position, Rect};
use super::snake::Snake;

/// The food currently on the board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodSet {
    foods: Vec<Rect>,
    /// Size of the most recent batch
    batch_size: usize,
}

impl FoodSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the board with `count * level` foods on distinct free cells.
    ///
    /// Only cells whose tile fits inside the play area are used, and cells
    /// under any snake segment are never chosen. If the board has fewer free
    /// cells than requested, every free cell gets one.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        area: &PlayArea,
        snake: &Snake,
        count: usize,
        level: u32,
    ) -> usize {
        let wanted = count.saturating_mul(level as usize);
        self.foods.clear();
        let free = self.free_cells(area, snake);

        self.foods = free
            .choose_multiple(rng, wanted)
            .map(|cell| area.tile_at(*cell))
            .collect();
        self.batch_size = self.foods.len();
        self.batch_size
    }

    /// Keep at most `cap` foods
    pub fn truncate(&mut self, cap: usize) {
        self.foods.truncate(cap);
        self.batch_size = self.batch_size.min(cap);
    }

    /// Re-home every food that pokes outside the play area onto a random
    /// free cell. A food with no free cell left is dropped. Returns how many
    /// were moved or dropped.
    pub fn check_bounds<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        area: &PlayArea,
        snake: &Snake,
    ) -> usize {
        if self.foods.iter().all(|food| area.contains(food)) {
            return 0;
        }

        let before = self.foods.len();
        self.foods.retain(|food| area.contains(food));
        let stray = before - self.foods.len();

        let mut free = self.free_cells(area, snake);
        for _ in 0..stray {
            if free.is_empty() {
                break;
            }
            let cell = free.swap_remove(rng.gen_range(0..free.len()));
            self.foods.push(area.tile_at(cell));
        }
        stray
    }

    /// In-area cells not under the snake or another food
    fn free_cells(&self, area: &PlayArea, snake: &Snake) -> Vec<Position> {
        area.valid_positions()
            .iter()
            .copied()
            .filter(|cell| area.contains(&area.tile_at(*cell)))
            .filter(|cell| !snake.occupies(*cell))
            .filter(|cell| self.foods.iter().all(|food| food.center() != *cell))
            .collect()
    }

    /// Drop food hidden under the snake's body. Returns how many were removed.
    pub fn remove_colliding_with_snake(&mut self, snake: &Snake) -> usize {
        let before = self.foods.len();
        self.foods.retain(|food| !snake.body_overlaps(food));
        before - self.foods.len()
    }

    /// Remove and return the first food whose center lies inside `head`
    pub fn take_eaten_by(&mut self, head: &Rect) -> Option<Rect> {
        let index = self
            .foods
            .iter()
            .position(|food| head.contains_point(food.center()))?;
        Some(self.foods.remove(index))
    }

    pub fn push(&mut self, food: Rect) {
        self.foods.push(food);
    }

    pub fn clear(&mut self) {
        self.foods.clear();
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Rect> + '_ {
        self.foods.iter()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}
