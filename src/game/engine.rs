use rand::Rng;
use tracing::{debug, info};

use super::{
    action::{Action, Direction},
    color::Rgb,
    config::GameConfig,
    food::FoodSet,
    geometry::{PlayArea, Position},
    particles::ParticleSystem,
    snake::Snake,
    state::{CollisionType, GameState, Phase},
};

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A food was eaten; particles burst from `at`
    FoodEaten { at: Position, color: Rgb },
    /// A new batch was laid out and the level went up to `level`
    FoodSpawned { count: usize, level: u32 },
    /// The session best was raised
    NewBestScore(u32),
    GameOver(CollisionType),
}

/// Result of one frame update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Whether the snake took a step this frame
    pub moved: bool,
    pub events: Vec<GameEvent>,
}

impl FrameReport {
    pub fn ate_food(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::FoodEaten { .. }))
    }

    pub fn collision(&self) -> Option<CollisionType> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver(c) => Some(*c),
            _ => None,
        })
    }
}

/// Owns the snake, the food and the particles and advances them each frame
///
/// Time is passed in as milliseconds on a monotonic clock; the machine only
/// compares elapsed spans against its thresholds.
pub struct GameStateMachine<R> {
    config: GameConfig,
    area: PlayArea,
    rng: R,
    state: GameState,
    snake: Snake,
    foods: FoodSet,
    particles: ParticleSystem,
    last_move_ms: u64,
    last_turn_ms: Option<u64>,
}

impl<R: Rng> GameStateMachine<R> {
    pub fn with_rng(config: GameConfig, best_score: u32, mut rng: R) -> Self {
        let area = PlayArea::new(config.width, config.height, config.tile_size);
        let tuning = &config.tuning;
        let state = GameState::new(best_score, tuning.starting_length, tuning.is_cheat());

        let snake = Snake::new(area.random_pos(&mut rng), config.tile_size);
        let mut foods = FoodSet::new();
        foods.spawn(&mut rng, &area, &snake, config.initial_food, state.level);

        Self {
            particles: ParticleSystem::new(config.particles.clone()),
            config,
            area,
            rng,
            state,
            snake,
            foods,
            last_move_ms: 0,
            last_turn_ms: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &FoodSet {
        &self.foods
    }

    #[cfg(test)]
    pub(crate) fn foods_mut(&mut self) -> &mut FoodSet {
        &mut self.foods
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Drop the snake back to one segment centered on `center`
    #[cfg(test)]
    pub(crate) fn place_snake(&mut self, center: Position) {
        self.snake.reset(center);
    }

    /// Feed one player action. Returns whether it took effect.
    pub fn apply(&mut self, action: Action, now_ms: u64) -> bool {
        match action {
            Action::Move(direction) => self.steer(direction, now_ms),
            Action::TogglePause => self.toggle_pause(),
            Action::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Buffer a direction change.
    ///
    /// Rejected while not playing, within `move_delay_ms` of the previous
    /// accepted change, or when it would reverse a snake longer than one.
    pub fn steer(&mut self, direction: Direction, now_ms: u64) -> bool {
        if self.state.phase != Phase::Playing {
            return false;
        }

        if let Some(last) = self.last_turn_ms {
            if now_ms.saturating_sub(last) < self.config.move_delay_ms {
                debug!(?direction, "Turn dropped: too soon after the last one");
                return false;
            }
        }

        if self.state.length > 1 && self.state.direction.is_opposite(direction) {
            return false;
        }

        self.state.direction = direction;
        self.last_turn_ms = Some(now_ms);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.state.phase = match self.state.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            Phase::GameOver => return false,
        };
        debug!(phase = ?self.state.phase, "Pause toggled");
        true
    }

    /// Start over: fresh counters, snake at a random cell, new food batch.
    ///
    /// The batch is sized by the level reached before the restart and then
    /// capped at `restart_food_cap`.
    pub fn restart(&mut self) {
        let reached = self.state.level;
        self.state.reset();
        self.snake.reset(self.area.random_pos(&mut self.rng));

        let count = self.rng.gen_range(self.config.food_batch.clone());
        self.foods
            .spawn(&mut self.rng, &self.area, &self.snake, count, reached);
        self.foods.truncate(self.config.restart_food_cap);

        self.last_turn_ms = None;
        info!(foods = self.foods.len(), "Game restarted");
    }

    /// Run one frame of game logic
    pub fn update(&mut self, now_ms: u64) -> FrameReport {
        let mut report = FrameReport::default();

        if self.state.phase == Phase::GameOver {
            return report;
        }
        self.particles.update();

        if self.state.phase == Phase::Paused {
            return report;
        }

        if let Some(collision) = self.detect_collision() {
            self.game_over(collision, &mut report);
            return report;
        }

        if !self.config.tuning.disable_food_collision {
            self.eat_food(&mut report);
            self.foods.check_bounds(&mut self.rng, &self.area, &self.snake);
            self.foods.remove_colliding_with_snake(&self.snake);
        }

        if self.foods.is_empty() {
            self.respawn_food(&mut report);
        }

        if now_ms.saturating_sub(self.last_move_ms) >= self.config.tuning.snake_speed_ms {
            self.last_move_ms = now_ms;
            self.snake
                .advance(self.state.direction, self.config.tile_size, self.state.length);
            report.moved = true;

            if let Some(collision) = self.detect_collision() {
                self.game_over(collision, &mut report);
            }
        }

        report
    }

    /// Wall hit (unless disabled) or head on an older segment (unless allowed)
    fn detect_collision(&self) -> Option<CollisionType> {
        let tuning = &self.config.tuning;

        if !tuning.disable_wall_collision && !self.area.on_screen(&self.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if tuning.fix_self_collision && self.snake.collides_with_body() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn eat_food(&mut self, report: &mut FrameReport) {
        let head = self.snake.head();
        let tuning = &self.config.tuning;

        while let Some(food) = self.foods.take_eaten_by(&head) {
            self.state.length = self.state.length.saturating_add(tuning.length_increment);
            self.state.score = self.state.score.saturating_add(tuning.score_increment);
            self.state.foods_eaten = self.state.foods_eaten.saturating_add(1);

            // The last food of a batch bursts blue
            let color = if self.foods.is_empty() {
                Rgb::BLUE
            } else {
                Rgb::RED
            };
            let at = food.center();
            self.particles.emit(&mut self.rng, at, color);
            report.events.push(GameEvent::FoodEaten { at, color });

            if self.state.record_score() {
                report.events.push(GameEvent::NewBestScore(self.state.best_score));
            }
        }
    }

    fn respawn_food(&mut self, report: &mut FrameReport) {
        let count = self.rng.gen_range(self.config.food_batch.clone());
        let spawned = self
            .foods
            .spawn(&mut self.rng, &self.area, &self.snake, count, self.state.level);
        self.state.level = self.state.level.saturating_add(1);

        info!(spawned, level = self.state.level, "Food batch spawned");
        report.events.push(GameEvent::FoodSpawned {
            count: spawned,
            level: self.state.level,
        });
    }

    fn game_over(&mut self, collision: CollisionType, report: &mut FrameReport) {
        self.state.phase = Phase::GameOver;
        self.state.last_collision = Some(collision);
        self.state.record_score();

        info!(
            ?collision,
            score = self.state.score,
            level = self.state.level,
            "Game over"
        );
        report.events.push(GameEvent::GameOver(collision));
    }
}
