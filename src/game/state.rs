use super::action::Direction;

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Playing,
    Paused,
    GameOver,
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the screen
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Score and progression counters
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    /// Survives restarts; seeded from the best-score file
    pub best_score: u32,
    pub length: usize,
    pub level: u32,
    pub direction: Direction,
    /// Foods eaten since the last restart
    pub foods_eaten: u32,
    /// Tuning deviates from defaults; best score will not be saved
    pub cheat_mode: bool,
    /// What ended the last game, if it is over
    pub last_collision: Option<CollisionType>,
}

impl GameState {
    pub fn new(best_score: u32, starting_length: usize, cheat_mode: bool) -> Self {
        Self {
            phase: Phase::Playing,
            score: 0,
            best_score,
            length: starting_length.max(1),
            level: 1,
            direction: Direction::Idle,
            foods_eaten: 0,
            cheat_mode,
            last_collision: None,
        }
    }

    /// Back to a fresh game; the best score stays.
    ///
    /// Length always returns to 1. The configured starting length only
    /// applies to the first game of a session.
    pub fn reset(&mut self) {
        self.phase = Phase::Playing;
        self.score = 0;
        self.length = 1;
        self.level = 1;
        self.direction = Direction::Idle;
        self.foods_eaten = 0;
        self.last_collision = None;
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Raise the best score if the current score beats it
    pub fn record_score(&mut self) -> bool {
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(12, 1, false);
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 12);
        assert_eq!(state.length, 1);
        assert_eq!(state.level, 1);
        assert!(state.direction.is_idle());
    }

    #[test]
    fn test_reset_keeps_best_score() {
        let mut state = GameState::new(3, 4, false);
        assert_eq!(state.length, 4);
        state.score = 9;
        state.record_score();
        state.length = 10;
        state.level = 4;
        state.direction = Direction::Left;
        state.phase = Phase::GameOver;

        state.reset();
        assert_eq!(state.best_score, 9);
        assert_eq!(state.score, 0);
        assert_eq!(state.length, 1);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, Phase::Playing);
        assert!(state.direction.is_idle());
    }

    #[test]
    fn test_record_score() {
        let mut state = GameState::new(5, 1, false);
        state.score = 5;
        assert!(!state.record_score());
        state.score = 6;
        assert!(state.record_score());
        assert_eq!(state.best_score, 6);
    }
}
