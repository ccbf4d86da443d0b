use std::time::{Duration, Instant};

use crate::game::{FrameReport, GameEvent};

/// Counters for the whole terminal session, across restarts
pub struct GameMetrics {
    pub session_start: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub foods_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            session_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            foods_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.session_start.elapsed();
    }

    /// Fold one frame's events into the counters
    pub fn record(&mut self, report: &FrameReport, score: u32) {
        for event in &report.events {
            match event {
                GameEvent::FoodEaten { .. } => self.foods_eaten += 1,
                GameEvent::GameOver(_) => self.on_game_over(score),
                _ => {}
            }
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Position, Rgb};

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15);
    }

    #[test]
    fn test_record_frame_events() {
        let mut metrics = GameMetrics::new();
        let report = FrameReport {
            moved: true,
            events: vec![
                GameEvent::FoodEaten {
                    at: Position::new(20, 20),
                    color: Rgb::RED,
                },
                GameEvent::FoodEaten {
                    at: Position::new(40, 20),
                    color: Rgb::BLUE,
                },
                GameEvent::GameOver(CollisionType::Wall),
            ],
        };

        metrics.record(&report, 7);
        assert_eq!(metrics.foods_eaten, 2);
        assert_eq!(metrics.games_played, 1);
        assert_eq!(metrics.high_score, 7);
    }
}
