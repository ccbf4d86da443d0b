use rand::Rng;

use super::canvas::Canvas;
use crate::error::RenderError;
use crate::game::{GameStateMachine, Phase, Position, Rect, Rgb};
use crate::metrics::GameMetrics;

/// Vertical spacing of HUD lines, pixels
const LINE_HEIGHT: i32 = 20;
const HUD_X: i32 = 10;

/// Turns the game into draw calls
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
        metrics: &GameMetrics,
    ) -> Result<(), RenderError> {
        let area = game.area();
        canvas.draw_rect(Rect::new(0, 0, area.width, area.height), Rgb::GRAY)?;

        self.render_food(canvas, game)?;
        self.render_snake(canvas, game)?;
        self.render_particles(canvas, game)?;
        self.render_hud(canvas, game)?;
        self.render_footer(canvas, game, metrics)?;

        match game.state().phase {
            Phase::Playing => Ok(()),
            Phase::Paused => self.render_paused(canvas, game),
            Phase::GameOver => self.render_game_over(canvas, game),
        }
    }

    fn render_food<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
    ) -> Result<(), RenderError> {
        // The last food of a batch is shown in blue
        let color = if game.foods().len() == 1 {
            Rgb::BLUE
        } else {
            Rgb::RED
        };
        for food in game.foods().iter() {
            canvas.draw_rect(*food, color)?;
        }
        Ok(())
    }

    fn render_snake<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
    ) -> Result<(), RenderError> {
        let snake = game.snake();
        canvas.draw_rect(snake.head(), Rgb::DARK_GREEN)?;
        for segment in snake.body() {
            canvas.draw_rect(*segment, Rgb::GREEN)?;
        }
        Ok(())
    }

    fn render_particles<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
    ) -> Result<(), RenderError> {
        let size = game.particles().config().size;
        for (_, particle) in game.particles().alive() {
            let pos = particle.position();
            canvas.draw_ellipse(Rect::new(pos.x, pos.y, size, size), particle.color)?;
        }
        Ok(())
    }

    fn render_hud<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
    ) -> Result<(), RenderError> {
        let state = game.state();
        let mut lines = vec![
            format!("Score: {}", state.score),
            format!("Best Score: {}", state.best_score),
            format!("Level: {}", state.level),
            format!(
                "Remaining Foods: {} / {}",
                game.foods().len(),
                game.foods().batch_size()
            ),
        ];
        if state.cheat_mode {
            lines.push("Cheat Mode on, You can't save best scores.".to_string());
        }

        for (i, line) in lines.iter().enumerate() {
            let y = LINE_HEIGHT / 2 + i as i32 * LINE_HEIGHT;
            canvas.draw_text(line, Position::new(HUD_X, y), Rgb::WHITE)?;
        }
        Ok(())
    }

    fn render_footer<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
        metrics: &GameMetrics,
    ) -> Result<(), RenderError> {
        let y = game.area().height - LINE_HEIGHT - LINE_HEIGHT / 2;
        let text = format!(
            "Time: {}  Games: {}  Session Best: {}  |  WASD/arrows, QEZC diagonal, Space pause, R restart, Esc quit",
            metrics.format_time(),
            metrics.games_played,
            metrics.high_score,
        );
        canvas.draw_text(&text, Position::new(HUD_X, y), Rgb::WHITE)
    }

    fn render_paused<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
    ) -> Result<(), RenderError> {
        let area = game.area();
        self.centered_text(canvas, "Paused", area.width / 2, area.height / 2, Rgb::WHITE)
    }

    fn render_game_over<C: Canvas, R: Rng>(
        &self,
        canvas: &mut C,
        game: &GameStateMachine<R>,
    ) -> Result<(), RenderError> {
        let area = game.area();
        let (cx, cy) = (area.width / 2, area.height / 2);
        self.centered_text(
            canvas,
            "Game Over! Press R to Restart or ESC to Quit",
            cx,
            cy,
            Rgb::CYAN,
        )?;
        let eaten = format!("Total Food Eaten: {}", game.state().foods_eaten);
        self.centered_text(canvas, &eaten, cx, cy + 2 * LINE_HEIGHT, Rgb::CYAN)
    }

    fn centered_text<C: Canvas>(
        &self,
        canvas: &mut C,
        text: &str,
        cx: i32,
        cy: i32,
        color: Rgb,
    ) -> Result<(), RenderError> {
        let x = cx - canvas.text_width(text) / 2;
        canvas.draw_text(text, Position::new(x, cy), color)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
