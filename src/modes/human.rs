use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::audio::{AudioHooks, SoundCue};
use crate::game::{GameConfig, GameStateMachine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{BufferCanvas, Renderer};

/// Interactive terminal session
///
/// Runs one frame per `1 / fps` seconds: input is drained as it arrives,
/// then the game is updated against a monotonic millisecond clock and drawn.
/// After a game over only restart and quit keys have any effect.
pub struct HumanMode {
    game: GameStateMachine<StdRng>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Box<dyn AudioHooks>,
    clock: Instant,
    should_quit: bool,
    render_failing: bool,
}

impl HumanMode {
    /// `seed` replays a session exactly; without one the generator is seeded
    /// from OS entropy.
    pub fn new(
        config: GameConfig,
        best_score: u32,
        seed: Option<u64>,
        audio: Box<dyn AudioHooks>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            game: GameStateMachine::with_rng(config, best_score, rng),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            clock: Instant::now(),
            should_quit: false,
            render_failing: false,
        }
    }

    /// Highest score reached this session, including the stored one
    pub fn best_score(&self) -> u32 {
        self.game.state().best_score
    }

    pub fn cheat_mode(&self) -> bool {
        self.game.state().cheat_mode
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("Session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            best_score = self.best_score(),
            games = self.metrics.games_played,
            "Session ended"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let frame_interval = Duration::from_millis(self.game.config().frame_interval_ms());
        let mut frame_timer = interval(frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // One frame: update, then draw
                _ = frame_timer.tick() => {
                    self.update_game();
                    self.draw(terminal);
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => {
                let now = self.now_ms();
                self.game.apply(action, now);
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let now = self.now_ms();
        let report = self.game.update(now);

        self.metrics.update();
        self.metrics.record(&report, self.game.state().score);

        for cue in SoundCue::from_report(&report) {
            self.audio.play(cue);
        }
    }

    /// Draw one frame. A frame that fails to draw is skipped.
    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) {
        let tile_size = self.game.config().tile_size;
        let (renderer, game, metrics) = (&self.renderer, &self.game, &self.metrics);

        let result = terminal.try_draw(|frame| {
            let area = frame.area();
            let mut canvas = BufferCanvas::new(frame.buffer_mut(), area, tile_size)?;
            renderer.render(&mut canvas, game, metrics)
        });

        match result {
            Ok(_) if self.render_failing => {
                info!("Rendering recovered");
                self.render_failing = false;
            }
            Ok(_) => {}
            Err(e) if !self.render_failing => {
                warn!(error = %e, "Skipping frames that cannot be drawn");
                self.render_failing = true;
            }
            Err(_) => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
