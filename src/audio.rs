//! Fire-and-forget sound hooks

use std::io::Write;
use tracing::debug;

use crate::game::{FrameReport, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    FoodSpawn,
}

impl SoundCue {
    /// Cues triggered by a frame's events
    pub fn from_report(report: &FrameReport) -> impl Iterator<Item = SoundCue> + '_ {
        report.events.iter().filter_map(|event| match event {
            GameEvent::FoodEaten { .. } => Some(SoundCue::Eat),
            GameEvent::FoodSpawned { .. } => Some(SoundCue::FoodSpawn),
            _ => None,
        })
    }
}

pub trait AudioHooks {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing
pub struct Silent;

impl AudioHooks for Silent {
    fn play(&mut self, cue: SoundCue) {
        debug!(?cue, "Sound cue");
    }
}

/// Rings the terminal bell on every cue
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioHooks for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        debug!(?cue, "Sound cue");
        // A lost beep is not worth surfacing
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}
