//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Randomness is injected, so a seeded generator replays a game exactly.

pub mod action;
pub mod color;
pub mod config;
pub mod engine;
pub mod food;
pub mod geometry;
pub mod particles;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use color::Rgb;
pub use config::{GameConfig, Tuning};
pub use engine::{FrameReport, GameEvent, GameStateMachine};
pub use food::FoodSet;
pub use geometry::{PlayArea, Position, Rect};
pub use particles::{Particle, ParticleConfig, ParticleId, ParticleSystem};
pub use snake::Snake;
pub use state::{CollisionType, GameState, Phase};
