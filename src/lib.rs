//! Tile Snake - a tile-grid Snake game for the terminal
//!
//! This library provides:
//! - Core game logic: snake, food, particles and the frame state machine (game module)
//! - Config and best-score files (storage module)
//! - Pixel draw-call rendering onto ratatui buffers (render module)
//! - Keyboard mapping, sound hooks and session metrics
//! - The interactive terminal session (modes module)

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
