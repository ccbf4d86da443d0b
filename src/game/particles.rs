//! Short-lived decorative particles
//!
//! Particles live in a slot arena. Expired slots go on a free list and are
//! claimed again by the next emission, so steady-state play does not
//! allocate.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::geometry::Position;

/// Tuning for particle bursts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Particles per burst
    pub count: usize,
    /// Frames a particle stays alive
    pub lifetime: u32,
    /// Max initial speed per axis, pixels per frame
    pub speed: f32,
    /// Velocity multiplier applied every frame
    pub damping: f32,
    /// Drawn diameter in pixels
    pub size: i32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 20,
            lifetime: 40,
            speed: 1.0,
            damping: 0.97,
            size: 4,
        }
    }
}

/// Slot index into the particle arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub color: Rgb,
    /// Frames left; zero means the slot is free
    pub lifetime: u32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }

    /// Top-left pixel of the particle's drawing box
    pub fn position(&self) -> Position {
        Position::new(self.x.round() as i32, self.y.round() as i32)
    }
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    config: ParticleConfig,
    slots: Vec<Particle>,
    free: Vec<usize>,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Spawn a burst at `origin`, reusing dead slots before growing the arena
    pub fn emit<R: Rng + ?Sized>(&mut self, rng: &mut R, origin: Position, color: Rgb) {
        let speed = self.config.speed;
        for _ in 0..self.config.count {
            let particle = Particle {
                x: origin.x as f32,
                y: origin.y as f32,
                vx: rng.gen_range(-speed..=speed),
                vy: rng.gen_range(-speed..=speed),
                color,
                lifetime: self.config.lifetime,
            };

            match self.free.pop() {
                Some(index) => self.slots[index] = particle,
                None => self.slots.push(particle),
            }
        }
    }

    /// Advance every live particle by one frame
    pub fn update(&mut self) {
        let damping = self.config.damping;
        for (index, particle) in self.slots.iter_mut().enumerate() {
            if !particle.is_alive() {
                continue;
            }

            particle.vx *= damping;
            particle.vy *= damping;
            particle.x += particle.vx;
            particle.y += particle.vy;
            particle.lifetime -= 1;

            if !particle.is_alive() {
                self.free.push(index);
            }
        }
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.slots.get(id.0).filter(|p| p.is_alive())
    }

    pub fn alive(&self) -> impl Iterator<Item = (ParticleId, &Particle)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive())
            .map(|(index, p)| (ParticleId(index), p))
    }

    pub fn alive_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever allocated
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Kill every particle, keeping the slots for reuse
    pub fn clear(&mut self) {
        self.free.clear();
        for (index, particle) in self.slots.iter_mut().enumerate() {
            particle.lifetime = 0;
            self.free.push(index);
        }
    }
}
